//! Mesh buffer validation and cleanup
//!
//! Checks the structural invariants of a [`MeshBuffer`] and reports geometry
//! that exporters cannot use:
//! - Parallel vertex/normal/uv arrays of different length
//! - Triangle indices past the end of the vertex array
//! - NaN/Inf coordinates
//! - Degenerate triangles (zero or near-zero area)

use glam::Vec3;

use super::MeshBuffer;

/// Result of mesh validation
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationResult {
    /// Total number of triangles validated
    pub total: usize,
    /// Whether vertices, normals and uvs differ in length
    pub length_mismatch: bool,
    /// Triangles referencing a vertex that does not exist
    pub out_of_range: usize,
    /// Triangles with NaN/Inf corners
    pub invalid_coords: usize,
    /// Triangles with zero or near-zero area
    pub degenerate: usize,
    /// Vertex normals that are not unit length
    pub invalid_normals: usize,
    /// Warning messages for issues found
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Check if the buffer honors its structural invariants
    pub fn is_valid(&self) -> bool {
        !self.length_mismatch && self.out_of_range == 0 && self.invalid_coords == 0
    }

    /// Check if the buffer has any issues at all
    pub fn has_issues(&self) -> bool {
        !self.is_valid() || self.degenerate > 0 || self.invalid_normals > 0
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.total += other.total;
        self.length_mismatch |= other.length_mismatch;
        self.out_of_range += other.out_of_range;
        self.invalid_coords += other.invalid_coords;
        self.degenerate += other.degenerate;
        self.invalid_normals += other.invalid_normals;
        self.warnings.extend(other.warnings);
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if !self.has_issues() {
            format!("Mesh valid: {} triangles, no issues", self.total)
        } else {
            format!(
                "Mesh issues: {} total, {} out of range, {} invalid coords, {} degenerate, {} bad normals",
                self.total,
                self.out_of_range,
                self.invalid_coords,
                self.degenerate,
                self.invalid_normals
            )
        }
    }
}

/// Minimum area threshold for non-degenerate triangles (in square meters)
const MIN_TRIANGLE_AREA: f32 = 1e-10;

/// Validate a mesh buffer and return a detailed report
pub fn validate_mesh(mesh: &MeshBuffer) -> ValidationResult {
    let mut result = ValidationResult {
        total: mesh.triangle_count(),
        ..Default::default()
    };

    let n = mesh.vertices.len();
    if mesh.normals.len() != n || mesh.uvs.len() != n {
        result.length_mismatch = true;
        result.warnings.push(format!(
            "Parallel arrays differ: {} vertices, {} normals, {} uvs",
            n,
            mesh.normals.len(),
            mesh.uvs.len()
        ));
    }

    result.invalid_normals = mesh
        .normals
        .iter()
        .filter(|normal| !is_normal_valid(**normal))
        .count();

    for submesh in &mesh.submeshes {
        for tri in &submesh.triangles {
            let Some(corners) = corners(&mesh.vertices, tri) else {
                result.out_of_range += 1;
                continue;
            };

            if corners.iter().any(|v| !v.is_finite()) {
                result.invalid_coords += 1;
                continue;
            }

            if triangle_area(corners) < MIN_TRIANGLE_AREA {
                result.degenerate += 1;
            }
        }
    }

    if result.out_of_range > 0 {
        result.warnings.push(format!(
            "{} triangles reference missing vertices",
            result.out_of_range
        ));
    }
    if result.invalid_coords > 0 {
        result.warnings.push(format!(
            "{} triangles have NaN/Inf coordinates",
            result.invalid_coords
        ));
    }
    if result.degenerate > 0 {
        result.warnings.push(format!(
            "{} degenerate triangles detected",
            result.degenerate
        ));
    }

    result
}

fn corners(vertices: &[Vec3], tri: &[u32; 3]) -> Option<[Vec3; 3]> {
    Some([
        *vertices.get(tri[0] as usize)?,
        *vertices.get(tri[1] as usize)?,
        *vertices.get(tri[2] as usize)?,
    ])
}

/// Calculate the area of a triangle from its corners
fn triangle_area([v0, v1, v2]: [Vec3; 3]) -> f32 {
    0.5 * (v1 - v0).cross(v2 - v0).length()
}

/// Check if a normal vector is valid (unit length, not zero/NaN)
fn is_normal_valid(normal: Vec3) -> bool {
    let len_sq = normal.length_squared();
    len_sq.is_finite() && (0.99..=1.01).contains(&len_sq)
}

/// Remove degenerate and invalid triangles from a mesh
///
/// Submeshes left without triangles are dropped. Vertices are kept so the
/// remaining indices stay valid. Returns the number of triangles removed.
pub fn remove_degenerate(mesh: &mut MeshBuffer) -> usize {
    let before = mesh.triangle_count();

    let vertices = &mesh.vertices;
    for submesh in &mut mesh.submeshes {
        submesh.triangles.retain(|tri| {
            corners(vertices, tri).is_some_and(|c| {
                c.iter().all(|v| v.is_finite()) && triangle_area(c) >= MIN_TRIANGLE_AREA
            })
        });
    }
    mesh.submeshes.retain(|s| !s.triangles.is_empty());

    before - mesh.triangle_count()
}
