use glam::{Vec2, Vec3};

/// Material slot assigned to a submesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Material {
    Road,
    Footway,
    Building,
    Roof,
    Water,
    Green,
}

impl Material {
    pub const ALL: [Material; 6] = [
        Material::Road,
        Material::Footway,
        Material::Building,
        Material::Roof,
        Material::Water,
        Material::Green,
    ];

    /// Stable name used by the exporters
    pub fn name(self) -> &'static str {
        match self {
            Material::Road => "road",
            Material::Footway => "footway",
            Material::Building => "building",
            Material::Roof => "roof",
            Material::Water => "water",
            Material::Green => "green",
        }
    }
}

/// A triangle subset of a mesh rendered with one material
#[derive(Debug, Clone, PartialEq)]
pub struct Submesh {
    pub triangles: Vec<[u32; 3]>,
    pub material: Material,
}

/// Vertex data plus material-partitioned triangle lists
///
/// `vertices`, `normals` and `uvs` always have the same length and every
/// triangle index is below that length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub submeshes: Vec<Submesh>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        self.vertices.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        (self.vertices.len() - 1) as u32
    }

    /// Add a submesh, skipping empty triangle lists
    pub fn push_submesh(&mut self, triangles: Vec<[u32; 3]>, material: Material) {
        if !triangles.is_empty() {
            self.submeshes.push(Submesh {
                triangles,
                material,
            });
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.triangles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Mean of all vertex positions, zero for an empty buffer
    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        self.vertices.iter().copied().sum::<Vec3>() / self.vertices.len() as f32
    }

    /// Shift every vertex by `-offset`
    pub fn recenter(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            *v -= offset;
        }
    }

    /// Iterate over all triangles as world-space corner positions
    pub fn triangles_at(&self, origin: Vec3) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.submeshes.iter().flat_map(move |s| {
            s.triangles.iter().map(move |t| {
                [
                    origin + self.vertices[t[0] as usize],
                    origin + self.vertices[t[1] as usize],
                    origin + self.vertices[t[2] as usize],
                ]
            })
        })
    }
}

/// Face normal of a triangle using the right-hand rule
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let n = (v1 - v0).cross(v2 - v0);
    if n.length_squared() > 1e-20 {
        n.normalize()
    } else {
        Vec3::Y // Default to up for degenerate triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normal() {
        // Counter-clockwise in the XZ plane seen from above points down in a
        // right-handed Y-up frame
        let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::Z);
        assert!((n - Vec3::NEG_Y).length() < 1e-6);

        let degenerate = face_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(degenerate, Vec3::Y);
    }

    #[test]
    fn test_buffer_bookkeeping() {
        let mut buffer = MeshBuffer::new();
        let a = buffer.push_vertex(Vec3::ZERO, Vec3::Y, Vec2::ZERO);
        let b = buffer.push_vertex(Vec3::new(2.0, 0.0, 0.0), Vec3::Y, Vec2::X);
        let c = buffer.push_vertex(Vec3::new(0.0, 0.0, 2.0), Vec3::Y, Vec2::Y);
        buffer.push_submesh(vec![[a, b, c]], Material::Road);
        buffer.push_submesh(Vec::new(), Material::Footway);

        assert_eq!(buffer.vertex_count(), 3);
        assert_eq!(buffer.triangle_count(), 1);
        assert_eq!(buffer.submeshes.len(), 1);

        let center = buffer.centroid();
        buffer.recenter(center);
        assert!(buffer.centroid().length() < 1e-6);
    }

    #[test]
    fn test_triangles_at_origin() {
        let mut buffer = MeshBuffer::new();
        let a = buffer.push_vertex(Vec3::ZERO, Vec3::Y, Vec2::ZERO);
        let b = buffer.push_vertex(Vec3::X, Vec3::Y, Vec2::ZERO);
        let c = buffer.push_vertex(Vec3::Z, Vec3::Y, Vec2::ZERO);
        buffer.push_submesh(vec![[a, b, c]], Material::Green);

        let tris: Vec<_> = buffer.triangles_at(Vec3::new(10.0, 1.0, 0.0)).collect();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0][1], Vec3::new(11.0, 1.0, 0.0));
    }
}
