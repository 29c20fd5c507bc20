//! Meshes for closed outlines: extruded walls and flat/peaked fans.

use glam::{Vec2, Vec3};

use super::MeshBuffer;
use crate::geometry::lift;

/// A way outline expressed relative to its own origin
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    /// Mean of all outline points, relative to the bounds center
    pub origin: Vec2,
    /// Outline points relative to `origin`, in way order
    pub outline: Vec<Vec2>,
}

impl Footprint {
    /// Build a footprint from absolute planar points
    ///
    /// Every point counts towards the origin, including a repeated closing
    /// point of a closed way.
    pub fn new(points: &[Vec2], center: Vec2) -> Self {
        let mean = if points.is_empty() {
            Vec2::ZERO
        } else {
            points.iter().copied().sum::<Vec2>() / points.len() as f32
        };

        Self {
            origin: mean - center,
            outline: points.iter().map(|&p| p - mean).collect(),
        }
    }

    /// The outline without a repeated closing point
    pub fn ring(&self) -> &[Vec2] {
        match self.outline.as_slice() {
            [first, rest @ .., last] if !rest.is_empty() && first == last => {
                &self.outline[..self.outline.len() - 1]
            }
            all => all,
        }
    }

    /// Whether the ring encloses any area at all
    pub fn has_area(&self) -> bool {
        let ring = self.ring();
        let mut distinct: Vec<Vec2> = Vec::with_capacity(ring.len());
        for &p in ring {
            if !distinct.contains(&p) {
                distinct.push(p);
            }
        }
        distinct.len() >= 3
    }
}

/// Extrude each consecutive outline edge into a vertical quad
///
/// Quads span from `base` to `top` and are wound both ways so the wall is
/// lit from either side. Returns the triangles; vertices are appended to
/// `mesh`.
pub fn extrude_walls(mesh: &mut MeshBuffer, outline: &[Vec2], base: f32, top: f32) -> Vec<[u32; 3]> {
    let mut triangles = Vec::with_capacity(outline.len().saturating_sub(1) * 4);

    for edge in outline.windows(2) {
        let (a, b) = (edge[0], edge[1]);
        let d = b - a;
        let normal = Vec3::new(d.y, 0.0, -d.x).try_normalize().unwrap_or(Vec3::NEG_Z);

        let p1 = mesh.push_vertex(lift(a, base), normal, Vec2::new(0.0, 0.0));
        let p2 = mesh.push_vertex(lift(b, base), normal, Vec2::new(1.0, 0.0));
        let p3 = mesh.push_vertex(lift(a, top), normal, Vec2::new(0.0, 1.0));
        let p4 = mesh.push_vertex(lift(b, top), normal, Vec2::new(1.0, 1.0));

        // Front
        triangles.push([p1, p3, p2]);
        triangles.push([p3, p4, p2]);
        // Back
        triangles.push([p2, p3, p1]);
        triangles.push([p2, p4, p3]);
    }

    triangles
}

/// Triangulate a ring against a single apex vertex
///
/// The apex is emitted first, followed by one vertex per ring point at
/// `ring_height`. Every ring edge, including the closing edge, forms one
/// triangle with the apex in each winding.
pub fn fan(mesh: &mut MeshBuffer, ring: &[Vec2], ring_height: f32, apex: Vec3) -> Vec<[u32; 3]> {
    if ring.len() < 3 {
        return Vec::new();
    }

    let center = mesh.push_vertex(apex, Vec3::Y, Vec2::new(0.5, 0.5));
    let first = mesh.vertex_count() as u32;
    for &p in ring {
        mesh.push_vertex(lift(p, ring_height), Vec3::Y, p);
    }

    let n = ring.len() as u32;
    let mut triangles = Vec::with_capacity(ring.len() * 2);
    for k in 0..n {
        let a = first + k;
        let b = first + (k + 1) % n;
        triangles.push([center, a, b]);
        triangles.push([center, b, a]);
    }

    triangles
}
