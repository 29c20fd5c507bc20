use glam::{Vec2, Vec3};

use super::{Material, MeshBuffer};
use crate::config::dimensions::{
    DEFAULT_RIVER_HALF_WIDTH, DEFAULT_STREAM_HALF_WIDTH, FOOTWAY_HALF_WIDTH, ROAD_HALF_WIDTH,
};
use crate::domain::{Category, Lane};
use crate::geometry::{intersect, perpendicular};
use crate::stitch::Street;

/// Half-width of the ribbon for each category, in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonWidths {
    pub road: f32,
    pub footway: f32,
    pub river: f32,
    pub stream: f32,
}

impl Default for RibbonWidths {
    fn default() -> Self {
        Self {
            road: ROAD_HALF_WIDTH,
            footway: FOOTWAY_HALF_WIDTH,
            river: DEFAULT_RIVER_HALF_WIDTH,
            stream: DEFAULT_STREAM_HALF_WIDTH,
        }
    }
}

impl RibbonWidths {
    pub fn half_width(&self, category: Category) -> f32 {
        match category {
            Category::Road => self.road,
            Category::Footway => self.footway,
            Category::River => self.river,
            Category::Stream => self.stream,
        }
    }
}

/// One ribbon section between two consecutive street nodes
///
/// Corners are ordered start-right, start-left, end-right, end-left
/// relative to the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [Vec3; 4],
    pub lane: Lane,
}

/// Compute the quad for the transition from node `i - 1` to node `i`
///
/// Each corner is the intersection of the offset boundaries of the two
/// segments meeting at that node, so neighbouring quads share their seam
/// exactly. Missing neighbours at an open chain's ends are mirrored; a
/// looped chain wraps past its duplicated closing node.
///
/// `i` must be in `1..street.len()`.
pub fn cross_section(street: &Street, i: usize, widths: &RibbonWidths) -> Quad {
    let nodes = &street.nodes;
    let n = nodes.len();

    let s1 = (nodes[i - 1].position, nodes[i - 1].category);
    let s2 = (nodes[i].position, nodes[i].category);

    let s0 = if i > 1 {
        (nodes[i - 2].position, nodes[i - 2].category)
    } else if street.looped {
        (nodes[n - 2].position, nodes[n - 2].category)
    } else {
        (2.0 * s1.0 - s2.0, s1.1)
    };

    let s3 = if i < n - 1 {
        (nodes[i + 1].position, nodes[i + 1].category)
    } else if street.looped {
        (nodes[1].position, nodes[1].category)
    } else {
        (2.0 * s2.0 - s1.0, s2.1)
    };

    let [w0, w1, w2, w3] = [s0.1, s1.1, s2.1, s3.1].map(|c| widths.half_width(c));
    let (p0, p1, p2, p3) = (s0.0, s1.0, s2.0, s3.0);

    let v1 = intersect(
        perpendicular(p0, p1, -w0),
        perpendicular(p1, p0, w1),
        perpendicular(p2, p1, w2),
        perpendicular(p1, p2, -w1),
    );
    let v2 = intersect(
        perpendicular(p0, p1, w0),
        perpendicular(p1, p0, -w1),
        perpendicular(p2, p1, -w2),
        perpendicular(p1, p2, w1),
    );
    let v3 = intersect(
        perpendicular(p1, p2, -w1),
        perpendicular(p2, p1, w2),
        perpendicular(p3, p2, w3),
        perpendicular(p2, p3, -w2),
    );
    let v4 = intersect(
        perpendicular(p1, p2, w1),
        perpendicular(p2, p1, -w2),
        perpendicular(p3, p2, -w3),
        perpendicular(p2, p3, w2),
    );

    Quad {
        corners: [v1, v2, v3, v4],
        lane: s2.1.lane(),
    }
}

/// All quads of a street, one per consecutive node pair
pub fn street_quads(street: &Street, widths: &RibbonWidths) -> Vec<Quad> {
    (1..street.len())
        .map(|i| cross_section(street, i, widths))
        .collect()
}

/// Accumulates ribbon quads into a two-lane mesh
///
/// Owned by a single emission call; nothing is shared between streets.
#[derive(Debug, Default)]
pub struct RibbonBuilder {
    mesh: MeshBuffer,
    primary: Vec<[u32; 3]>,
    secondary: Vec<[u32; 3]>,
}

impl RibbonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_quad(&mut self, quad: &Quad) {
        const UVS: [Vec2; 4] = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        ];

        let [p1, p2, p3, p4] =
            [0, 1, 2, 3].map(|k| self.mesh.push_vertex(quad.corners[k], Vec3::Y, UVS[k]));

        let triangles = match quad.lane {
            Lane::Primary => &mut self.primary,
            Lane::Secondary => &mut self.secondary,
        };
        triangles.push([p1, p2, p3]);
        triangles.push([p2, p4, p3]);
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }

    /// Finish the mesh with one submesh per non-empty lane, primary first
    pub fn finish(self, primary: Material, secondary: Material) -> MeshBuffer {
        let mut mesh = self.mesh;
        mesh.push_submesh(self.primary, primary);
        mesh.push_submesh(self.secondary, secondary);
        mesh
    }
}
