use std::collections::HashMap;

use glam::{Vec2, Vec3};

use crate::error::BuildError;
use crate::geometry::lift;

/// An OSM node, already projected to planar meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: u64,
    pub position: Vec2,
}

impl Node {
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Vec2::new(x, y),
        }
    }

    /// The node as a ground-level 3D point (`y` up)
    pub fn position3(&self) -> Vec3 {
        lift(self.position, 0.0)
    }
}

/// Node lookup keyed by id
#[derive(Debug, Clone, Default)]
pub struct NodeLookup {
    nodes: HashMap<u64, Node>,
}

impl NodeLookup {
    pub fn insert(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    pub fn get(&self, id: u64) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve a way's node references to the nodes themselves
    ///
    /// A dangling reference is a data-integrity fault for the whole way.
    pub fn resolve_nodes(&self, way_id: u64, refs: &[u64]) -> Result<Vec<&Node>, BuildError> {
        refs.iter()
            .map(|&node_id| self.get(node_id).ok_or(BuildError::MissingNode { way_id, node_id }))
            .collect()
    }

    /// Resolve a way's node references to planar positions
    pub fn resolve(&self, way_id: u64, refs: &[u64]) -> Result<Vec<Vec2>, BuildError> {
        Ok(self
            .resolve_nodes(way_id, refs)?
            .into_iter()
            .map(|n| n.position)
            .collect())
    }
}

impl FromIterator<Node> for NodeLookup {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(|n| (n.id, n)).collect(),
        }
    }
}
