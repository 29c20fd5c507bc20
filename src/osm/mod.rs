pub mod height;
pub mod parser;

use glam::{DVec2, Vec2};

use crate::domain::{NodeLookup, Way};

pub use height::parse_height;
pub use parser::{load_osm, parse_osm};

/// Records read from one OSM extract
///
/// Node positions are projected meters relative to `origin`, so they stay
/// precise in f32. `center` is the point every generated coordinate is
/// made relative to, expressed in that same frame.
#[derive(Debug, Clone, Default)]
pub struct OsmData {
    /// Absolute projected position of the node frame's zero
    pub origin: DVec2,
    pub center: Vec2,
    pub nodes: NodeLookup,
    pub ways: Vec<Way>,
}

impl OsmData {
    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
