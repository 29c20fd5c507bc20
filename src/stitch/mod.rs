//! Reassembly of fragmented OSM ways into continuous street chains.
//!
//! OSM splits a single street into many ways (at every tag change, bridge,
//! bus route boundary, ...). Ways that share an endpoint node are joined
//! back together here so the ribbon builder can miter across the seams.

pub mod street;

use glam::Vec2;
use tracing::{debug, warn};

use crate::domain::{Category, NodeLookup, Way};

pub use street::{Fragment, Street, StreetNode};

/// Streets with fewer nodes are unconnected leftovers and are dropped
pub const MIN_STREET_NODES: usize = 3;

/// Which ways take part in a stitch run, and the category they get
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StitchSelection {
    /// Drivable highways only
    Roads,
    /// Footways and pedestrian areas only
    Footways,
    /// Roads and footways together, so footway stretches join their road
    RoadsAndFootways,
    Rivers,
    Streams,
}

impl StitchSelection {
    /// Category of `way` under this selection, or None if it is not selected
    pub fn category_of(self, way: &Way) -> Option<Category> {
        if way.node_refs.len() < 2 {
            return None;
        }
        let f = way.flags;
        match self {
            StitchSelection::Roads => (f.highway && !f.footway).then_some(Category::Road),
            StitchSelection::Footways => f.footway.then_some(Category::Footway),
            StitchSelection::RoadsAndFootways => match (f.highway, f.footway) {
                (_, true) => Some(Category::Footway),
                (true, false) => Some(Category::Road),
                (false, false) => None,
            },
            StitchSelection::Rivers => f.waterway.then_some(Category::River),
            StitchSelection::Streams => f.stream.then_some(Category::Stream),
        }
    }
}

/// Resolve every selected way into a worklist fragment
///
/// Ways with dangling node references are skipped with a warning.
pub fn collect_fragments(
    ways: &[Way],
    lookup: &NodeLookup,
    center: Vec2,
    selection: StitchSelection,
) -> Vec<Fragment> {
    ways.iter()
        .filter_map(|way| {
            let category = selection.category_of(way)?;
            match Fragment::from_way(way, category, lookup, center) {
                Ok(fragment) => Some(fragment),
                Err(e) => {
                    warn!("Skipping way {}: {}", way.id, e);
                    None
                }
            }
        })
        .collect()
}

/// Greedily join fragments into streets
///
/// Each street starts from the last fragment of the worklist and absorbs
/// any fragment sharing one of its endpoints, scanning the worklist from
/// back to front and restarting at the back after every merge, until a
/// full scan merges nothing. Where three or more ways meet at one node the
/// scan order decides which two are joined.
pub fn stitch_fragments(mut queue: Vec<Fragment>) -> Vec<Street> {
    let mut streets = Vec::new();

    while !queue.is_empty() {
        let mut street = Street::default();
        let mut i = queue.len();
        while i > 0 {
            i -= 1;
            if street.stitch(&queue[i]) {
                queue.remove(i);
                i = queue.len();
            }
        }

        if street.len() >= MIN_STREET_NODES {
            streets.push(street);
        } else {
            debug!(
                "Dropping unconnected fragment of {} nodes (ways {:?})",
                street.len(),
                street.way_ids
            );
        }
    }

    streets
}

/// Select, resolve and stitch ways in one step
pub fn stitch_ways(
    ways: &[Way],
    lookup: &NodeLookup,
    center: Vec2,
    selection: StitchSelection,
) -> Vec<Street> {
    let fragments = collect_fragments(ways, lookup, center, selection);
    let count = fragments.len();
    let streets = stitch_fragments(fragments);
    debug!(
        "Stitched {} {:?} ways into {} streets",
        count,
        selection,
        streets.len()
    );
    streets
}
