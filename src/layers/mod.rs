pub mod buildings;
pub mod parks;
pub mod roads;
pub mod rooftops;
pub mod waterways;

use tracing::{debug, warn};

use crate::config::{FileConfig, dimensions};
use crate::domain::Way;
use crate::ground::GroundQuery;
use crate::mesh::{Footprint, Layer, RibbonWidths, Scene};
use crate::osm::OsmData;
use crate::stitch::{StitchSelection, stitch_ways};

pub use buildings::generate_building_objects;
pub use parks::generate_park_objects;
pub use roads::generate_road_objects;
pub use rooftops::generate_rooftop_objects;
pub use waterways::generate_waterway_objects;

/// Layer names, in scene order
pub mod names {
    pub const ROADS: &str = "Roads";
    pub const FOOTWAYS: &str = "Footways";
    pub const WATERWAYS: &str = "Waterways";
    pub const BUILDINGS: &str = "Buildings";
    pub const ROOFTOPS: &str = "Rooftops";
    pub const ENVIRONMENT: &str = "Environment";
}

/// Which layers to generate and how
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub widths: RibbonWidths,
    /// Roof apex height above the wall top
    pub rooftop_height: f32,
    /// Stitch footways into the road network instead of separately
    pub combine_footways: bool,
    pub roads: bool,
    pub waterways: bool,
    pub buildings: bool,
    pub parks: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            widths: RibbonWidths::default(),
            rooftop_height: dimensions::DEFAULT_ROOFTOP_HEIGHT,
            combine_footways: false,
            roads: true,
            waterways: false,
            buildings: true,
            parks: true,
        }
    }
}

impl SceneConfig {
    /// Build a scene config from a loaded config file
    pub fn from_file(file: &FileConfig) -> Self {
        Self::default()
            .with_rooftop_height(file.rooftop_height)
            .with_river_width(file.river_width)
            .with_stream_width(file.stream_width)
            .with_combined_footways(file.combine_footways)
            .with_waterways(file.waterways)
            .with_roads(file.roads)
            .with_buildings(file.buildings)
            .with_parks(file.parks)
    }

    pub fn with_rooftop_height(mut self, height: f32) -> Self {
        self.rooftop_height = height;
        self
    }

    /// Set the river half-width
    pub fn with_river_width(mut self, half_width: f32) -> Self {
        self.widths.river = half_width;
        self
    }

    /// Set the stream half-width
    pub fn with_stream_width(mut self, half_width: f32) -> Self {
        self.widths.stream = half_width;
        self
    }

    pub fn with_combined_footways(mut self, combine: bool) -> Self {
        self.combine_footways = combine;
        self
    }

    pub fn with_roads(mut self, enabled: bool) -> Self {
        self.roads = enabled;
        self
    }

    pub fn with_waterways(mut self, enabled: bool) -> Self {
        self.waterways = enabled;
        self
    }

    pub fn with_buildings(mut self, enabled: bool) -> Self {
        self.buildings = enabled;
        self
    }

    pub fn with_parks(mut self, enabled: bool) -> Self {
        self.parks = enabled;
        self
    }
}

/// Generate every enabled layer from a parsed extract
///
/// Layers appear in the order Roads, Footways, Waterways, Buildings,
/// Rooftops, Environment. With combined footways the Roads layer carries
/// both categories and there is no separate Footways layer.
///
/// # Arguments
/// * `data` - Parsed extract
/// * `config` - Layer selection and dimensions
/// * `ground` - Terrain query used to seat every object
pub fn generate_scene(data: &OsmData, config: &SceneConfig, ground: &dyn GroundQuery) -> Scene {
    let mut layers = Vec::new();

    if config.roads {
        if config.combine_footways {
            let streets = stitch(data, StitchSelection::RoadsAndFootways);
            layers.push(Layer::new(
                names::ROADS,
                generate_road_objects(&streets, &config.widths, ground),
            ));
        } else {
            let roads = stitch(data, StitchSelection::Roads);
            layers.push(Layer::new(
                names::ROADS,
                generate_road_objects(&roads, &config.widths, ground),
            ));
            let footways = stitch(data, StitchSelection::Footways);
            layers.push(Layer::new(
                names::FOOTWAYS,
                generate_road_objects(&footways, &config.widths, ground),
            ));
        }
    }

    if config.waterways {
        let mut objects = Vec::new();
        for selection in [StitchSelection::Rivers, StitchSelection::Streams] {
            let chains = stitch(data, selection);
            objects.extend(generate_waterway_objects(&chains, &config.widths, ground));
        }
        layers.push(Layer::new(names::WATERWAYS, objects));
    }

    if config.buildings {
        layers.push(Layer::new(
            names::BUILDINGS,
            generate_building_objects(data, ground),
        ));
        layers.push(Layer::new(
            names::ROOFTOPS,
            generate_rooftop_objects(data, config.rooftop_height, ground),
        ));
    }

    if config.parks {
        layers.push(Layer::new(
            names::ENVIRONMENT,
            generate_park_objects(data, ground),
        ));
    }

    for layer in &layers {
        debug!(
            "Layer {}: {} objects, {} triangles",
            layer.name,
            layer.objects.len(),
            layer.triangle_count()
        );
    }

    Scene { layers }
}

fn stitch(data: &OsmData, selection: StitchSelection) -> Vec<crate::stitch::Street> {
    stitch_ways(&data.ways, &data.nodes, data.center, selection)
}

/// Resolve a way's outline, skipping it with a warning on dangling refs
///
/// Open outlines are still built; their last edge is simply missing.
fn resolve_footprint(way: &Way, data: &OsmData) -> Option<Footprint> {
    if !way.is_closed() {
        debug!("Way {} has an open outline", way.id);
    }
    match data.nodes.resolve(way.id, &way.node_refs) {
        Ok(points) => Some(Footprint::new(&points, data.center)),
        Err(e) => {
            warn!("Skipping way {}: {}", way.id, e);
            None
        }
    }
}
