use serde::Deserialize;
use std::path::PathBuf;

use crate::mesh::Material;

/// Scene dimensions in meters.
///
/// Half-widths are measured from the centerline to the ribbon edge. Ground
/// biases are added to the height returned by a ground query when an object
/// is seated on terrain:
///   Roads:     +0.05  (just above the surface to avoid z-fighting)
///   Water:     +0.035 (below roads where both overlap)
///   Green:     +0.03
///   Buildings: -0.5   (walls sink slightly into sloped terrain)
///   Rooftops:  -2.0
pub mod dimensions {
    pub const ROAD_HALF_WIDTH: f32 = 3.7;
    pub const FOOTWAY_HALF_WIDTH: f32 = 1.6;
    pub const DEFAULT_RIVER_HALF_WIDTH: f32 = 8.0;
    pub const DEFAULT_STREAM_HALF_WIDTH: f32 = 2.0;

    // Buildings without a usable height tag
    pub const DEFAULT_BUILDING_HEIGHT: f32 = 12.5;
    // Height tag values are scaled into scene units
    pub const HEIGHT_TAG_SCALE: f32 = 2.0;

    pub const DEFAULT_ROOFTOP_HEIGHT: f32 = 3.0;
    pub const ROOF_RIM_HEIGHT: f32 = 1.0;

    pub const ROAD_GROUND_BIAS: f32 = 0.05;
    pub const WATER_GROUND_BIAS: f32 = 0.035;
    pub const GREEN_GROUND_BIAS: f32 = 0.03;
    pub const BUILDING_GROUND_BIAS: f32 = -0.5;
    pub const ROOF_GROUND_BIAS: f32 = -2.0;
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Wavefront OBJ with a sibling MTL file
    #[default]
    Obj,
    /// Flattened binary STL
    Stl,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Obj => "obj",
            ExportFormat::Stl => "stl",
        }
    }
}

fn default_rooftop_height() -> f32 {
    dimensions::DEFAULT_ROOFTOP_HEIGHT
}
fn default_river_width() -> f32 {
    dimensions::DEFAULT_RIVER_HALF_WIDTH
}
fn default_stream_width() -> f32 {
    dimensions::DEFAULT_STREAM_HALF_WIDTH
}
fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default = "default_rooftop_height")]
    pub rooftop_height: f32,
    /// River half-width
    #[serde(default = "default_river_width")]
    pub river_width: f32,
    /// Stream half-width
    #[serde(default = "default_stream_width")]
    pub stream_width: f32,
    /// Flat ground height; no ground when absent
    #[serde(default)]
    pub ground_height: Option<f32>,
    #[serde(default)]
    pub combine_footways: bool,
    #[serde(default)]
    pub waterways: bool,
    #[serde(default = "default_enabled")]
    pub buildings: bool,
    #[serde(default = "default_enabled")]
    pub roads: bool,
    #[serde(default = "default_enabled")]
    pub parks: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub palette: Palette,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            output: None,
            format: ExportFormat::default(),
            rooftop_height: default_rooftop_height(),
            river_width: default_river_width(),
            stream_width: default_stream_width(),
            ground_height: None,
            combine_footways: false,
            waterways: false,
            buildings: true,
            roads: true,
            parks: true,
            verbose: false,
            palette: Palette::default(),
        }
    }
}

fn default_road_color() -> [f32; 3] {
    [0.25, 0.25, 0.27]
}
fn default_footway_color() -> [f32; 3] {
    [0.62, 0.58, 0.52]
}
fn default_building_color() -> [f32; 3] {
    [0.85, 0.82, 0.76]
}
fn default_roof_color() -> [f32; 3] {
    [0.55, 0.27, 0.22]
}
fn default_water_color() -> [f32; 3] {
    [0.20, 0.42, 0.66]
}
fn default_green_color() -> [f32; 3] {
    [0.33, 0.58, 0.28]
}

/// Diffuse RGB color per material, written to the MTL file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Palette {
    #[serde(default = "default_road_color")]
    pub road: [f32; 3],
    #[serde(default = "default_footway_color")]
    pub footway: [f32; 3],
    #[serde(default = "default_building_color")]
    pub building: [f32; 3],
    #[serde(default = "default_roof_color")]
    pub roof: [f32; 3],
    #[serde(default = "default_water_color")]
    pub water: [f32; 3],
    #[serde(default = "default_green_color")]
    pub green: [f32; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            road: default_road_color(),
            footway: default_footway_color(),
            building: default_building_color(),
            roof: default_roof_color(),
            water: default_water_color(),
            green: default_green_color(),
        }
    }
}

impl Palette {
    pub fn color(&self, material: Material) -> [f32; 3] {
        match material {
            Material::Road => self.road,
            Material::Footway => self.footway,
            Material::Building => self.building,
            Material::Roof => self.roof,
            Material::Water => self.water,
            Material::Green => self.green,
        }
    }
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file; failures are errors
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {:?}", path))
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("osmworld.toml"));
    paths.push(PathBuf::from(".osmworld.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("osmworld").join("config.toml"));
        paths.push(config_dir.join("osmworld.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".osmworld.toml"));
        paths.push(home.join(".config").join("osmworld").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.format, ExportFormat::Obj);
        assert_eq!(config.rooftop_height, dimensions::DEFAULT_ROOFTOP_HEIGHT);
        assert_eq!(config.river_width, 8.0);
        assert_eq!(config.stream_width, 2.0);
        assert!(config.buildings && config.roads && config.parks);
        assert!(!config.waterways && !config.combine_footways);
        assert_eq!(config.ground_height, None);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_partial_config() {
        let config: FileConfig = toml::from_str(
            r#"
            format = "stl"
            waterways = true
            parks = false
            ground_height = 1.5

            [palette]
            water = [0.0, 0.0, 1.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.format, ExportFormat::Stl);
        assert!(config.waterways);
        assert!(!config.parks);
        assert_eq!(config.ground_height, Some(1.5));
        assert_eq!(config.palette.color(Material::Water), [0.0, 0.0, 1.0]);
        assert_eq!(config.palette.road, default_road_color());
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::load_from(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_config_paths_prefer_local() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("osmworld.toml"));
        assert_eq!(paths[1], PathBuf::from(".osmworld.toml"));
    }
}
