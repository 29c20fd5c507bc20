use crate::mesh::Material;

/// Feature flags derived from a way's OSM tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WayFlags {
    pub building: bool,
    pub highway: bool,
    pub footway: bool,
    pub park: bool,
    pub waterway: bool,
    pub stream: bool,
}

impl WayFlags {
    /// Fold one OSM tag into the flags
    ///
    /// `highway` values that are not drivable (paths, footways, bus stops)
    /// do not count as highway; `footway` and `pedestrian` count as footway.
    pub fn apply_tag(&mut self, key: &str, value: &str) {
        match key {
            "building" => self.building = true,
            "highway" => {
                if !matches!(
                    value,
                    "bus_stop" | "foot" | "footway" | "path" | "pedestrian"
                ) {
                    self.highway = true;
                }
                if matches!(value, "footway" | "pedestrian") {
                    self.footway = true;
                }
            }
            "leisure" if value == "park" => self.park = true,
            "waterway" => match value {
                "river" => self.waterway = true,
                "stream" => self.stream = true,
                _ => {}
            },
            _ => {}
        }
    }
}

/// An OSM way: an ordered list of node references plus its tags
#[derive(Debug, Clone, PartialEq)]
pub struct Way {
    pub id: u64,
    pub name: String,
    pub node_refs: Vec<u64>,
    pub height: f32,
    pub flags: WayFlags,
}

impl Way {
    /// A closed way starts and ends on the same node
    pub fn is_closed(&self) -> bool {
        self.node_refs.len() > 2 && self.node_refs.first() == self.node_refs.last()
    }
}

/// Width class of a ribbon lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Primary,
    Secondary,
}

/// Category of a stitched chain node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Road,
    Footway,
    River,
    Stream,
}

impl Category {
    pub fn lane(self) -> Lane {
        match self {
            Category::Road | Category::River => Lane::Primary,
            Category::Footway | Category::Stream => Lane::Secondary,
        }
    }

    pub fn material(self) -> Material {
        match self {
            Category::Road => Material::Road,
            Category::Footway => Material::Footway,
            Category::River | Category::Stream => Material::Water,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(tags: &[(&str, &str)]) -> WayFlags {
        let mut flags = WayFlags::default();
        for (k, v) in tags {
            flags.apply_tag(k, v);
        }
        flags
    }

    #[test]
    fn test_highway_classification() {
        let primary = flags(&[("highway", "primary")]);
        assert!(primary.highway);
        assert!(!primary.footway);

        let footway = flags(&[("highway", "footway")]);
        assert!(!footway.highway);
        assert!(footway.footway);

        let pedestrian = flags(&[("highway", "pedestrian")]);
        assert!(!pedestrian.highway);
        assert!(pedestrian.footway);

        let path = flags(&[("highway", "path")]);
        assert!(!path.highway);
        assert!(!path.footway);
    }

    #[test]
    fn test_area_and_water_tags() {
        let f = flags(&[("building", "yes"), ("leisure", "park")]);
        assert!(f.building);
        assert!(f.park);

        assert!(flags(&[("waterway", "river")]).waterway);
        assert!(flags(&[("waterway", "stream")]).stream);
        assert_eq!(flags(&[("waterway", "canal")]), WayFlags::default());
        assert_eq!(flags(&[("leisure", "pitch")]), WayFlags::default());
    }

    #[test]
    fn test_closed_way() {
        let mut way = Way {
            id: 1,
            name: String::new(),
            node_refs: vec![1, 2, 3, 1],
            height: 0.0,
            flags: WayFlags::default(),
        };
        assert!(way.is_closed());

        way.node_refs.pop();
        assert!(!way.is_closed());
    }

    #[test]
    fn test_category_lanes() {
        assert_eq!(Category::Road.lane(), Lane::Primary);
        assert_eq!(Category::Footway.lane(), Lane::Secondary);
        assert_eq!(Category::Stream.material(), Material::Water);
    }
}
