use glam::DVec2;

use super::projection::Mercator;

/// Bounding box in projected coordinates (meters)
#[derive(Debug, Clone)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from a lat/lon box, as found in an OSM `<bounds>` element
    pub fn from_lat_lon(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        let (x0, y0) = Mercator::project(min_lat, min_lon);
        let (x1, y1) = Mercator::project(max_lat, max_lon);
        Self {
            min_x: x0.min(x1),
            max_x: x0.max(x1),
            min_y: y0.min(y1),
            max_y: y0.max(y1),
        }
    }

    /// Create bounds from a set of projected points
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut points = points.into_iter();
        let (x, y) = points.next()?;
        let mut bounds = Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        };

        for (x, y) in points {
            bounds.min_x = bounds.min_x.min(x);
            bounds.max_x = bounds.max_x.max(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_y = bounds.max_y.max(y);
        }

        Some(bounds)
    }

    /// Planar center, kept in f64 until coordinates are made relative to it
    pub fn center(&self) -> DVec2 {
        DVec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}
