/// Spherical (web) Mercator projection from WGS84 to planar meters
///
/// - x = R * lon
/// - y = R * ln(tan(pi/4 + lat/2))
///
/// Distances are exact at the equator and stretch by 1/cos(lat) elsewhere,
/// which is acceptable for the city-scale extracts this tool imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mercator;

/// Earth radius used by the projection, in meters
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude limit of the projection; the poles map to infinity
const MAX_LATITUDE: f64 = 85.051_128_78;

impl Mercator {
    /// Project longitude to planar x in meters
    pub fn lon_to_x(lon: f64) -> f64 {
        EARTH_RADIUS * lon.to_radians()
    }

    /// Project latitude to planar y in meters
    pub fn lat_to_y(lat: f64) -> f64 {
        let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln()
    }

    /// Project a lat/lon point
    ///
    /// # Returns
    /// * (x, y) in meters
    pub fn project(lat: f64, lon: f64) -> (f64, f64) {
        (Self::lon_to_x(lon), Self::lat_to_y(lat))
    }
}
