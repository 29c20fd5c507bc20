/// Degrade a free-form OSM `height` value to plain meters
///
/// Mapped values range from `"12"` over `"12 m"` to `"5'6\""` and `"10;12"`.
/// Only the plain metric forms are understood:
/// - feet/inches, lists and ranges/negative values yield 0
/// - letters and whitespace are stripped (`"12 m"` -> 12)
/// - anything else that does not parse yields 0
///
/// # Examples
/// ```
/// use osmworld::osm::parse_height;
///
/// assert_eq!(parse_height("12 m"), 12.0);
/// assert_eq!(parse_height("10;12"), 0.0);
/// ```
pub fn parse_height(value: &str) -> f32 {
    if value.contains(['\'', '"', ';', '-']) {
        return 0.0;
    }

    let digits: String = value
        .chars()
        .filter(|c| !c.is_alphabetic() && !c.is_whitespace())
        .collect();

    digits
        .parse::<f32>()
        .ok()
        .filter(|h| h.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values() {
        assert_eq!(parse_height("12"), 12.0);
        assert_eq!(parse_height("7.5"), 7.5);
        assert_eq!(parse_height(" 30 "), 30.0);
    }

    #[test]
    fn test_units_stripped() {
        assert_eq!(parse_height("12 m"), 12.0);
        assert_eq!(parse_height("12m"), 12.0);
        assert_eq!(parse_height("4.2 meters"), 4.2);
    }

    #[test]
    fn test_degraded_to_zero() {
        assert_eq!(parse_height("5'6\""), 0.0);
        assert_eq!(parse_height("10;12"), 0.0);
        assert_eq!(parse_height("-3"), 0.0);
        assert_eq!(parse_height("10-12"), 0.0);
        assert_eq!(parse_height(""), 0.0);
        assert_eq!(parse_height("tall"), 0.0);
        assert_eq!(parse_height("1,5"), 0.0);
    }
}
