use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::GeoError;

/// Used whenever the device position cannot be acquired.
pub const FALLBACK_POSITION: GeoPosition = GeoPosition {
    latitude: 28.6139,
    longitude: 77.2090,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::OutOfRange {
                axis: "latitude",
                value: latitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::OutOfRange {
                axis: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses `"lat, lng"` in decimal degrees.
    pub fn from_coordinates(coordinates: &str) -> Result<Self, GeoError> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(GeoError::Malformed(coordinates.to_string()));
        }
        let lat = parts[0]
            .parse()
            .map_err(|_| GeoError::Malformed(coordinates.to_string()))?;
        let lng = parts[1]
            .parse()
            .map_err(|_| GeoError::Malformed(coordinates.to_string()))?;
        Self::new(lat, lng)
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°N / {:.4}°E", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_pair() {
        let pos = GeoPosition::from_coordinates(" 51.5, -0.12 ").unwrap();
        assert_eq!(pos.latitude, 51.5);
        assert_eq!(pos.longitude, -0.12);
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(matches!(
            GeoPosition::new(91.0, 0.0),
            Err(GeoError::OutOfRange { axis: "latitude", .. })
        ));
        assert!(matches!(
            GeoPosition::new(0.0, -180.5),
            Err(GeoError::OutOfRange { axis: "longitude", .. })
        ));
        assert!(GeoPosition::new(f64::NAN, 0.0).is_err());
        assert!(matches!(
            GeoPosition::from_coordinates("north"),
            Err(GeoError::Malformed(_))
        ));
    }

    #[test]
    fn pill_text_uses_four_decimals() {
        assert_eq!(FALLBACK_POSITION.to_string(), "28.6139°N / 77.2090°E");
    }
}
