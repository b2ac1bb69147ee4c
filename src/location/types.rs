use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Result of a single location query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationOutcome {
    Success(Coordinate),
    /// The host refused location access before the platform was queried.
    PermissionDenied,
    /// No fix was available, or the platform reported a failure.
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display_rounds_to_four_places() {
        let coordinate = Coordinate::new(37.566_535, 126.977_969);
        assert_eq!(coordinate.to_string(), "37.5665, 126.9780");
    }

    #[test]
    fn test_coordinate_deserializes_from_toml() {
        let coordinate: Coordinate = toml::from_str("latitude = 35.1\nlongitude = 129.04").unwrap();
        assert_eq!(coordinate, Coordinate::new(35.1, 129.04));
    }
}
