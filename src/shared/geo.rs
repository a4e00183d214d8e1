use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from(value: (f64, f64)) -> Self {
        Self {
            latitude: value.0,
            longitude: value.1,
        }
    }
}

impl Coordinate {
    /// Great-circle distance to another coordinate in kilometers.
    pub fn distance_km(&self, coord: &Self) -> f64 {
        const R: f64 = 6371.0;
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::sin(dist_lon / 2.0)
                * f64::sin(dist_lon / 2.0);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        R * c
    }

    pub fn distance_m(&self, coord: &Self) -> f64 {
        self.distance_km(coord) * 1000.0
    }
}

#[test]
fn distance_test() {
    let coord_a = Coordinate {
        latitude: 48.85800943005911,
        longitude: 2.3514350059357927,
    };

    let coord_b = Coordinate {
        latitude: 51.5052389927712,
        longitude: -0.12495407345099824,
    };
    let d = coord_a.distance_km(&coord_b);
    assert!((d - 343.5).abs() < 1.0);
}

#[test]
fn distance_zero_test() {
    let coord = Coordinate {
        latitude: 59.370_136,
        longitude: 18.001_749,
    };
    assert_eq!(coord.distance_m(&coord), 0.0);
}

#[test]
fn distance_symmetry_test() {
    let coord_a = Coordinate {
        latitude: 59.370_136,
        longitude: 18.001_749,
    };
    let coord_b = Coordinate {
        latitude: 59.335_34,
        longitude: 18.057_737,
    };
    let forward = coord_a.distance_m(&coord_b);
    let backward = coord_b.distance_m(&coord_a);
    assert!((forward - backward).abs() < 1e-9);
}
