//! Geographic primitives and the map-center resolver.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and within [-90, 90] / [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Which input won the precedence race for the map center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationSource {
    Gps,
    Home,
    Default,
}

impl LocationSource {
    pub fn label(&self) -> &'static str {
        match self {
            LocationSource::Gps => "gps",
            LocationSource::Home => "home",
            LocationSource::Default => "default",
        }
    }
}

/// The single authoritative map-center coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolved {
    pub coordinate: Coordinate,
    pub source: LocationSource,
}

/// Pick the map center: live fix, then stored home address, then the
/// configured default. Invalid coordinates count as absent, so a garbage
/// fix can never capture the map. Never returns an absent value: the
/// default is validated when configuration is parsed.
pub fn resolve(gps: Option<Coordinate>, home: Option<Coordinate>, default: Coordinate) -> Resolved {
    debug_assert!(default.is_valid(), "default center validated at startup");
    if let Some(fix) = gps.filter(Coordinate::is_valid) {
        return Resolved {
            coordinate: fix,
            source: LocationSource::Gps,
        };
    }
    if let Some(home) = home.filter(Coordinate::is_valid) {
        return Resolved {
            coordinate: home,
            source: LocationSource::Home,
        };
    }
    Resolved {
        coordinate: default,
        source: LocationSource::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELHI: Coordinate = Coordinate::new(28.6139, 77.2090);
    const NYC: Coordinate = Coordinate::new(40.71, -74.00);
    const BENGALURU: Coordinate = Coordinate::new(12.9, 77.6);

    #[test]
    fn gps_wins_over_everything() {
        let resolved = resolve(Some(BENGALURU), Some(NYC), DELHI);
        assert_eq!(resolved.coordinate, BENGALURU);
        assert_eq!(resolved.source, LocationSource::Gps);
    }

    #[test]
    fn home_wins_when_gps_absent() {
        let resolved = resolve(None, Some(NYC), DELHI);
        assert_eq!(resolved.coordinate, NYC);
        assert_eq!(resolved.source, LocationSource::Home);
    }

    #[test]
    fn default_when_both_absent() {
        let resolved = resolve(None, None, DELHI);
        assert_eq!(resolved.coordinate, DELHI);
        assert_eq!(resolved.source, LocationSource::Default);
    }

    #[test]
    fn invalid_gps_counts_as_absent() {
        let junk = Coordinate::new(f64::NAN, 200.0);
        let resolved = resolve(Some(junk), Some(NYC), DELHI);
        assert_eq!(resolved.source, LocationSource::Home);

        let out_of_range = Coordinate::new(91.0, 0.0);
        let resolved = resolve(Some(out_of_range), None, DELHI);
        assert_eq!(resolved.source, LocationSource::Default);
    }

    #[test]
    fn invalid_home_falls_to_default() {
        let junk = Coordinate::new(0.0, -181.0);
        let resolved = resolve(None, Some(junk), DELHI);
        assert_eq!(resolved.source, LocationSource::Default);
    }

    #[test]
    fn validity_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.0001, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }
}
