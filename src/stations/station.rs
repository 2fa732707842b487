//! Data structures describing a GHCN-Daily weather station: identifier,
//! location, derived hemisphere, and the common TMIN/TMAX data availability
//! computed from the inventory file.

use serde::{Deserialize, Serialize};

/// A single GHCN-Daily weather station and its associated metadata.
///
/// Instances are created once while building the [`StationCatalog`] from the
/// station list file and are treated as immutable afterwards; a catalog
/// reload replaces them wholesale.
///
/// [`StationCatalog`]: crate::StationCatalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    /// The unique GHCN station identifier (e.g., "GME00129502").
    pub station_id: String,
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub longitude: f64,
    /// The station name as listed in the station reference file.
    pub name: String,
    /// Hemisphere derived from the latitude sign.
    pub hemisphere: Hemisphere,
    /// The year range for which both TMIN and TMAX observations exist.
    pub data_availability: DataAvailability,
}

/// Coarse hemisphere classification of a station, derived from the sign of
/// its latitude. Determines which months map to which meteorological season.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
}

impl Hemisphere {
    /// A latitude of exactly 0 counts as northern.
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }
}

/// The *common* availability period of a station: the range of years during
/// which both minimum and maximum temperature were recorded.
///
/// Either both fields are set or both are unset. A station whose inventory
/// lacks one of the two temperature elements, or whose combined range is
/// inverted, has no availability.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataAvailability {
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

impl DataAvailability {
    /// Whether the station's coverage fully contains the requested year
    /// window. A partial or absent range never covers anything.
    pub fn covers(&self, requested_start_year: i32, requested_end_year: i32) -> bool {
        match (self.first_year, self.last_year) {
            (Some(first), Some(last)) => {
                first <= requested_start_year && last >= requested_end_year
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hemisphere_from_latitude_sign() {
        assert_eq!(Hemisphere::from_latitude(48.0458), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(0.0), Hemisphere::North);
        assert_eq!(Hemisphere::from_latitude(-33.8688), Hemisphere::South);
    }

    #[test]
    fn hemisphere_serializes_as_single_letter() {
        assert_eq!(
            serde_json::to_string(&Hemisphere::North).unwrap(),
            "\"N\""
        );
        assert_eq!(
            serde_json::to_string(&Hemisphere::South).unwrap(),
            "\"S\""
        );
    }

    #[test]
    fn coverage_requires_full_containment() {
        let availability = DataAvailability {
            first_year: Some(1950),
            last_year: Some(2000),
        };
        assert!(availability.covers(1950, 2000));
        assert!(availability.covers(1960, 1990));
        assert!(!availability.covers(1949, 2000));
        assert!(!availability.covers(1950, 2001));
    }

    #[test]
    fn partial_or_absent_range_never_covers() {
        let partial = DataAvailability {
            first_year: Some(1950),
            last_year: None,
        };
        assert!(!partial.covers(1960, 1990));
        assert!(!DataAvailability::default().covers(1960, 1990));
    }
}
