//! Filters the station catalog by proximity and temporal coverage.

use crate::distance::{haversine, DistanceError};
use crate::stations::catalog::StationCatalog;
use crate::stations::station::Station;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A station that survived the search filters, annotated with its distance
/// from the reference coordinate in kilometers, rounded to two decimals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationMatch {
    #[serde(flatten)]
    pub station: Station,
    pub distance: f64,
}

/// Scans the whole catalog and keeps stations that lie within `radius_km` of
/// the reference coordinate *and* whose common availability fully contains
/// the requested year window. Survivors are sorted ascending by distance and
/// capped at `max_results`; an empty result is an ordinary outcome.
///
/// # Errors
///
/// Propagates a [`DistanceError`] if the distance formula is handed
/// non-finite input.
pub fn filter_stations(
    catalog: &StationCatalog,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
    max_results: usize,
    requested_start_year: i32,
    requested_end_year: i32,
) -> Result<Vec<StationMatch>, DistanceError> {
    let mut results = Vec::new();

    for station in catalog.stations() {
        let distance = haversine(latitude, longitude, station.latitude, station.longitude)?;
        if distance > radius_km {
            continue;
        }
        if !station
            .data_availability
            .covers(requested_start_year, requested_end_year)
        {
            continue;
        }
        results.push(StationMatch {
            station: station.clone(),
            distance: (distance * 100.0).round() / 100.0,
        });
    }

    results.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    results.truncate(max_results);
    Ok(results)
}
