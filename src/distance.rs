//! Great-circle distance between two coordinates via the haversine formula.

use thiserror::Error;

/// Mean Earth radius in kilometers, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DistanceError {
    #[error("Coordinates must be finite numbers, got ({latitude}, {longitude})")]
    NonFiniteCoordinate { latitude: f64, longitude: f64 },
}

/// Computes the great-circle distance in kilometers between two points given
/// as (latitude, longitude) pairs in decimal degrees.
///
/// Returns 0 for coincident points and is symmetric in its arguments.
///
/// # Errors
///
/// Returns [`DistanceError::NonFiniteCoordinate`] if any input is NaN or
/// infinite, so callers see a uniform error instead of NaN propagating
/// through the formula.
///
/// # Examples
///
/// ```
/// use ghcnd::haversine;
///
/// let berlin = (52.5200, 13.4050);
/// let hamburg = (53.5511, 9.9937);
/// let d = haversine(berlin.0, berlin.1, hamburg.0, hamburg.1).unwrap();
/// assert!((d - 255.0).abs() < 5.0);
/// ```
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64, DistanceError> {
    for &(latitude, longitude) in &[(lat1, lon1), (lat2, lon2)] {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(DistanceError::NonFiniteCoordinate {
                latitude,
                longitude,
            });
        }
    }

    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Ok(EARTH_RADIUS_KM * c)
}
