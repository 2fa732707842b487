use crate::distance::DistanceError;
use crate::stations::error::CatalogError;
use crate::weather_data::error::WeatherDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GhcndError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Distance(#[from] DistanceError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Station '{0}' is not present in the catalog")]
    UnknownStation(String),

    #[error("Station catalog has not been loaded")]
    CatalogNotLoaded,
}

/// Coarse fault classification for transport layers mapping errors onto
/// responses: invalid request parameters become a client error, an unknown
/// station a not-found, an exceeded fetch bound a gateway timeout, and
/// everything else a generic server error whose message stays available for
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    InvalidRequest,
    NotFound,
    Timeout,
    Internal,
}

impl GhcndError {
    pub fn fault_class(&self) -> FaultClass {
        match self {
            GhcndError::InvalidRequest(_) => FaultClass::InvalidRequest,
            GhcndError::UnknownStation(_) => FaultClass::NotFound,
            GhcndError::WeatherData(WeatherDataError::Timeout { .. }) => FaultClass::Timeout,
            _ => FaultClass::Internal,
        }
    }
}
