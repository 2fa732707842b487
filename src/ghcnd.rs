//! The main entry point for station discovery and temperature-trend analysis
//! over the GHCN-Daily dataset. Construction builds the station catalog from
//! the two reference files; analysis fetches a station's daily observation
//! file on demand and aggregates it.

use crate::error::GhcndError;
use crate::stations::cache::CatalogCache;
use crate::stations::catalog::StationCatalog;
use crate::stations::search::{filter_stations, StationMatch};
use crate::weather_data::analyze_daily_file;
use crate::weather_data::fetcher::{DlyFetcher, DEFAULT_BASE_URL, DEFAULT_FETCH_TIMEOUT};
use crate::weather_data::response::AnalysisResponse;
use bon::{bon, Builder};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// A geographical coordinate as (latitude, longitude) in decimal degrees.
///
/// # Examples
///
/// ```
/// use ghcnd::LatLon;
///
/// let villingen = LatLon(48.0458, 8.4617);
/// assert_eq!(villingen.0, 48.0458); // Latitude
/// assert_eq!(villingen.1, 8.4617); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Configuration for a [`Ghcnd`] client.
///
/// The two reference file paths are required; the fetch endpoint and timeout
/// default to the NOAA archive and a 5 second bound.
///
/// # Examples
///
/// ```
/// use ghcnd::GhcndConfig;
///
/// let config = GhcndConfig::builder()
///     .stations_file("data/ghcnd-stations.csv")
///     .inventory_file("data/ghcnd-inventory.txt")
///     .build();
/// ```
#[derive(Debug, Clone, Builder)]
pub struct GhcndConfig {
    /// Path to the comma-delimited station list file.
    #[builder(into)]
    pub stations_file: PathBuf,
    /// Path to the fixed-width per-element inventory file.
    #[builder(into)]
    pub inventory_file: PathBuf,
    /// Base URL under which `<station_id>.dly` files live.
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// Bound on a single daily-file download.
    #[builder(default = DEFAULT_FETCH_TIMEOUT)]
    pub fetch_timeout: Duration,
}

/// The client for GHCN-Daily station search and temperature analysis.
///
/// Holds the process-wide station catalog (built eagerly at construction,
/// replaceable wholesale via [`Ghcnd::reload_catalog`]) and the downloader
/// for per-station daily observation files.
///
/// # Examples
///
/// ```no_run
/// use ghcnd::{Ghcnd, GhcndConfig, GhcndError, LatLon};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), GhcndError> {
/// let config = GhcndConfig::builder()
///     .stations_file("data/ghcnd-stations.csv")
///     .inventory_file("data/ghcnd-inventory.txt")
///     .build();
/// let client = Ghcnd::new(config).await?;
///
/// let nearby = client
///     .search_stations()
///     .location(LatLon(48.0458, 8.4617))
///     .radius_km(50.0)
///     .max_results(10)
///     .start_year(1991)
///     .end_year(2000)
///     .call()
///     .await?;
/// println!("Found {} stations", nearby.len());
/// # Ok(())
/// # }
/// ```
pub struct Ghcnd {
    catalog: CatalogCache,
    fetcher: DlyFetcher,
    config: GhcndConfig,
}

#[bon]
impl Ghcnd {
    /// Creates a client and builds the station catalog from the configured
    /// reference files.
    ///
    /// # Errors
    ///
    /// Returns [`GhcndError::Catalog`] if either reference file is absent or
    /// malformed; the client is not handed out with a partial catalog.
    pub async fn new(config: GhcndConfig) -> Result<Self, GhcndError> {
        let client = Self {
            catalog: CatalogCache::new(),
            fetcher: DlyFetcher::new(config.base_url.clone(), config.fetch_timeout),
            config,
        };
        client.reload_catalog().await?;
        Ok(client)
    }

    /// Rebuilds the station catalog from the reference files and swaps it in
    /// atomically. A failed rebuild leaves the previous catalog in place.
    pub async fn reload_catalog(&self) -> Result<(), GhcndError> {
        let catalog =
            StationCatalog::load(&self.config.stations_file, &self.config.inventory_file).await?;
        self.catalog.replace(catalog).await;
        Ok(())
    }

    /// Searches for stations near a coordinate whose common TMIN/TMAX
    /// availability fully contains the requested year window.
    ///
    /// This method uses a builder pattern; all parameters are required:
    ///
    /// * `.location(LatLon)`: the reference coordinate.
    /// * `.radius_km(f64)`: inclusive search radius in kilometers.
    /// * `.max_results(usize)`: positive cap on the number of results.
    /// * `.start_year(i32)` / `.end_year(i32)`: the coverage window the
    ///   station's availability must contain.
    ///
    /// Results are sorted ascending by distance; an empty list is an
    /// ordinary outcome.
    ///
    /// # Errors
    ///
    /// Returns [`GhcndError::InvalidRequest`] for out-of-range or
    /// non-finite parameters, and [`GhcndError::CatalogNotLoaded`] when the
    /// catalog holds no stations.
    #[builder]
    pub async fn search_stations(
        &self,
        location: LatLon,
        radius_km: f64,
        max_results: usize,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<StationMatch>, GhcndError> {
        let LatLon(latitude, longitude) = location;
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(GhcndError::InvalidRequest(format!(
                "latitude {latitude} is not a valid coordinate"
            )));
        }
        if !longitude.is_finite() || longitude.abs() > 180.0 {
            return Err(GhcndError::InvalidRequest(format!(
                "longitude {longitude} is not a valid coordinate"
            )));
        }
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(GhcndError::InvalidRequest(format!(
                "radius {radius_km} must be a non-negative number of kilometers"
            )));
        }
        if max_results == 0 {
            return Err(GhcndError::InvalidRequest(
                "max_results must be positive".to_string(),
            ));
        }
        if start_year > end_year {
            return Err(GhcndError::InvalidRequest(format!(
                "start_year {start_year} is after end_year {end_year}"
            )));
        }

        let catalog = self.loaded_catalog().await?;
        filter_stations(
            &catalog,
            latitude,
            longitude,
            radius_km,
            max_results,
            start_year,
            end_year,
        )
        .map_err(GhcndError::from)
    }

    /// Computes annual and seasonal temperature means for one station over
    /// `[start_year, end_year]`.
    ///
    /// This method uses a builder pattern; all parameters are required:
    ///
    /// * `.station_id(&str)`: the GHCN station identifier.
    /// * `.start_year(i32)` / `.end_year(i32)`: the analysis window.
    ///
    /// The station must be present in the catalog (its hemisphere drives the
    /// season mapping). The raw daily file is fetched within the configured
    /// time bound, then parsed and aggregated.
    ///
    /// # Errors
    ///
    /// Returns [`GhcndError::InvalidRequest`] for a blank station id or an
    /// inverted year window, [`GhcndError::UnknownStation`] when the catalog
    /// has no such station, and [`GhcndError::WeatherData`] for download or
    /// aggregation faults — including the dedicated timeout variant when the
    /// fetch bound is exceeded.
    #[builder]
    pub async fn station_analysis(
        &self,
        station_id: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<AnalysisResponse, GhcndError> {
        let station_id = station_id.trim();
        if station_id.is_empty() {
            return Err(GhcndError::InvalidRequest(
                "station_id must not be empty".to_string(),
            ));
        }
        if start_year > end_year {
            return Err(GhcndError::InvalidRequest(format!(
                "start_year {start_year} is after end_year {end_year}"
            )));
        }

        let catalog = self.loaded_catalog().await?;
        let station = catalog
            .get(station_id)
            .ok_or_else(|| GhcndError::UnknownStation(station_id.to_string()))?;
        let hemisphere = station.hemisphere;

        let content = self.fetcher.fetch_daily_file(station_id).await?;
        analyze_daily_file(&content, hemisphere, start_year, end_year).map_err(GhcndError::from)
    }

    async fn loaded_catalog(&self) -> Result<Arc<StationCatalog>, GhcndError> {
        match self.catalog.snapshot().await {
            Some(catalog) if !catalog.is_empty() => Ok(catalog),
            _ => Err(GhcndError::CatalogNotLoaded),
        }
    }
}
