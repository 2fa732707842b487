mod distance;
mod error;
mod ghcnd;
mod stations;
mod weather_data;

pub use error::{FaultClass, GhcndError};
pub use ghcnd::*;

pub use distance::{haversine, DistanceError, EARTH_RADIUS_KM};

pub use stations::cache::CatalogCache;
pub use stations::catalog::StationCatalog;
pub use stations::error::CatalogError;
pub use stations::search::StationMatch;
pub use stations::station::{DataAvailability, Hemisphere, Station};

pub use weather_data::aggregate::{AnnualMeans, Season, SeasonalMeans};
pub use weather_data::analyze_daily_file;
pub use weather_data::error::WeatherDataError;
pub use weather_data::fetcher::{DlyFetcher, DEFAULT_BASE_URL, DEFAULT_FETCH_TIMEOUT};
pub use weather_data::parser::{parse_daily_file, DailyRecord, Element};
pub use weather_data::response::{AnalysisResponse, MeanPair, SeasonMeans, YearlyMeans};
