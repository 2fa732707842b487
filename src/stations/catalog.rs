//! Builds the in-memory station catalog from the two GHCN-Daily reference
//! files: the comma-delimited station list (`ghcnd-stations.csv`) and the
//! fixed-width per-element inventory (`ghcnd-inventory.txt`).
//!
//! The build is strict: a corrupt reference file aborts catalog construction
//! rather than producing a partial catalog.

use crate::stations::error::CatalogError;
use crate::stations::station::{DataAvailability, Hemisphere, Station};
use log::info;
use std::collections::HashMap;
use std::path::Path;

// Byte offsets into a ghcnd-inventory.txt line.
const INVENTORY_ID: std::ops::Range<usize> = 0..11;
const INVENTORY_ELEMENT: std::ops::Range<usize> = 31..35;
const INVENTORY_FIRST_YEAR: std::ops::Range<usize> = 36..40;
const INVENTORY_LAST_YEAR: std::ops::Range<usize> = 41..45;

/// Per-station coverage ranges for the two temperature elements, accumulated
/// while parsing the inventory file. Consumed during catalog construction.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct InventoryEntry {
    tmin: Option<ElementSpan>,
    tmax: Option<ElementSpan>,
}

#[derive(Debug, Clone, Copy)]
struct ElementSpan {
    first_year: i32,
    last_year: i32,
}

/// Computes the common TMIN/TMAX availability for one station: the later of
/// the two first years and the earlier of the two last years. An unknown
/// station, a missing element, or an inverted combined range all yield an
/// empty availability.
pub(crate) fn common_availability(
    inventory: &HashMap<String, InventoryEntry>,
    station_id: &str,
) -> DataAvailability {
    let Some(entry) = inventory.get(station_id) else {
        return DataAvailability::default();
    };
    let (Some(tmin), Some(tmax)) = (entry.tmin, entry.tmax) else {
        return DataAvailability::default();
    };

    let first_year = tmin.first_year.max(tmax.first_year);
    let last_year = tmin.last_year.min(tmax.last_year);
    if first_year > last_year {
        return DataAvailability::default();
    }

    DataAvailability {
        first_year: Some(first_year),
        last_year: Some(last_year),
    }
}

/// An immutable index of all known stations, keyed by station id.
///
/// Built once from the reference files and shared process-wide behind
/// [`CatalogCache`]; a reload builds a fresh catalog and swaps it in, readers
/// never observe a partially built one.
///
/// [`CatalogCache`]: crate::CatalogCache
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: HashMap<String, Station>,
}

impl StationCatalog {
    /// Indexes the given stations by id. A duplicate station id keeps the
    /// later entry, matching the uniqueness invariant of the source data.
    pub fn new(stations: Vec<Station>) -> Self {
        let stations = stations
            .into_iter()
            .map(|station| (station.station_id.clone(), station))
            .collect();
        Self { stations }
    }

    /// Reads both reference files and builds the combined catalog, attaching
    /// each station's common TMIN/TMAX availability.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::FileNotFound`] if either file is absent, and a
    /// malformed-record error if any station line misses a required column or
    /// a retained inventory line carries unparseable year fields. Build
    /// errors abort the whole catalog.
    pub async fn load(stations_file: &Path, inventory_file: &Path) -> Result<Self, CatalogError> {
        let stations_text = read_reference_file(stations_file).await?;
        let inventory_text = read_reference_file(inventory_file).await?;

        let mut stations = parse_stations(&stations_text)?;
        let inventory = parse_inventory(&inventory_text)?;

        for station in &mut stations {
            station.data_availability = common_availability(&inventory, &station.station_id);
        }

        let catalog = Self::new(stations);
        info!(
            "Station catalog built with {} stations from {:?}",
            catalog.len(),
            stations_file
        );
        Ok(catalog)
    }

    pub fn get(&self, station_id: &str) -> Option<&Station> {
        self.stations.get(station_id)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

async fn read_reference_file(path: &Path) -> Result<String, CatalogError> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::FileNotFound(path.to_path_buf())
        } else {
            CatalogError::FileRead(path.to_path_buf(), e)
        }
    })
}

/// Parses the comma-delimited station list. Relevant columns by position:
/// station id (0), latitude (1), longitude (2), name (5); everything else is
/// ignored. Fields are trimmed, the hemisphere is derived from the latitude
/// sign.
fn parse_stations(text: &str) -> Result<Vec<Station>, CatalogError> {
    let mut stations = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let columns: Vec<&str> = line.split(',').collect();

        let station_id = station_column(&columns, 0, line_number)?.to_string();
        let latitude = parse_coordinate(
            station_column(&columns, 1, line_number)?,
            "latitude",
            90.0,
            line_number,
        )?;
        let longitude = parse_coordinate(
            station_column(&columns, 2, line_number)?,
            "longitude",
            180.0,
            line_number,
        )?;
        let name = station_column(&columns, 5, line_number)?.to_string();

        stations.push(Station {
            station_id,
            latitude,
            longitude,
            name,
            hemisphere: Hemisphere::from_latitude(latitude),
            data_availability: DataAvailability::default(),
        });
    }

    Ok(stations)
}

fn station_column<'a>(
    columns: &[&'a str],
    index: usize,
    line_number: usize,
) -> Result<&'a str, CatalogError> {
    columns
        .get(index)
        .map(|column| column.trim())
        .ok_or_else(|| CatalogError::MalformedStation {
            line: line_number,
            message: format!("missing column {index}"),
        })
}

fn parse_coordinate(
    field: &str,
    axis: &str,
    bound: f64,
    line_number: usize,
) -> Result<f64, CatalogError> {
    let value: f64 = field
        .parse()
        .map_err(|_| CatalogError::MalformedStation {
            line: line_number,
            message: format!("unparseable {axis} '{field}'"),
        })?;
    if !value.is_finite() || value.abs() > bound {
        return Err(CatalogError::MalformedStation {
            line: line_number,
            message: format!("{axis} {value} out of range"),
        });
    }
    Ok(value)
}

/// Parses the fixed-width inventory file, keeping only TMIN and TMAX lines.
///
/// The element code is checked before the year fields are touched, so a
/// malformed year on a non-temperature line never fails the build. Lines too
/// short to carry an element code cannot match and are skipped.
fn parse_inventory(text: &str) -> Result<HashMap<String, InventoryEntry>, CatalogError> {
    let mut inventory: HashMap<String, InventoryEntry> = HashMap::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        let Some(element) = line.get(INVENTORY_ELEMENT) else {
            continue;
        };
        let element = element.trim();
        if element != "TMIN" && element != "TMAX" {
            continue;
        }

        let station_id = line
            .get(INVENTORY_ID)
            .map(|field| field.trim().to_string())
            .ok_or_else(|| CatalogError::MalformedInventory {
                line: line_number,
                message: "missing station id".to_string(),
            })?;
        let first_year = parse_inventory_year(line, INVENTORY_FIRST_YEAR, line_number)?;
        let last_year = parse_inventory_year(line, INVENTORY_LAST_YEAR, line_number)?;

        let span = ElementSpan {
            first_year,
            last_year,
        };
        let entry = inventory.entry(station_id).or_default();
        match element {
            "TMIN" => entry.tmin = Some(span),
            _ => entry.tmax = Some(span),
        }
    }

    Ok(inventory)
}

fn parse_inventory_year(
    line: &str,
    range: std::ops::Range<usize>,
    line_number: usize,
) -> Result<i32, CatalogError> {
    let field = line
        .get(range)
        .map(str::trim)
        .ok_or_else(|| CatalogError::MalformedInventory {
            line: line_number,
            message: "truncated year field".to_string(),
        })?;
    field.parse().map_err(|_| CatalogError::MalformedInventory {
        line: line_number,
        message: format!("unparseable year '{field}'"),
    })
}
