//! Reshapes parsed daily records into a long-format observation frame and
//! computes annual and hemisphere-aware seasonal temperature means.
//!
//! Mirrors a melt / drop-missing / group-by pipeline: every present day slot
//! becomes one observation row, tenths of a degree are rescaled to real
//! degrees, and means are plain arithmetic means with no rounding. Rounding,
//! if any, is a presentation concern.

use crate::stations::station::Hemisphere;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::parser::{DailyRecord, Element};
use polars::prelude::*;
use std::collections::BTreeMap;

const TENTHS_PER_DEGREE: f64 = 10.0;

/// A meteorological season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "winter" => Some(Season::Winter),
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "autumn" => Some(Season::Autumn),
            _ => None,
        }
    }
}

// Month (1-based) -> (season, year offset). December is folded forward into
// the next year's winter (northern) or summer (southern).
#[rustfmt::skip]
const NORTHERN_SEASONS: [(Season, i32); 12] = [
    (Season::Winter, 0), (Season::Winter, 0), (Season::Spring, 0),
    (Season::Spring, 0), (Season::Spring, 0), (Season::Summer, 0),
    (Season::Summer, 0), (Season::Summer, 0), (Season::Autumn, 0),
    (Season::Autumn, 0), (Season::Autumn, 0), (Season::Winter, 1),
];
#[rustfmt::skip]
const SOUTHERN_SEASONS: [(Season, i32); 12] = [
    (Season::Summer, 0), (Season::Summer, 0), (Season::Autumn, 0),
    (Season::Autumn, 0), (Season::Autumn, 0), (Season::Winter, 0),
    (Season::Winter, 0), (Season::Winter, 0), (Season::Spring, 0),
    (Season::Spring, 0), (Season::Spring, 0), (Season::Summer, 1),
];

/// Looks up the season and season-year offset for a calendar month.
/// `month` must be in `1..=12`; the parser guarantees this for records.
pub fn season_for_month(hemisphere: Hemisphere, month: u32) -> (Season, i32) {
    let table = match hemisphere {
        Hemisphere::North => &NORTHERN_SEASONS,
        Hemisphere::South => &SOUTHERN_SEASONS,
    };
    table[(month - 1) as usize]
}

/// Annual mean temperatures for one year. A mean is absent when no
/// observation for that element contributed.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualMeans {
    pub year: i32,
    pub tmin: Option<f64>,
    pub tmax: Option<f64>,
}

/// Seasonal mean temperatures for one (season-year, season) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalMeans {
    pub year: i32,
    pub season: Season,
    pub tmin: Option<f64>,
    pub tmax: Option<f64>,
}

/// Expands each record's day slots into individual observations, dropping
/// absent values and rescaling tenths to real degrees. The season and
/// season-year columns are precomputed per row from the station hemisphere.
pub fn observations_frame(
    records: &[DailyRecord],
    hemisphere: Hemisphere,
) -> Result<DataFrame, WeatherDataError> {
    let mut years: Vec<i32> = Vec::new();
    let mut season_years: Vec<i32> = Vec::new();
    let mut seasons: Vec<&'static str> = Vec::new();
    let mut elements: Vec<&'static str> = Vec::new();
    let mut values: Vec<f64> = Vec::new();

    for record in records {
        let (season, offset) = season_for_month(hemisphere, record.month);
        for value in record.values.iter().flatten() {
            years.push(record.year);
            season_years.push(record.year + offset);
            seasons.push(season.as_str());
            elements.push(record.element.as_str());
            values.push(f64::from(*value) / TENTHS_PER_DEGREE);
        }
    }

    let frame = df!(
        "year" => years,
        "season_year" => season_years,
        "season" => seasons,
        "element" => elements,
        "value" => values,
    )?;
    Ok(frame)
}

/// Computes per-year arithmetic means of TMIN and TMAX over
/// `[start_year, end_year]`, one row per year actually observed, in
/// ascending year order.
pub fn annual_means(
    observations: &DataFrame,
    start_year: i32,
    end_year: i32,
) -> Result<Vec<AnnualMeans>, WeatherDataError> {
    let grouped = observations
        .clone()
        .lazy()
        .filter(
            col("year")
                .gt_eq(lit(start_year))
                .and(col("year").lt_eq(lit(end_year))),
        )
        .group_by([col("year"), col("element")])
        .agg([col("value").mean()])
        .collect()?;

    let years = grouped.column("year")?.i32()?;
    let elements = grouped.column("element")?.str()?;
    let means = grouped.column("value")?.f64()?;

    let mut by_year: BTreeMap<i32, AnnualMeans> = BTreeMap::new();
    for row in 0..grouped.height() {
        let (Some(year), Some(element), Some(mean)) =
            (years.get(row), elements.get(row), means.get(row))
        else {
            continue;
        };
        let entry = by_year.entry(year).or_insert(AnnualMeans {
            year,
            tmin: None,
            tmax: None,
        });
        match Element::from_code(element) {
            Some(Element::Tmin) => entry.tmin = Some(mean),
            Some(Element::Tmax) => entry.tmax = Some(mean),
            None => {}
        }
    }

    Ok(by_year.into_values().collect())
}

/// Computes per-(season-year, season) means, keeping only rows whose season
/// year falls inside `[start_year, end_year]`. December observations of
/// `start_year - 1` land in `start_year`'s winter (northern) or summer
/// (southern) bucket through the precomputed season-year column.
pub fn seasonal_means(
    observations: &DataFrame,
    start_year: i32,
    end_year: i32,
) -> Result<Vec<SeasonalMeans>, WeatherDataError> {
    let grouped = observations
        .clone()
        .lazy()
        .filter(
            col("season_year")
                .gt_eq(lit(start_year))
                .and(col("season_year").lt_eq(lit(end_year))),
        )
        .group_by([col("season_year"), col("season"), col("element")])
        .agg([col("value").mean()])
        .collect()?;

    let years = grouped.column("season_year")?.i32()?;
    let seasons = grouped.column("season")?.str()?;
    let elements = grouped.column("element")?.str()?;
    let means = grouped.column("value")?.f64()?;

    let mut by_key: BTreeMap<(i32, Season), SeasonalMeans> = BTreeMap::new();
    for row in 0..grouped.height() {
        let (Some(year), Some(season), Some(element), Some(mean)) = (
            years.get(row),
            seasons.get(row),
            elements.get(row),
            means.get(row),
        ) else {
            continue;
        };
        let Some(season) = Season::from_name(season) else {
            continue;
        };
        let entry = by_key.entry((year, season)).or_insert(SeasonalMeans {
            year,
            season,
            tmin: None,
            tmax: None,
        });
        match Element::from_code(element) {
            Some(Element::Tmin) => entry.tmin = Some(mean),
            Some(Element::Tmax) => entry.tmax = Some(mean),
            None => {}
        }
    }

    Ok(by_key.into_values().collect())
}
