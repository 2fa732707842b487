//! Merges annual and seasonal aggregate rows into the client-facing analysis
//! structure.
//!
//! Iteration is driven by the annual rows: a year only appears in the output
//! if it has an annual row, and seasonal rows for other years are dropped
//! silently. All four season keys are always present, defaulting to absent
//! means.

use crate::weather_data::aggregate::{AnnualMeans, Season, SeasonalMeans};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A pair of mean temperatures in real degrees; `None` serializes to `null`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MeanPair {
    pub tmin: Option<f64>,
    pub tmax: Option<f64>,
}

/// Mean temperatures per season, with every season always present.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SeasonMeans {
    pub winter: MeanPair,
    pub spring: MeanPair,
    pub summer: MeanPair,
    pub autumn: MeanPair,
}

impl SeasonMeans {
    fn slot_mut(&mut self, season: Season) -> &mut MeanPair {
        match season {
            Season::Winter => &mut self.winter,
            Season::Spring => &mut self.spring,
            Season::Summer => &mut self.summer,
            Season::Autumn => &mut self.autumn,
        }
    }
}

/// One output record per analyzed year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearlyMeans {
    pub year: i32,
    pub annual_means: MeanPair,
    pub seasonal_means: SeasonMeans,
}

/// The full analysis result: one entry per year, ascending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    pub years: Vec<YearlyMeans>,
}

/// Builds the response from the two aggregate row sets. Seasonal rows are
/// merged into matching annual years only.
pub fn build_analysis_response(
    annual: Vec<AnnualMeans>,
    seasonal: Vec<SeasonalMeans>,
) -> AnalysisResponse {
    let mut by_year: BTreeMap<i32, YearlyMeans> = BTreeMap::new();

    for row in annual {
        by_year.insert(
            row.year,
            YearlyMeans {
                year: row.year,
                annual_means: MeanPair {
                    tmin: row.tmin,
                    tmax: row.tmax,
                },
                seasonal_means: SeasonMeans::default(),
            },
        );
    }

    for row in seasonal {
        if let Some(entry) = by_year.get_mut(&row.year) {
            *entry.seasonal_means.slot_mut(row.season) = MeanPair {
                tmin: row.tmin,
                tmax: row.tmax,
            };
        }
    }

    AnalysisResponse {
        years: by_year.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annual(year: i32, tmin: Option<f64>, tmax: Option<f64>) -> AnnualMeans {
        AnnualMeans { year, tmin, tmax }
    }

    fn seasonal(year: i32, season: Season, tmin: Option<f64>, tmax: Option<f64>) -> SeasonalMeans {
        SeasonalMeans {
            year,
            season,
            tmin,
            tmax,
        }
    }

    #[test]
    fn every_annual_year_appears_exactly_once_in_ascending_order() {
        let response = build_analysis_response(
            vec![
                annual(1993, Some(3.1), Some(13.0)),
                annual(1991, Some(2.8), Some(13.2)),
                annual(1992, None, Some(12.9)),
            ],
            Vec::new(),
        );

        let years: Vec<i32> = response.years.iter().map(|entry| entry.year).collect();
        assert_eq!(years, [1991, 1992, 1993]);
    }

    #[test]
    fn all_four_season_keys_are_present_even_without_seasonal_rows() {
        let response = build_analysis_response(vec![annual(1991, Some(2.8), None)], Vec::new());
        let entry = &response.years[0];
        assert_eq!(entry.seasonal_means.winter, MeanPair::default());
        assert_eq!(entry.seasonal_means.spring, MeanPair::default());
        assert_eq!(entry.seasonal_means.summer, MeanPair::default());
        assert_eq!(entry.seasonal_means.autumn, MeanPair::default());
    }

    #[test]
    fn seasonal_rows_overwrite_only_their_own_season() {
        let response = build_analysis_response(
            vec![annual(1991, Some(2.8), Some(13.2))],
            vec![seasonal(1991, Season::Winter, Some(-9.4), Some(2.4))],
        );

        let entry = &response.years[0];
        assert_eq!(entry.seasonal_means.winter.tmin, Some(-9.4));
        assert_eq!(entry.seasonal_means.winter.tmax, Some(2.4));
        assert_eq!(entry.seasonal_means.summer, MeanPair::default());
    }

    #[test]
    fn seasonal_only_years_are_dropped_silently() {
        let response = build_analysis_response(
            vec![annual(1991, Some(2.8), Some(13.2))],
            vec![
                seasonal(1991, Season::Summer, Some(10.1), Some(22.4)),
                seasonal(1990, Season::Winter, Some(-5.0), Some(1.0)),
            ],
        );

        assert_eq!(response.years.len(), 1);
        assert_eq!(response.years[0].year, 1991);
    }

    #[test]
    fn absent_means_serialize_as_null() {
        let response = build_analysis_response(vec![annual(1991, Some(2.8), None)], Vec::new());
        let json = serde_json::to_value(&response).unwrap();

        let entry = &json["years"][0];
        assert_eq!(entry["year"], 1991);
        assert_eq!(entry["annual_means"]["tmin"], 2.8);
        assert!(entry["annual_means"]["tmax"].is_null());
        assert!(entry["seasonal_means"]["autumn"]["tmin"].is_null());
        // Exactly the four expected season keys.
        let seasons = entry["seasonal_means"].as_object().unwrap();
        assert_eq!(seasons.len(), 4);
        for key in ["winter", "spring", "summer", "autumn"] {
            assert!(seasons.contains_key(key));
        }
    }
}
