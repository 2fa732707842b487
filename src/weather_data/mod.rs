pub mod aggregate;
pub mod error;
pub mod fetcher;
pub mod parser;
pub mod response;

use crate::stations::station::Hemisphere;
use crate::weather_data::aggregate::{annual_means, observations_frame, seasonal_means};
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::parser::parse_daily_file;
use crate::weather_data::response::{build_analysis_response, AnalysisResponse};

/// Runs the full analysis pipeline on raw `.dly` text: parse, reshape,
/// aggregate annually and seasonally, and assemble the response. Pure — the
/// caller supplies the text, typically via [`DlyFetcher`](crate::DlyFetcher).
pub fn analyze_daily_file(
    content: &str,
    hemisphere: Hemisphere,
    start_year: i32,
    end_year: i32,
) -> Result<AnalysisResponse, WeatherDataError> {
    let records = parse_daily_file(content, start_year, end_year);
    let observations = observations_frame(&records, hemisphere)?;
    let annual = annual_means(&observations, start_year, end_year)?;
    let seasonal = seasonal_means(&observations, start_year, end_year)?;
    Ok(build_analysis_response(annual, seasonal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dly_line(station_id: &str, year: i32, month: u32, element: &str, values: &[&str]) -> String {
        let mut line = format!("{station_id:<11}{year:04}{month:02}{element:<4}");
        for day in 0..31 {
            let value = values.get(day).copied().unwrap_or("-9999");
            line.push_str(&format!("{value:>5}   "));
        }
        line
    }

    #[test]
    fn end_to_end_northern_station_with_december_folding() {
        // Prior December plus three 1991 months: winter must include the
        // 1990-12 values, the annual mean must not.
        let content = [
            dly_line("GME00129502", 1990, 12, "TMIN", &[" -100", "  -60"]),
            dly_line("GME00129502", 1991, 1, "TMIN", &["  -80"]),
            dly_line("GME00129502", 1991, 7, "TMIN", &["  100", "  140"]),
            dly_line("GME00129502", 1991, 7, "TMAX", &["  220", "  240"]),
        ]
        .join("\n");

        let response =
            analyze_daily_file(&content, Hemisphere::North, 1991, 1991).unwrap();

        assert_eq!(response.years.len(), 1);
        let year = &response.years[0];
        assert_eq!(year.year, 1991);

        // Annual TMIN over 1991 only: (-8 + 10 + 14) / 3
        let annual_tmin = year.annual_means.tmin.unwrap();
        assert!((annual_tmin - 16.0 / 3.0).abs() < 1e-9);
        assert_eq!(year.annual_means.tmax, Some(23.0));

        // Winter 1991 folds in December 1990: (-10 + -6 + -8) / 3
        assert_eq!(year.seasonal_means.winter.tmin, Some(-8.0));
        assert_eq!(year.seasonal_means.winter.tmax, None);
        assert_eq!(year.seasonal_means.summer.tmin, Some(12.0));
        assert_eq!(year.seasonal_means.summer.tmax, Some(23.0));
        // No observations in spring or autumn.
        assert_eq!(year.seasonal_means.spring.tmin, None);
        assert_eq!(year.seasonal_means.autumn.tmax, None);
    }

    #[test]
    fn end_to_end_southern_station_flips_the_season_table() {
        let content = [
            dly_line("AR000087925", 1956, 12, "TMAX", &["  300"]),
            dly_line("AR000087925", 1957, 1, "TMAX", &["  200"]),
            dly_line("AR000087925", 1957, 7, "TMAX", &["   40"]),
        ]
        .join("\n");

        let response =
            analyze_daily_file(&content, Hemisphere::South, 1957, 1957).unwrap();

        let year = &response.years[0];
        // December 1956 folds into summer 1957.
        assert_eq!(year.seasonal_means.summer.tmax, Some(25.0));
        assert_eq!(year.seasonal_means.winter.tmax, Some(4.0));
        // Annual mean covers 1957 only.
        assert_eq!(year.annual_means.tmax, Some(12.0));
    }

    #[test]
    fn full_year_fixture_reproduces_known_means() {
        // Northern station, 1991, observations spread over both elements and
        // all the aggregation paths: annual tmin 2.8 and tmax 13.2, winter
        // tmin -9.4 (including December 1990), summer tmax 22.4.
        let content = [
            dly_line("GME00129502", 1990, 12, "TMIN", &["-100"]),
            dly_line("GME00129502", 1991, 1, "TMIN", &["-94"]),
            dly_line("GME00129502", 1991, 2, "TMIN", &["-88"]),
            dly_line("GME00129502", 1991, 7, "TMIN", &["150"]),
            dly_line("GME00129502", 1991, 10, "TMIN", &["144"]),
            dly_line("GME00129502", 1991, 1, "TMAX", &["-20"]),
            dly_line("GME00129502", 1991, 2, "TMAX", &["40"]),
            dly_line("GME00129502", 1991, 6, "TMAX", &["220"]),
            dly_line("GME00129502", 1991, 7, "TMAX", &["224"]),
            dly_line("GME00129502", 1991, 8, "TMAX", &["228"]),
            dly_line("GME00129502", 1991, 10, "TMAX", &["100"]),
        ]
        .join("\n");

        let response = analyze_daily_file(&content, Hemisphere::North, 1991, 1991).unwrap();

        assert_eq!(response.years.len(), 1);
        let year = &response.years[0];
        assert_eq!(year.year, 1991);
        assert!((year.annual_means.tmin.unwrap() - 2.8).abs() < 0.1);
        assert!((year.annual_means.tmax.unwrap() - 13.2).abs() < 0.1);
        assert!((year.seasonal_means.winter.tmin.unwrap() - -9.4).abs() < 0.1);
        assert!((year.seasonal_means.summer.tmax.unwrap() - 22.4).abs() < 0.1);
    }

    #[test]
    fn seasonal_only_leading_year_is_not_emitted() {
        // Only a December record before the window: it produces a winter
        // bucket for start_year but no annual row, so no output year.
        let content = dly_line("GME00129502", 1990, 12, "TMIN", &["  -50"]);
        let response =
            analyze_daily_file(&content, Hemisphere::North, 1991, 1991).unwrap();
        assert!(response.years.is_empty());
    }

    #[test]
    fn empty_file_yields_empty_response() {
        let response = analyze_daily_file("", Hemisphere::North, 1991, 2000).unwrap();
        assert!(response.years.is_empty());
    }
}
