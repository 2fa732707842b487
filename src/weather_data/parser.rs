//! Fixed-width decoding of GHCN-Daily `.dly` observation files.
//!
//! Each physical line carries one station/year/month/element with 31 daily
//! values in eight-byte blocks. Only TMIN and TMAX lines within the bounded
//! year range are kept; everything else is discarded without failing the
//! parse. Operates purely on provided text, no file I/O happens here.

use std::ops::Range;

/// Lines shorter than this cannot hold 31 complete day blocks.
pub const MIN_LINE_LEN: usize = 269;

// Byte offsets into a .dly line.
const STATION_ID: Range<usize> = 0..11;
const YEAR: Range<usize> = 11..15;
const MONTH: Range<usize> = 15..17;
const ELEMENT: Range<usize> = 17..21;
const DAY_BLOCKS_START: usize = 21;
const DAY_BLOCK_LEN: usize = 8;
const DAY_VALUE_LEN: usize = 5;

/// The sentinel GHCN uses for an absent daily value.
const MISSING_VALUE: &str = "-9999";

/// The two observation elements this pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Daily minimum temperature.
    Tmin,
    /// Daily maximum temperature.
    Tmax,
}

impl Element {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TMIN" => Some(Element::Tmin),
            "TMAX" => Some(Element::Tmax),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Tmin => "TMIN",
            Element::Tmax => "TMAX",
        }
    }
}

/// One observation-element-month: up to 31 daily values in tenths of a
/// degree, absent values represented as `None`. Produced per analysis
/// request and discarded after aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRecord {
    pub station_id: String,
    pub year: i32,
    pub month: u32,
    pub element: Element,
    pub values: [Option<i32>; 31],
}

/// Parses the raw text of one station's `.dly` file into daily records for
/// the year window `[start_year - 1, end_year]`. The extra leading year lets
/// the aggregator fold the prior December into the first requested season
/// year.
///
/// Discarded (never fatal): lines shorter than [`MIN_LINE_LEN`], lines for
/// elements other than TMIN/TMAX, lines outside the year window, and lines
/// whose year or month fields do not parse. The element check happens before
/// any numeric parsing.
pub fn parse_daily_file(content: &str, start_year: i32, end_year: i32) -> Vec<DailyRecord> {
    let mut records = Vec::new();

    for line in content.lines() {
        if line.len() < MIN_LINE_LEN {
            continue;
        }
        let Some(element) = line.get(ELEMENT).and_then(|code| Element::from_code(code.trim()))
        else {
            continue;
        };

        let Some(year) = line.get(YEAR).and_then(|field| field.trim().parse::<i32>().ok())
        else {
            continue;
        };
        if year < start_year - 1 || year > end_year {
            continue;
        }
        let Some(month) = line.get(MONTH).and_then(|field| field.trim().parse::<u32>().ok())
        else {
            continue;
        };
        if !(1..=12).contains(&month) {
            continue;
        }
        let Some(station_id) = line.get(STATION_ID).map(str::trim) else {
            continue;
        };

        let mut values = [None; 31];
        for (day_index, slot) in values.iter_mut().enumerate() {
            let start = DAY_BLOCKS_START + day_index * DAY_BLOCK_LEN;
            *slot = line
                .get(start..start + DAY_VALUE_LEN)
                .map(str::trim)
                .filter(|field| !field.is_empty() && *field != MISSING_VALUE)
                .and_then(|field| field.parse::<i32>().ok());
        }

        records.push(DailyRecord {
            station_id: station_id.to_string(),
            year,
            month,
            element,
            values,
        });
    }

    records
}
