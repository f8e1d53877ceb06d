//! Date-indexed reference series.
//!
//! The mortgage-rate and GDP-growth inputs are pure time series that attach
//! to observation rows through a backward as-of lookup: the most recent
//! reference value at or before the row's date. A row dated before the
//! series starts gets no value.

use std::io::Read;

use chrono::NaiveDate;
use log::info;
use serde::Deserialize;

use crate::decode::{format_error, parse_date};
use crate::error::Result;

/// Trailing window of the nominal-growth moving average, in periods
/// (quarters in the published data).
const GROWTH_WINDOW: usize = 80;

/// A reference series sorted ascending by date.
///
/// Values may be undefined (during a moving-average warm-up) while the date
/// itself still participates in the as-of lookup, so a match can legitimately
/// yield nothing.
#[derive(Debug, Clone, Default)]
pub struct AsofSeries {
    points: Vec<(NaiveDate, Option<f64>)>,
}

impl AsofSeries {
    /// Build a series from unordered points, sorting by date ascending.
    pub fn new(mut points: Vec<(NaiveDate, Option<f64>)>) -> Self {
        points.sort_by_key(|&(date, _)| date);
        Self { points }
    }

    /// The value at the most recent date at or before `date`, or `None` if
    /// the series starts later or the matched value is undefined.
    pub fn value_at_or_before(&self, date: NaiveDate) -> Option<f64> {
        let idx = self.points.partition_point(|&(d, _)| d <= date);
        if idx == 0 { None } else { self.points[idx - 1].1 }
    }

    /// Number of reference points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct MortgageRateRecord {
    date: String,
    #[serde(rename = "mortgage rate 30 year fixed")]
    rate: f64,
}

#[derive(Debug, Deserialize)]
struct GrowthRecord {
    date: String,
    #[serde(rename = "nominal gdp growth")]
    growth: f64,
}

/// Read the 30-year fixed mortgage rate series, converting percentages to
/// fractions.
pub fn read_mortgage_rates<R: Read>(reader: R, name: &str) -> Result<AsofSeries> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut points = Vec::new();
    for record in rdr.deserialize::<MortgageRateRecord>() {
        let record = record.map_err(|e| format_error(name, e))?;
        points.push((parse_date(name, &record.date)?, Some(record.rate / 100.0)));
    }
    info!("{name}: {} rate points", points.len());
    Ok(AsofSeries::new(points))
}

/// Read the nominal GDP growth series and smooth it with a trailing
/// 80-period moving average. Periods before the window fills carry an
/// undefined average, not zero.
pub fn read_gdp_growth<R: Read>(reader: R, name: &str) -> Result<AsofSeries> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut raw: Vec<(NaiveDate, f64)> = Vec::new();
    for record in rdr.deserialize::<GrowthRecord>() {
        let record = record.map_err(|e| format_error(name, e))?;
        raw.push((parse_date(name, &record.date)?, record.growth));
    }
    raw.sort_by_key(|&(date, _)| date);

    let values: Vec<f64> = raw.iter().map(|&(_, v)| v).collect();
    let points = raw
        .iter()
        .zip(trailing_mean(&values, GROWTH_WINDOW))
        .map(|(&(date, _), mean)| (date, mean.map(|m| m / 100.0)))
        .collect();
    info!(
        "{name}: {} growth points, {GROWTH_WINDOW}-period window",
        raw.len()
    );
    Ok(AsofSeries::new(points))
}

/// Trailing simple moving average; positions before the window fills are
/// undefined.
fn trailing_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                let start = i + 1 - window;
                Some(values[start..=i].iter().sum::<f64>() / window as f64)
            }
        })
        .collect()
}
