//! The latest-snapshot table.
//!
//! Selects the most recent date with broad county coverage, renames the
//! published columns for display, and scales the fraction-valued columns to
//! percentages rounded to one decimal.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use hearth_model::{Fips, HousingTable, Observation};
use log::info;
use serde::Serialize;

use crate::export::{PublishError, write_atomic};

/// File name of the latest snapshot output.
pub const SNAPSHOT_FILE: &str = "latest housing valuation.csv";

/// One published snapshot row, under display column names. Fraction-valued
/// columns carry percentages rounded to one decimal.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotRecord {
    /// County key.
    #[serde(rename = "FIPS")]
    pub fips: Fips,
    /// State name.
    #[serde(rename = "State")]
    pub state: String,
    /// County name.
    #[serde(rename = "County")]
    pub county: String,
    /// Average house price, in dollars.
    #[serde(rename = "Average House Price")]
    pub house_price: f64,
    /// Annualized average rent, in dollars.
    #[serde(rename = "Average Rent")]
    pub rent: f64,
    /// Property tax rate, in percent.
    #[serde(rename = "Property Tax Rate")]
    pub property_tax_rate: Option<f64>,
    /// Expected rent growth, in percent.
    #[serde(rename = "Expected Rent Growth")]
    pub rent_growth: Option<f64>,
    /// Intrinsic value of the average home, in dollars.
    #[serde(rename = "Economic Value of Average Home")]
    pub expected_house_price: Option<f64>,
    /// Total return, in percent.
    #[serde(rename = "Total Return")]
    pub total_return: Option<f64>,
    /// Net annual return, in percent.
    #[serde(rename = "Net Annual Return")]
    pub net_annual_return: Option<f64>,
}

impl From<&Observation> for SnapshotRecord {
    fn from(row: &Observation) -> Self {
        Self {
            fips: row.fips.clone(),
            state: row.state.clone(),
            county: row.county.clone(),
            house_price: row.house_price,
            rent: row.rent,
            property_tax_rate: to_percent(row.property_tax_rate),
            rent_growth: to_percent(row.rent_growth),
            expected_house_price: row.expected_house_price,
            total_return: to_percent(row.total_return),
            net_annual_return: to_percent(row.net_annual_return),
        }
    }
}

/// Scale a fraction to a percentage rounded to one decimal.
fn to_percent(value: Option<f64>) -> Option<f64> {
    value.map(|v| (v * 1000.0).round() / 10.0)
}

/// The most recent date whose row count exceeds `min_rows`.
///
/// Dates with thin coverage are skipped, so a partially loaded month cannot
/// masquerade as the latest cross-section.
pub fn latest_qualifying_date(
    table: &HousingTable,
    min_rows: usize,
) -> Result<NaiveDate, PublishError> {
    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for row in table.rows() {
        *counts.entry(row.date).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count > min_rows)
        .map(|(date, _)| date)
        .max()
        .ok_or(PublishError::NoQualifyingDate { min_rows })
}

/// Write the latest snapshot into `dir` and return the selected date along
/// with the written path.
pub fn write_snapshot(
    dir: &Path,
    table: &HousingTable,
    min_rows: usize,
) -> Result<(NaiveDate, PathBuf), PublishError> {
    let date = latest_qualifying_date(table, min_rows)?;

    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in table.rows().iter().filter(|row| row.date == date) {
        wtr.serialize(SnapshotRecord::from(row))?;
    }
    let body = wtr.into_inner().map_err(|e| e.into_error())?;

    let path = dir.join(SNAPSHOT_FILE);
    write_atomic(&path, &body)?;
    info!("wrote snapshot for {date} to {}", path.display());
    Ok((date, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Days;
    use rstest::rstest;
    use std::fs;

    fn day(n: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(n))
            .unwrap()
    }

    fn observation(fips: &str, date: NaiveDate) -> Observation {
        Observation {
            fips: Fips::from_code(fips),
            state: "California".to_string(),
            county: "San Francisco".to_string(),
            date,
            house_price: 1_200_000.0,
            rent: 42_000.0,
            growth: Some(0.05),
            rate: Some(0.06),
            property_tax_rate: Some(0.0523),
            house_price_base: 500_000.0,
            rent_base: 20_000.0,
            rent_growth: Some(0.0125),
            extra_tax_deduction: Some(36_000.0),
            expected_house_price: Some(800_000.0),
            total_return: Some(-0.3333),
            net_annual_return: None,
            annual_return: None,
        }
    }

    /// Rows spread over three dates with counts [12, 15, 8]: the middle
    /// date qualifies and wins even though a later date exists.
    fn spread_table() -> HousingTable {
        let mut rows = Vec::new();
        for (day_offset, count) in [(0u64, 12u64), (30, 15), (60, 8)] {
            for i in 0..count {
                rows.push(observation(&format!("{i:05}"), day(day_offset)));
            }
        }
        HousingTable::from_rows(rows)
    }

    #[test]
    fn picks_max_date_among_qualifying_counts() {
        let table = spread_table();
        let date = latest_qualifying_date(&table, 10).unwrap();
        assert_eq!(date, day(30));
    }

    #[test]
    fn fails_when_no_date_qualifies() {
        let table = spread_table();
        let err = latest_qualifying_date(&table, 100).unwrap_err();
        assert!(matches!(
            err,
            PublishError::NoQualifyingDate { min_rows: 100 }
        ));
    }

    #[rstest]
    #[case(Some(0.0523), Some(5.2))]
    #[case(Some(-0.3333), Some(-33.3))]
    #[case(Some(0.0), Some(0.0))]
    #[case(None, None)]
    fn fractions_publish_as_rounded_percentages(
        #[case] fraction: Option<f64>,
        #[case] expected: Option<f64>,
    ) {
        match (to_percent(fraction), expected) {
            (Some(p), Some(e)) => assert_relative_eq!(p, e),
            (p, e) => assert_eq!(p, e),
        }
    }

    #[test]
    fn snapshot_has_display_columns_and_only_the_selected_date() {
        let dir = std::env::temp_dir().join("hearth-snapshot-test");
        fs::create_dir_all(&dir).unwrap();

        let table = spread_table();
        let (date, path) = write_snapshot(&dir, &table, 10).unwrap();
        assert_eq!(date, day(30));

        let written = fs::read_to_string(&path).unwrap();
        let header = written.lines().next().unwrap();
        assert_eq!(
            header,
            "FIPS,State,County,Average House Price,Average Rent,\
             Property Tax Rate,Expected Rent Growth,\
             Economic Value of Average Home,Total Return,Net Annual Return"
        );
        // 15 data rows for the selected date, nothing else.
        assert_eq!(written.lines().count(), 16);
        // Percent scaling applied to the fraction columns.
        assert!(written.contains(",5.2,"));
        assert!(written.contains(",-33.3,"));
        assert!(!dir.join("latest housing valuation.csv.tmp").exists());

        fs::remove_dir_all(dir).ok();
    }
}
