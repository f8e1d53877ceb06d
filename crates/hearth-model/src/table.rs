//! The joined housing table.
//!
//! One row per (county, date) pair that has both a price and a rent
//! observation; every other input attaches without dropping rows. Columns
//! that can be undefined are `Option<f64>` and stay undefined through the
//! downstream arithmetic.

use std::collections::HashMap;

use chrono::NaiveDate;
use hearth_data::Fips;
use hearth_data::county::{PriceObservation, RentObservation};
use hearth_data::series::AsofSeries;
use log::info;
use serde::Serialize;

use crate::stats::quantile;

/// One valuation row: a county at a date with all joined and derived
/// columns. Serializes under the internal column names of the full-history
/// output.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    /// County key.
    pub fips: Fips,
    /// State name.
    pub state: String,
    /// County name.
    pub county: String,
    /// Observation date.
    pub date: NaiveDate,
    /// Average house price.
    #[serde(rename = "house price")]
    pub house_price: f64,
    /// Annualized average rent.
    pub rent: f64,
    /// Trailing moving average of nominal GDP growth, as a fraction.
    pub growth: Option<f64>,
    /// 30-year fixed mortgage rate, as a fraction.
    pub rate: Option<f64>,
    /// Property tax rate, as a fraction.
    #[serde(rename = "property tax rate")]
    pub property_tax_rate: Option<f64>,
    /// Cross-sectional house-price quantile of this row's date group.
    #[serde(rename = "house price base")]
    pub house_price_base: f64,
    /// Cross-sectional rent quantile of this row's date group.
    #[serde(rename = "rent base")]
    pub rent_base: f64,
    /// Expected rent growth, clamped non-negative.
    #[serde(rename = "rent growth")]
    pub rent_growth: Option<f64>,
    /// Itemized deduction from mortgage interest above the standard
    /// deduction.
    #[serde(rename = "extra tax deduction")]
    pub extra_tax_deduction: Option<f64>,
    /// Intrinsic value backed out of the capitalization formula.
    #[serde(rename = "expected house price")]
    pub expected_house_price: Option<f64>,
    /// (expected - observed) / observed.
    #[serde(rename = "total return")]
    pub total_return: Option<f64>,
    /// Total return scaled by the annual financing rate.
    #[serde(rename = "net annual return")]
    pub net_annual_return: Option<f64>,
    /// Net annual return plus the financing rate itself.
    #[serde(rename = "annual return")]
    pub annual_return: Option<f64>,
}

/// The joined table, sorted by date ascending.
#[derive(Debug, Default)]
pub struct HousingTable {
    rows: Vec<Observation>,
}

impl HousingTable {
    /// Join the five inputs into the housing table.
    ///
    /// Price and rent inner-join on (county, date) — existing in both
    /// sources is the admission gate for a row. Growth and rate attach with
    /// a backward as-of lookup, property tax left-joins by county, and the
    /// per-date base quantiles attach to every row of the date group.
    pub fn join(
        prices: Vec<PriceObservation>,
        rents: &[RentObservation],
        growth: &AsofSeries,
        rates: &AsofSeries,
        property_tax: &HashMap<Fips, f64>,
        base_quantile: f64,
    ) -> Self {
        let rent_by_key: HashMap<(Fips, NaiveDate), f64> = rents
            .iter()
            .map(|r| ((r.fips.clone(), r.date), r.rent))
            .collect();

        let mut rows: Vec<Observation> = prices
            .into_iter()
            .filter_map(|price| {
                let rent = *rent_by_key.get(&(price.fips.clone(), price.date))?;
                Some(Observation {
                    growth: growth.value_at_or_before(price.date),
                    rate: rates.value_at_or_before(price.date),
                    property_tax_rate: property_tax.get(&price.fips).copied(),
                    fips: price.fips,
                    state: price.state,
                    county: price.county,
                    date: price.date,
                    house_price: price.house_price,
                    rent,
                    house_price_base: 0.0,
                    rent_base: 0.0,
                    rent_growth: None,
                    extra_tax_deduction: None,
                    expected_house_price: None,
                    total_return: None,
                    net_annual_return: None,
                    annual_return: None,
                })
            })
            .collect();

        // Stable sort: the as-of precondition, and source order survives
        // within a date.
        rows.sort_by_key(|row| row.date);
        attach_base_quantiles(&mut rows, base_quantile);

        info!("joined table: {} rows", rows.len());
        Self { rows }
    }

    /// Assemble a table from already-joined rows (sorted by date).
    pub fn from_rows(mut rows: Vec<Observation>) -> Self {
        rows.sort_by_key(|row| row.date);
        Self { rows }
    }

    /// All rows, date-ascending.
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Mutable row access for the derivation passes.
    pub(crate) fn rows_mut(&mut self) -> &mut [Observation] {
        &mut self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the join admitted no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Compute the base-home quantiles of every date group and attach them to
/// each row of the group. Groups are independent across dates.
fn attach_base_quantiles(rows: &mut [Observation], q: f64) {
    let mut start = 0;
    while start < rows.len() {
        let date = rows[start].date;
        let mut end = start + 1;
        while end < rows.len() && rows[end].date == date {
            end += 1;
        }

        let group = &rows[start..end];
        let price_base = quantile(group.iter().map(|r| r.house_price).collect(), q);
        let rent_base = quantile(group.iter().map(|r| r.rent).collect(), q);
        // The group is non-empty, so both quantiles exist.
        if let (Some(price_base), Some(rent_base)) = (price_base, rent_base) {
            for row in &mut rows[start..end] {
                row.house_price_base = price_base;
                row.rent_base = rent_base;
            }
        }

        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Days;

    fn day(n: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(n))
            .unwrap()
    }

    fn price(fips: &str, date: NaiveDate, house_price: f64) -> PriceObservation {
        PriceObservation {
            fips: Fips::from_code(fips),
            state: "State".to_string(),
            county: "County".to_string(),
            date,
            house_price,
        }
    }

    fn rent(fips: &str, date: NaiveDate, rent: f64) -> RentObservation {
        RentObservation {
            fips: Fips::from_code(fips),
            date,
            rent,
        }
    }

    #[test]
    fn price_and_rent_inner_join_is_the_admission_gate() {
        let prices = vec![
            price("06075", day(0), 1_000_000.0),
            price("48001", day(0), 200_000.0), // no rent -> dropped
        ];
        let rents = vec![
            rent("06075", day(0), 36_000.0),
            rent("36061", day(0), 40_000.0), // no price -> dropped
        ];
        let table = HousingTable::join(
            prices,
            &rents,
            &AsofSeries::default(),
            &AsofSeries::default(),
            &HashMap::new(),
            0.3,
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].fips.as_str(), "06075");
        assert_eq!(table.rows()[0].rent, 36_000.0);
    }

    #[test]
    fn rows_sort_by_date_and_missing_joins_stay_undefined() {
        let prices = vec![
            price("06075", day(30), 1_000_000.0),
            price("06075", day(0), 990_000.0),
        ];
        let rents = vec![
            rent("06075", day(30), 36_000.0),
            rent("06075", day(0), 35_000.0),
        ];
        let rates = AsofSeries::new(vec![(day(10), Some(0.065))]);
        let table = HousingTable::join(
            prices,
            &rents,
            &AsofSeries::default(),
            &rates,
            &HashMap::new(),
            0.3,
        );

        assert_eq!(table.len(), 2);
        let rows = table.rows();
        assert_eq!(rows[0].date, day(0));
        assert_eq!(rows[1].date, day(30));
        // Row before the rate series starts has no rate; the later row
        // matches backward. Neither row drops.
        assert_eq!(rows[0].rate, None);
        assert_eq!(rows[1].rate, Some(0.065));
        assert_eq!(rows[0].growth, None);
        assert_eq!(rows[0].property_tax_rate, None);
    }

    #[test]
    fn base_quantiles_are_per_date_cross_sections() {
        let prices = vec![
            price("00001", day(0), 100.0),
            price("00002", day(0), 200.0),
            price("00003", day(0), 300.0),
            price("00004", day(0), 400.0),
            price("00001", day(1), 1000.0),
        ];
        let rents = vec![
            rent("00001", day(0), 10.0),
            rent("00002", day(0), 20.0),
            rent("00003", day(0), 30.0),
            rent("00004", day(0), 40.0),
            rent("00001", day(1), 99.0),
        ];
        let table = HousingTable::join(
            prices,
            &rents,
            &AsofSeries::default(),
            &AsofSeries::default(),
            &HashMap::new(),
            0.3,
        );

        for row in table.rows().iter().filter(|r| r.date == day(0)) {
            assert_relative_eq!(row.house_price_base, 190.0);
            assert_relative_eq!(row.rent_base, 19.0);
        }
        // The second date's singleton group is untouched by the first.
        let later: Vec<_> = table.rows().iter().filter(|r| r.date == day(1)).collect();
        assert_eq!(later.len(), 1);
        assert_relative_eq!(later[0].house_price_base, 1000.0);
        assert_relative_eq!(later[0].rent_base, 99.0);
    }

    #[test]
    fn property_tax_attaches_by_county_only() {
        let prices = vec![
            price("06075", day(0), 1_000_000.0),
            price("06075", day(30), 1_010_000.0),
        ];
        let rents = vec![
            rent("06075", day(0), 36_000.0),
            rent("06075", day(30), 36_200.0),
        ];
        let tax = HashMap::from([(Fips::from_code("06075"), 0.0065)]);
        let table = HousingTable::join(
            prices,
            &rents,
            &AsofSeries::default(),
            &AsofSeries::default(),
            &tax,
            0.3,
        );
        assert!(
            table
                .rows()
                .iter()
                .all(|row| row.property_tax_rate == Some(0.0065))
        );
    }

    #[test]
    fn joined_keys_are_unique() {
        let prices = vec![
            price("06075", day(0), 1_000_000.0),
            price("48001", day(0), 200_000.0),
            price("06075", day(30), 1_010_000.0),
        ];
        let rents = vec![
            rent("06075", day(0), 36_000.0),
            rent("48001", day(0), 14_400.0),
            rent("06075", day(30), 36_200.0),
        ];
        let table = HousingTable::join(
            prices,
            &rents,
            &AsofSeries::default(),
            &AsofSeries::default(),
            &HashMap::new(),
            0.3,
        );
        let mut keys: Vec<_> = table
            .rows()
            .iter()
            .map(|r| (r.fips.clone(), r.date))
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), table.len());
    }
}
