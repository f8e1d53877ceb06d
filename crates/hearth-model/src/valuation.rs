//! The capitalization-rate valuation.
//!
//! Backs the intrinsic house price out of the net annual benefit of owning
//! divided by the effective annual cost rate, then derives return metrics
//! against the observed price.

use crate::table::{HousingTable, Observation};

/// Economic constants of the valuation formula.
#[derive(Debug, Clone)]
pub struct ValuationConfig {
    /// Private mortgage insurance rate (default: 0.01).
    pub pmi_rate: f64,
    /// Federal tax bracket used to value the deduction shield
    /// (default: 0.30).
    pub federal_income_tax_rate: f64,
    /// Annual depreciation rate charged against the base home
    /// (default: 0.03).
    pub depreciation_rate: f64,
    /// Standard itemized deduction, in dollars (default: 24,000).
    pub standard_tax_deduction: f64,
    /// Price ceiling for deductible mortgage interest, in dollars
    /// (default: 1,000,000).
    pub max_mortgage_credit: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            pmi_rate: 0.01,
            federal_income_tax_rate: 0.30,
            depreciation_rate: 0.03,
            standard_tax_deduction: 24_000.0,
            max_mortgage_credit: 1_000_000.0,
        }
    }
}

/// Fill `expected house price` and the three return metrics on every row.
pub fn apply(table: &mut HousingTable, config: &ValuationConfig) {
    for row in table.rows_mut() {
        row.expected_house_price = intrinsic_value(row, config);
        row.total_return = total_return(row);
        row.net_annual_return = net_annual_return(row, config);
        row.annual_return = annual_return(row, config);
    }
}

/// Net annual benefit of owning (rent earned, plus the tax shield on the
/// extra deduction, minus depreciation charged against the base home rather
/// than this one) over the effective annual cost rate (financing, insurance
/// and property tax, net of expected rent growth).
///
/// A zero cost rate is undefined; a negative one passes through and yields
/// a negative value.
fn intrinsic_value(row: &Observation, config: &ValuationConfig) -> Option<f64> {
    let rate = row.rate?;
    let deduction = row.extra_tax_deduction?;
    let tax_rate = row.property_tax_rate?;
    let rent_growth = row.rent_growth?;

    let benefit = row.rent + deduction * config.federal_income_tax_rate
        - row.house_price_base * config.depreciation_rate;
    let cost_rate = rate + config.pmi_rate + tax_rate - rent_growth;
    (cost_rate != 0.0).then(|| benefit / cost_rate)
}

fn total_return(row: &Observation) -> Option<f64> {
    let expected = row.expected_house_price?;
    (row.house_price != 0.0).then(|| (expected - row.house_price) / row.house_price)
}

fn net_annual_return(row: &Observation, config: &ValuationConfig) -> Option<f64> {
    Some(row.total_return? * (row.rate? + config.pmi_rate))
}

fn annual_return(row: &Observation, config: &ValuationConfig) -> Option<f64> {
    Some(row.net_annual_return? + row.rate? + config.pmi_rate)
}
