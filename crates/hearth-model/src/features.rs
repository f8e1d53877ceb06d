//! Derived inputs of the valuation formula.

use crate::table::{HousingTable, Observation};
use crate::valuation::ValuationConfig;

/// Fill `rent growth` and `extra tax deduction` on every row.
pub fn prepare(table: &mut HousingTable, config: &ValuationConfig) {
    for row in table.rows_mut() {
        row.rent_growth = rent_growth(row);
        row.extra_tax_deduction = extra_tax_deduction(row, config);
    }
}

/// Expected rent growth: economy-wide growth scaled by how far this
/// county's rent sits above the base rent, clamped non-negative.
///
/// Undefined when growth is undefined or rent is zero.
fn rent_growth(row: &Observation) -> Option<f64> {
    let growth = row.growth?;
    if row.rent == 0.0 {
        return None;
    }
    let raw = growth * (row.rent - row.rent_base) / row.rent;
    Some(raw.max(0.0))
}

/// Itemized deduction from mortgage interest, tiered by price: zero until
/// the interest clears the standard deduction, capped once the price
/// exceeds the mortgage-credit ceiling. The cap tier wins when both apply.
fn extra_tax_deduction(row: &Observation, config: &ValuationConfig) -> Option<f64> {
    let mut deduction = Some(0.0);
    if let Some(rate) = row.rate
        && row.house_price * rate > config.standard_tax_deduction
    {
        deduction = Some(row.house_price * rate);
    }
    if row.house_price > config.max_mortgage_credit {
        deduction = row
            .rate
            .map(|rate| config.max_mortgage_credit * rate - config.standard_tax_deduction);
    }
    deduction
}
