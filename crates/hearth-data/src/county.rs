//! County-level inputs: house prices, rents and property tax rates.

use std::collections::HashMap;
use std::io::Read;

use chrono::NaiveDate;
use log::info;
use serde::Deserialize;

use crate::decode::{format_error, parse_date};
use crate::error::Result;
use crate::fips::Fips;

/// One observed house price for a county at a date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceObservation {
    /// County key.
    pub fips: Fips,
    /// State name.
    pub state: String,
    /// County name.
    pub county: String,
    /// Observation date.
    pub date: NaiveDate,
    /// Average house price.
    pub house_price: f64,
}

/// One observed rent for a county at a date, annualized.
#[derive(Debug, Clone, PartialEq)]
pub struct RentObservation {
    /// County key.
    pub fips: Fips,
    /// Observation date.
    pub date: NaiveDate,
    /// Annualized rent (the source value is monthly).
    pub rent: f64,
}

#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(rename = "state fips")]
    state_fips: String,
    #[serde(rename = "county fips")]
    county_fips: String,
    state: String,
    county: String,
    #[serde(rename = "house price")]
    house_price: f64,
    date: String,
}

#[derive(Debug, Deserialize)]
struct RentRecord {
    #[serde(rename = "state fips")]
    state_fips: String,
    #[serde(rename = "county fips")]
    county_fips: String,
    rent: f64,
    date: String,
}

#[derive(Debug, Deserialize)]
struct TaxRecord {
    fips: String,
    #[serde(rename = "property tax rate")]
    property_tax_rate: f64,
}

/// Read the price-by-county table. Columns beyond the required ones are
/// ignored; a non-numeric price fails the run.
pub fn read_prices<R: Read>(reader: R, name: &str) -> Result<Vec<PriceObservation>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in rdr.deserialize::<PriceRecord>() {
        let record = record.map_err(|e| format_error(name, e))?;
        rows.push(PriceObservation {
            fips: Fips::from_parts(&record.state_fips, &record.county_fips),
            state: record.state,
            county: record.county,
            date: parse_date(name, &record.date)?,
            house_price: record.house_price,
        });
    }
    info!("{name}: {} price rows", rows.len());
    Ok(rows)
}

/// Read the rent-by-county table, annualizing the monthly rent.
pub fn read_rents<R: Read>(reader: R, name: &str) -> Result<Vec<RentObservation>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in rdr.deserialize::<RentRecord>() {
        let record = record.map_err(|e| format_error(name, e))?;
        rows.push(RentObservation {
            fips: Fips::from_parts(&record.state_fips, &record.county_fips),
            date: parse_date(name, &record.date)?,
            rent: record.rent * 12.0, // monthly source, annualized
        });
    }
    info!("{name}: {} rent rows", rows.len());
    Ok(rows)
}

/// Read the property-tax-by-FIPS table into a lookup keyed by county.
/// Rates are already fractions; the key is time-invariant.
pub fn read_property_tax<R: Read>(reader: R, name: &str) -> Result<HashMap<Fips, f64>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rates = HashMap::new();
    for record in rdr.deserialize::<TaxRecord>() {
        let record = record.map_err(|e| format_error(name, e))?;
        rates.insert(Fips::from_code(&record.fips), record.property_tax_rate);
    }
    info!("{name}: {} property tax rates", rates.len());
    Ok(rates)
}
