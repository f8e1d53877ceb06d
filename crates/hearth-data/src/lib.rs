#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hearth-econ/hearth/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod county;
mod decode;
pub mod error;
pub mod fips;
pub mod host;
pub mod series;

pub use error::{DataError, Result};
pub use fips::Fips;
pub use host::DataHost;

/// File names of the five input tables under the data host.
pub mod files {
    /// Average house price by county and date.
    pub const PRICE: &str = "house price by county.csv";
    /// Average monthly rent by county and date.
    pub const RENT: &str = "rent by county.csv";
    /// 30-year fixed mortgage rate time series.
    pub const MORTGAGE: &str = "mortgage rate 30 year fixed.csv";
    /// Nominal GDP growth time series.
    pub const GROWTH: &str = "nominal gdp growth.csv";
    /// Property tax rate by county FIPS.
    pub const PROPERTY_TAX: &str = "property tax by fips.csv";
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
