#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hearth-econ/hearth/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod features;
pub mod stats;
pub mod table;
pub mod valuation;

// Re-export the key type shared across the pipeline.
pub use hearth_data::Fips;

pub use table::{HousingTable, Observation};
pub use valuation::ValuationConfig;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
