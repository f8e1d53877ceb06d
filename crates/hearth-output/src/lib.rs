#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hearth-econ/hearth/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod snapshot;

pub use export::{HISTORY_FILE, PublishError, write_history};
pub use snapshot::{SNAPSHOT_FILE, SnapshotRecord, latest_qualifying_date, write_snapshot};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
