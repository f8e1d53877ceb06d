//! Full-history export.

use std::fs;
use std::path::{Path, PathBuf};

use hearth_model::HousingTable;
use log::info;
use thiserror::Error;

/// File name of the full valuation history output.
pub const HISTORY_FILE: &str = "housing valuation.csv";

/// Errors that can occur while publishing the output tables.
#[derive(Debug, Error)]
pub enum PublishError {
    /// No date has enough county coverage to anchor the latest snapshot.
    #[error("no date has more than {min_rows} rows; cannot select a snapshot date")]
    NoQualifyingDate {
        /// The coverage threshold that no date reached.
        min_rows: usize,
    },

    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the full history table, all columns, into `dir` and return the
/// written path.
pub fn write_history(dir: &Path, table: &HousingTable) -> Result<PathBuf, PublishError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in table.rows() {
        wtr.serialize(row)?;
    }
    let body = wtr.into_inner().map_err(|e| e.into_error())?;

    let path = dir.join(HISTORY_FILE);
    write_atomic(&path, &body)?;
    info!("wrote {} history rows to {}", table.len(), path.display());
    Ok(path)
}

/// Write to a temporary sibling and rename into place, so a failing run
/// cannot leave a truncated output file behind.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("csv.tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}
