//! Base location the input tables are served from.

use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::error::{DataError, Result};

/// Where the input tables live: an HTTP base URL or a local directory.
#[derive(Debug, Clone)]
pub enum DataHost {
    /// Tables are fetched over HTTP from a base URL.
    Http(String),
    /// Tables are read from a directory.
    Dir(PathBuf),
}

impl DataHost {
    /// Interpret a base-location string: `http(s)://` bases are fetched
    /// over the network, anything else is treated as a directory path.
    pub fn new(base: &str) -> Self {
        if base.starts_with("http://") || base.starts_with("https://") {
            Self::Http(base.trim_end_matches('/').to_string())
        } else {
            Self::Dir(PathBuf::from(base))
        }
    }

    /// Fetch the named table and return its body.
    pub fn fetch(&self, name: &str) -> Result<String> {
        match self {
            Self::Http(base) => {
                let url = format!("{base}/{name}");
                debug!("GET {url}");
                let response = reqwest::blocking::get(url.as_str())?;
                if !response.status().is_success() {
                    return Err(DataError::SourceUnavailable {
                        name: name.to_string(),
                        reason: format!("HTTP {}", response.status()),
                    });
                }
                Ok(response.text()?)
            }
            Self::Dir(dir) => {
                let path = dir.join(name);
                debug!("read {}", path.display());
                fs::read_to_string(&path).map_err(|e| DataError::SourceUnavailable {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
