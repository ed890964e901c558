//! Error type for the fallible edges of the crate
//!
//! Geometry queries never fail; they return `Option` or a documented default.
//! Only loading settings and scenario data from disk can go wrong.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeomError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

pub type Result<T> = std::result::Result<T, GeomError>;
