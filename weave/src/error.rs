//! All error types for the weave crate.
//!
//! Every variant here is fatal: it aborts the run. Conditions the pipeline can
//! recover from (a duplicate key, a missing translation, an unreachable source)
//! are reported as [`crate::report::Warning`]s instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Location;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown platform `{0}`, the platform must be Android, iOS, or Web")]
    UnknownPlatform(String),

    #[error("please provide at least one language")]
    NoLanguages,

    #[error("there must be a column marked '{column}' with the keys in {source_title}")]
    MissingKeyColumn { source_title: String, column: String },

    #[error("{language} in {source_title} does not have any translations")]
    MissingLanguageColumn {
        language: String,
        source_title: String,
    },

    #[error("value column with name '{column}' not found in {source_title}")]
    MissingValueColumn { source_title: String, column: String },

    #[error("type column with name '{column}' not found in {source_title}")]
    MissingTypeColumn { source_title: String, column: String },

    #[error("{0} contains a space in its key")]
    KeyWithSpace(Location),

    #[error("{0} contains some illegal characters")]
    KeyWithIllegalCharacters(Location),

    #[error("please provide a package name for Android in {0}")]
    MissingPackageName(String),

    #[error("valuesAlignColumn must be a multiple of 4 in {title}, got {column}")]
    InvalidAlignColumn { title: String, column: usize },

    #[error("config file {0} not found in current or parent directory")]
    ConfigNotFound(PathBuf),

    #[error("download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new download error for the given url.
    pub fn download_error(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Download {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
