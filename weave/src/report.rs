//! Non-fatal diagnostics collected over a run.
//!
//! Every [`Warning`] is logged through `tracing` as soon as it is recorded and kept on the
//! [`Report`] so callers (and tests) can inspect what happened.

use std::{fmt::Display, path::PathBuf};

use crate::types::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A data row without a key.
    MissingKey(Location),

    /// A constant row without a value.
    MissingTag(Location),

    /// An analytics row whose type is neither an event nor a screen.
    MissingType(Location),

    /// Two content strands share a key (and a type, for constants). The second one wins.
    DuplicateKey {
        first: Location,
        second: Location,
        same_type: bool,
    },

    /// A string without any translation; it is dropped.
    NoTranslations(Location),

    /// A string missing at least one configured language; it is kept.
    MissingTranslations(Location),

    /// A source could not be downloaded or read and contributed nothing.
    SourceUnavailable { title: String, reason: String },

    /// A single strand could not be rendered and was skipped.
    RenderFailed { location: Location, reason: String },

    /// A task had nothing left to write after verification.
    NothingToWrite(String),

    NoStringsConfig,

    NoConstantsConfig,
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::MissingKey(location) => {
                write!(f, "{location} does not have a key and will not be parsed")
            }
            Warning::MissingTag(location) => {
                write!(f, "{location} has no tag and will not be parsed")
            }
            Warning::MissingType(location) => {
                write!(f, "{location} has no valid type and will not be parsed")
            }
            Warning::DuplicateKey {
                first,
                second,
                same_type,
            } => {
                let what = if *same_type { "key and type" } else { "key" };
                write!(
                    f,
                    "{first} and {second} have the same {what}. The second one will be used"
                )
            }
            Warning::NoTranslations(location) => {
                write!(f, "{location} has no translations so it will not be parsed")
            }
            Warning::MissingTranslations(location) => {
                write!(f, "{location} is missing at least one translation")
            }
            Warning::SourceUnavailable { title, reason } => {
                write!(f, "{title} could not be downloaded: {reason}")
            }
            Warning::RenderFailed { location, reason } => {
                write!(f, "{location} could not be written: {reason}")
            }
            Warning::NothingToWrite(title) => write!(f, "No {title} strands to write"),
            Warning::NoStringsConfig => write!(f, "No Strings config found"),
            Warning::NoConstantsConfig => write!(f, "No Constants configs found"),
        }
    }
}

/// Outcome of a run: the warnings raised and the files written, in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub warnings: Vec<Warning>,
    pub written: Vec<PathBuf>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn record_written(&mut self, path: impl Into<PathBuf>) {
        self.written.push(path.into());
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
