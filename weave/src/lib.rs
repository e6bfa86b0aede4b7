#![forbid(unsafe_code)]
//! Turns translation spreadsheets into platform resources.
//!
//! A configuration names CSV sources (usually spreadsheet exports) and the tasks to run on
//! them. Every row becomes a [`Strand`]; strands are verified, then rendered for a single
//! [`Platform`]:
//!
//! - **Strings**: Android `strings.xml`, iOS `.strings`, or Web JSON, one file per language
//! - **Constants**: a Kotlin `object`, a Swift `class`, or a nested JSON object
//! - **Analytics**: constants split into events and screens
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use weave::{Configs, HttpFetcher, Parser, Weaver};
//!
//! let configs = Configs::read_from("weave-config.json")?;
//! let report = Weaver::new(configs, HttpFetcher::new()?)?.weave()?;
//! for warning in &report.warnings {
//!     eprintln!("{warning}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Recoverable problems (duplicate keys, missing translations, unreachable sources) are
//! collected as [`Warning`]s on the returned [`Report`]. Anything else is an [`Error`] and
//! stops the run.

pub mod builders;
pub mod casing;
pub mod config;
pub mod download;
pub mod error;
pub mod formats;
pub mod pipeline;
pub mod report;
pub mod rows;
pub mod traits;
pub mod types;
pub mod verify;

// Re-export most used types for easy consumption
pub use crate::{
    casing::Casing,
    config::{AndroidEscaping, CONFIG_FILE_NAME, Configs, ConstantsConfig, StringsConfig},
    download::HttpFetcher,
    error::Error,
    formats::Platform,
    pipeline::Weaver,
    report::{Report, Warning},
    traits::{Fetcher, Parser},
    types::{Language, Location, Source, Strand, StrandKind},
};
