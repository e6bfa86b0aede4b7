//! Traits at the I/O seams of weave: reading inputs and fetching sources.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use crate::{error::Error, types::Source};

/// A trait for parsing an input (configuration, CSV sheet) from a reader or a file.
///
/// # Example
///
/// ```rust,no_run
/// use weave::{config::Configs, traits::Parser};
/// let configs = Configs::read_from("weave-config.json")?;
/// println!("{}", configs.platform);
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

/// Retrieves the CSV text behind a [`Source`].
///
/// An `Err` is not fatal to the run: the orchestrator records a warning and the source
/// contributes no strands.
pub trait Fetcher {
    fn fetch(&self, source: &Source) -> Result<String, Error>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, source: &Source) -> Result<String, Error> {
        (**self).fetch(source)
    }
}
