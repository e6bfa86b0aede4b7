//! Fetching source sheets over HTTP, or from disk for local paths.

use std::{fs::File, io::Read, path::Path, time::Duration};

use reqwest::{StatusCode, blocking::Client, header::USER_AGENT};
use tracing::info;

use crate::{error::Error, traits::Fetcher, types::Source};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads `http(s)://` sources with a blocking client and reads anything else as a local
/// file path (`file://` prefix optional). Bodies are decoded BOM-aware: UTF-8 passes
/// through, UTF-16 with a BOM is converted.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }

    fn download(&self, url: &str) -> Result<String, Error> {
        info!("Connecting to {}", url);
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, format!("weave/{}", env!("CARGO_PKG_VERSION")))
            .send()?;

        let status = response.status();
        info!("Response Code: {}", status.as_u16());
        if status != StatusCode::OK {
            return Err(Error::download_error(url, status.to_string()));
        }

        decode(response)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, source: &Source) -> Result<String, Error> {
        match local_path(&source.url) {
            Some(path) => {
                info!("Reading {}", path.display());
                decode(File::open(path)?)
            }
            None => self.download(&source.url),
        }
    }
}

/// The filesystem path behind a source url, or `None` for a remote url.
pub fn local_path(url: &str) -> Option<&Path> {
    if let Some(path) = url.strip_prefix("file://") {
        return Some(Path::new(path));
    }
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        None
    } else {
        Some(Path::new(url))
    }
}

// Auto-detect BOM, decode to UTF-8; a UTF-8 BOM is dropped
fn decode<R: Read>(reader: R) -> Result<String, Error> {
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .strip_bom(true)
        .build(reader);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
    Ok(decoded)
}
