//! Platform writers.
//!
//! Every output file goes through the same state machine: a platform header, zero or more
//! body items, and a platform footer. The platform specific pieces live in [`android`],
//! [`ios`] and [`web`]; this module drives them for strings, and [`constants`] drives them
//! for constants and analytics tags.

pub mod android;
pub mod constants;
pub mod ios;
pub mod web;

use std::{
    fmt::{Display, Formatter},
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    config::AndroidEscaping,
    error::Error,
    report::{Report, Warning},
    types::{Strand, StrandKind},
};

pub use constants::{ConstantGroup, write_constants};

lazy_static! {
    static ref HTML_START_TAG: Regex = Regex::new(r"(?i)<html>").unwrap();
    static ref HTML_END_TAG: Regex = Regex::new(r"(?i)</html>").unwrap();
}

/// The platform a run renders for. It decides headers, comment syntax, escaping and
/// declaration syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
    Web,
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Android => write!(f, "Android"),
            Platform::Ios => write!(f, "iOS"),
            Platform::Web => write!(f, "Web"),
        }
    }
}

/// Accepts `"android"`, `"ios"` and `"web"` in any case, surrounding whitespace ignored.
///
/// # Example
/// ```rust
/// use weave::formats::Platform;
/// use std::str::FromStr;
/// assert_eq!(Platform::from_str("iOS").unwrap(), Platform::Ios);
/// assert!(Platform::from_str("windows").is_err());
/// ```
impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "web" => Ok(Platform::Web),
            _ => Err(Error::UnknownPlatform(s.to_string())),
        }
    }
}

impl Platform {
    /// Parses a comma separated platforms cell. Unknown names are ignored.
    pub fn parse_list(cell: &str) -> Vec<Platform> {
        cell.split(',')
            .filter_map(|name| name.parse().ok())
            .collect()
    }

    /// A row is for this platform when its platforms cell names no known platform, or
    /// names this one.
    pub fn is_targeted_by(&self, cell: Option<&str>) -> bool {
        let platforms = cell.map(Platform::parse_list).unwrap_or_default();
        platforms.is_empty() || platforms.contains(self)
    }
}

/// Creates (or truncates) the file at `path`, hands a buffered writer to `write`, and
/// flushes it whatever `write` returns. Missing parent directories are created.
pub fn write_scoped<P, F>(path: P, title: &str, write: F) -> Result<(), Error>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), Error>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let result = write(&mut writer);
    let flushed = writer.flush();
    result?;
    flushed?;

    tracing::info!("Wrote {} to file: {}", title, path.display());
    Ok(())
}

/// Writes every strand for one language: header, one body item per strand, footer.
///
/// A strand that fails to render or write is reported and skipped; the rest of the file is
/// still written.
pub fn write_strings<W: Write>(
    out: &mut W,
    platform: Platform,
    escaping: AndroidEscaping,
    language: &str,
    strands: &[Strand],
    report: &mut Report,
) -> Result<(), Error> {
    match platform {
        Platform::Android => android::write_header(out)?,
        Platform::Ios => {}
        Platform::Web => writeln!(out, "{}", web::HEADER)?,
    }

    // Headers emit nothing on Web, so the comma rule looks at the last string only.
    let last_string = strands
        .iter()
        .rposition(|strand| matches!(strand.kind, StrandKind::Language(_)));

    for (index, strand) in strands.iter().enumerate() {
        let rendered = match &strand.kind {
            StrandKind::Header => render_comment(platform, &strand.key),
            StrandKind::Language(_) => render_string(
                platform,
                escaping,
                &strand.key,
                strand.translation(language),
                Some(index) == last_string,
            ),
            StrandKind::Constant { .. } => Ok(None),
        };

        let written = rendered.and_then(|line| match line {
            Some(line) => writeln!(out, "{line}").map_err(Error::Io),
            None => Ok(()),
        });

        if let Err(e) = written {
            report.warn(Warning::RenderFailed {
                location: strand.location.clone(),
                reason: e.to_string(),
            });
        }
    }

    match platform {
        Platform::Android => writeln!(out, "{}", android::FOOTER)?,
        Platform::Ios => {}
        Platform::Web => writeln!(out, "{}", web::FOOTER)?,
    }
    Ok(())
}

/// Renders a header strand as a platform comment. Web has no comments.
pub fn render_comment(platform: Platform, text: &str) -> Result<Option<String>, Error> {
    match platform {
        Platform::Android => android::comment_line(text).map(Some),
        Platform::Ios => Ok(Some(ios::comment_line(text))),
        Platform::Web => Ok(None),
    }
}

/// Renders one translation, or `None` when the platform skips it (blank values everywhere
/// but Web).
pub fn render_string(
    platform: Platform,
    escaping: AndroidEscaping,
    key: &str,
    value: Option<&str>,
    is_last: bool,
) -> Result<Option<String>, Error> {
    let value = value.unwrap_or_default();
    if value.trim().is_empty() && platform != Platform::Web {
        return Ok(None);
    }

    let value = match platform {
        Platform::Web => prepare(&value.replace('\\', "\\\\")),
        Platform::Android | Platform::Ios => prepare(value),
    };
    match platform {
        Platform::Android => {
            android::string_line(key, &android::escape(&value, escaping)).map(Some)
        }
        Platform::Ios => Ok(Some(ios::string_line(key, &ios::escape(&value)))),
        Platform::Web => Ok(Some(web::string_line(key, &web::escape(&value), is_last))),
    }
}

// Substitutions shared by every platform, applied before the platform specific ones.
fn prepare(value: &str) -> String {
    value
        .trim()
        .replace('"', "\\\"")
        .replace("(c)", "\u{00A9}")
        .replace(['\n', '\r'], "")
}

fn strip_html_tags(value: &str) -> String {
    let value = HTML_START_TAG.replace_all(value, "");
    HTML_END_TAG.replace_all(&value, "").into_owned()
}

fn has_html_tag(value: &str) -> bool {
    HTML_START_TAG.is_match(value)
}
