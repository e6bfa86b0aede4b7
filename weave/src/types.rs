//! Core types for weave.
//! The row model builds these; the verifier filters them; the platform writers render them.

use std::{collections::HashMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// Where a strand came from: the source title and the 1-based CSV line (the header row is line 1).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub source: String,
    pub line: usize,
}

impl Location {
    pub fn new(source: impl Into<String>, line: usize) -> Self {
        Self {
            source: source.into(),
            line,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {} from {}", self.line, self.source)
    }
}

/// One parsed unit of content: a comment header, a translated string, or a constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strand {
    /// Unique identifier. For headers this is the comment text.
    pub key: String,

    /// Provenance, used in every diagnostic about this strand.
    pub location: Location,

    pub kind: StrandKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrandKind {
    /// A `###` row, rendered as a comment where the platform has comments.
    Header,

    /// Map from language id to translated text.
    Language(HashMap<String, String>),

    /// A named constant. `type_name` is empty for untyped constants.
    Constant { type_name: String, tag: String },
}

impl Strand {
    pub fn header(comment: impl Into<String>, location: Location) -> Self {
        Self {
            key: comment.into(),
            location,
            kind: StrandKind::Header,
        }
    }

    pub fn language(key: impl Into<String>, location: Location) -> Self {
        Self {
            key: key.into(),
            location,
            kind: StrandKind::Language(HashMap::new()),
        }
    }

    pub fn constant(
        key: impl Into<String>,
        location: Location,
        type_name: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            location,
            kind: StrandKind::Constant {
                type_name: type_name.into(),
                tag: tag.into(),
            },
        }
    }

    /// Adds a translation for `language`. No-op on non-language strands.
    pub fn add_translation(&mut self, language: impl Into<String>, value: impl Into<String>) {
        if let StrandKind::Language(translations) = &mut self.kind {
            translations.insert(language.into(), value.into());
        }
    }

    /// Returns the translation for `language`, if this is a language strand that has one.
    pub fn translation(&self, language: &str) -> Option<&str> {
        match &self.kind {
            StrandKind::Language(translations) => translations.get(language).map(String::as_str),
            _ => None,
        }
    }

    /// Headers are comments; everything else is content and subject to key validation.
    pub fn is_content(&self) -> bool {
        !matches!(self.kind, StrandKind::Header)
    }

    /// The constant type, or `None` for non-constant strands.
    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            StrandKind::Constant { type_name, .. } => Some(type_name),
            _ => None,
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            StrandKind::Header => write!(f, "Header {{ {} }}", self.key),
            StrandKind::Language(translations) => write!(
                f,
                "Strand {{ key: {}, translations: {} }}",
                self.key,
                translations.len()
            ),
            StrandKind::Constant { type_name, tag } => write!(
                f,
                "Constant {{ key: {}, type: {}, tag: {} }}",
                self.key, type_name, tag
            ),
        }
    }
}

/// The two kinds of analytics tags. Analytics strands store [`AnalyticsType::group_name`]
/// as their constant type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsType {
    Event,
    Screen,
}

impl AnalyticsType {
    /// Accepts `event(s)` and `screen(s)` in any case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "event" | "events" => Some(AnalyticsType::Event),
            "screen" | "screens" => Some(AnalyticsType::Screen),
            _ => None,
        }
    }

    pub fn group_name(&self) -> &'static str {
        match self {
            AnalyticsType::Event => "Events",
            AnalyticsType::Screen => "Screens",
        }
    }
}

/// One CSV endpoint contributing rows to a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

/// A target language: the CSV column header it is read from and the file it is written to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Language {
    pub id: String,
    pub path: String,
}
