//! The parsed `weave-config.json`.
//!
//! Configuration is read once and never mutated. Values derived while parsing a source
//! (column indices and the like) live in the row model, not here.

use std::{io::BufRead, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    casing::Casing,
    error::Error,
    formats::Platform,
    traits::Parser,
    types::{Language, Source},
};

/// Default name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "weave-config.json";

/// Everything read from the configuration file. It can have a `strings` task and any number
/// of `constants` and `analytics` tasks, all rendered for the same `platform`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configs {
    pub platform: String,

    #[serde(default = "default_header_column")]
    pub header_column_name: String,

    #[serde(default = "default_key_column")]
    pub key_column_name: String,

    #[serde(default = "default_platforms_column")]
    pub platforms_column_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<StringsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<Vec<ConstantsConfig>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Vec<ConstantsConfig>>,

    #[serde(default)]
    pub android_escaping: AndroidEscaping,
}

fn default_header_column() -> String {
    "###".to_string()
}

fn default_key_column() -> String {
    "key".to_string()
}

fn default_platforms_column() -> String {
    "platforms".to_string()
}

fn default_value_column() -> String {
    "value".to_string()
}

fn default_true() -> bool {
    true
}

impl Configs {
    /// Parses the configured platform name, case-insensitively.
    pub fn platform(&self) -> Result<Platform, Error> {
        self.platform.parse()
    }

    /// Column names shared by every task.
    pub fn columns(&self) -> ColumnNames {
        ColumnNames {
            key: self.key_column_name.clone(),
            header_marker: self.header_column_name.clone(),
            platforms: self.platforms_column_name.clone(),
        }
    }
}

impl Parser for Configs {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }
}

/// Names of the columns every sheet shares, plus the marker that turns a key into a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub key: String,
    pub header_marker: String,
    pub platforms: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            key: default_key_column(),
            header_marker: default_header_column(),
            platforms: default_platforms_column(),
        }
    }
}

/// The strings task: every source is merged, then one file is written per language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringsConfig {
    #[serde(default)]
    pub sources: Vec<Source>,

    #[serde(default)]
    pub languages: Vec<Language>,
}

impl StringsConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.languages.is_empty() {
            return Err(Error::NoLanguages);
        }
        Ok(())
    }
}

/// A constants (or analytics) task: every source is merged into a single output file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantsConfig {
    pub title: String,

    #[serde(default)]
    pub sources: Vec<Source>,

    #[serde(default)]
    pub path: String,

    /// Only used on Android, where it is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    /// Overrides the top-level key column name for this task's sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_column_name: Option<String>,

    /// Empty means every constant is untyped.
    #[serde(default)]
    pub type_column_name: String,

    #[serde(default = "default_value_column")]
    pub value_column_name: String,

    #[serde(default)]
    pub values_align_column: usize,

    #[serde(default = "Casing::key_default")]
    pub key_casing: Casing,

    #[serde(default = "Casing::type_default")]
    pub type_casing: Casing,

    #[serde(default = "default_true")]
    pub is_top_level_class_created: bool,
}

impl ConstantsConfig {
    /// Creates a task with every optional field at its default.
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sources: Vec::new(),
            path: path.into(),
            package_name: None,
            key_column_name: None,
            type_column_name: String::new(),
            value_column_name: default_value_column(),
            values_align_column: 0,
            key_casing: Casing::key_default(),
            type_casing: Casing::type_default(),
            is_top_level_class_created: true,
        }
    }

    pub fn validate(&self, platform: Platform) -> Result<(), Error> {
        if platform == Platform::Android && self.package_name.is_none() {
            return Err(Error::MissingPackageName(self.title.clone()));
        }
        if self.values_align_column % 4 != 0 {
            return Err(Error::InvalidAlignColumn {
                title: self.title.clone(),
                column: self.values_align_column,
            });
        }
        Ok(())
    }

    /// The shared column names with this task's key column override applied.
    pub fn columns(&self, shared: &ColumnNames) -> ColumnNames {
        match &self.key_column_name {
            Some(key) => ColumnNames {
                key: key.clone(),
                ..shared.clone()
            },
            None => shared.clone(),
        }
    }

    /// Name of the top-level class: the file name without its platform extension.
    pub fn object_name(&self, platform: Platform) -> String {
        let file_name = Path::new(&self.path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        match platform {
            Platform::Android => file_name.trim_end_matches(".kt").to_string(),
            Platform::Ios => file_name.trim_end_matches(".swift").to_string(),
            Platform::Web => String::new(),
        }
    }
}

/// Android substitutions that are easy to get wrong on identifiers or stray percent signs,
/// so they can be switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidEscaping {
    /// Replace `-` with an en-dash.
    #[serde(default)]
    pub replace_dashes: bool,

    /// Replace `" % "` with `" %% "`.
    #[serde(default = "default_true")]
    pub pad_percent: bool,
}

impl Default for AndroidEscaping {
    fn default() -> Self {
        Self {
            replace_dashes: false,
            pad_percent: true,
        }
    }
}
