//! Strand builders: turn a parsed sheet into strands for one task.
//!
//! Each builder first resolves the columns it needs from the header row into an immutable
//! index map, fails if a required column is missing, and only then walks the data rows.

use crate::{
    config::{ColumnNames, ConstantsConfig},
    error::Error,
    formats::Platform,
    report::{Report, Warning},
    rows::{CsvTable, parse_headers, parse_rows, same_name},
    types::{AnalyticsType, Language, Source, Strand},
};

/// Resolved language columns, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageColumns(Vec<(String, usize)>);

impl LanguageColumns {
    /// Matches every language id against the trimmed header names, case-insensitively. The
    /// first matching column wins.
    pub fn resolve(
        languages: &[Language],
        headers: &[(usize, String)],
        source: &Source,
    ) -> Result<Self, Error> {
        let mut columns = Vec::with_capacity(languages.len());
        for language in languages {
            let index = headers
                .iter()
                .find(|(_, name)| same_name(name, &language.id))
                .map(|(index, _)| *index)
                .ok_or_else(|| Error::MissingLanguageColumn {
                    language: language.id.clone(),
                    source_title: source.title.clone(),
                })?;
            columns.push((language.id.clone(), index));
        }
        Ok(LanguageColumns(columns))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(id, index)| (id.as_str(), *index))
    }
}

/// Builds the language strands of one strings source.
pub fn language_strands(
    table: &CsvTable,
    source: &Source,
    languages: &[Language],
    columns: &ColumnNames,
    platform: Platform,
    report: &mut Report,
) -> Result<Vec<Strand>, Error> {
    let mut headers = Vec::new();
    let layout = parse_headers(&table.headers, columns, source, |index, name| {
        headers.push((index, name.to_string()))
    })?;
    let language_columns = LanguageColumns::resolve(languages, &headers, source)?;

    Ok(parse_rows(
        table,
        source,
        layout,
        columns,
        platform,
        report,
        |row, _| {
            let mut strand = Strand::language(row.key, row.location());
            for (id, index) in language_columns.iter() {
                if let Some(value) = row.cell(index) {
                    strand.add_translation(id, value);
                }
            }
            Some(strand)
        },
    ))
}

// Index of the header named `name`, compared case-insensitively.
fn find_column(headers: &[(usize, String)], name: &str) -> Option<usize> {
    if name.trim().is_empty() {
        return None;
    }
    headers
        .iter()
        .find(|(_, header)| same_name(header, name))
        .map(|(index, _)| *index)
}

/// Builds the constant strands of one constants source. The type column is optional; the
/// value column is required.
pub fn constant_strands(
    table: &CsvTable,
    source: &Source,
    config: &ConstantsConfig,
    columns: &ColumnNames,
    platform: Platform,
    report: &mut Report,
) -> Result<Vec<Strand>, Error> {
    let mut headers = Vec::new();
    let layout = parse_headers(&table.headers, columns, source, |index, name| {
        headers.push((index, name.to_string()))
    })?;

    let type_column = find_column(&headers, &config.type_column_name);
    let value_column = find_column(&headers, &config.value_column_name).ok_or_else(|| {
        Error::MissingValueColumn {
            source_title: source.title.clone(),
            column: config.value_column_name.clone(),
        }
    })?;

    Ok(parse_rows(
        table,
        source,
        layout,
        columns,
        platform,
        report,
        |row, report| {
            let Some(tag) = row.cell(value_column).map(str::trim) else {
                report.warn(Warning::MissingTag(row.location()));
                return None;
            };
            let type_name = type_column
                .and_then(|index| row.cell(index))
                .map(str::trim)
                .unwrap_or_default();
            Some(Strand::constant(row.key, row.location(), type_name, tag))
        },
    ))
}

/// Builds the analytics strands of one analytics source. Both the type and value columns
/// are required, and every row's type must be an event or a screen.
pub fn analytics_strands(
    table: &CsvTable,
    source: &Source,
    config: &ConstantsConfig,
    columns: &ColumnNames,
    platform: Platform,
    report: &mut Report,
) -> Result<Vec<Strand>, Error> {
    let mut headers = Vec::new();
    let layout = parse_headers(&table.headers, columns, source, |index, name| {
        headers.push((index, name.to_string()))
    })?;

    let type_column = find_column(&headers, &config.type_column_name).ok_or_else(|| {
        Error::MissingTypeColumn {
            source_title: source.title.clone(),
            column: config.type_column_name.clone(),
        }
    })?;
    let value_column = find_column(&headers, &config.value_column_name).ok_or_else(|| {
        Error::MissingValueColumn {
            source_title: source.title.clone(),
            column: config.value_column_name.clone(),
        }
    })?;

    Ok(parse_rows(
        table,
        source,
        layout,
        columns,
        platform,
        report,
        |row, report| {
            let Some(analytics_type) = row.cell(type_column).and_then(AnalyticsType::parse)
            else {
                report.warn(Warning::MissingType(row.location()));
                return None;
            };
            let Some(tag) = row.cell(value_column).map(str::trim) else {
                report.warn(Warning::MissingTag(row.location()));
                return None;
            };
            Some(Strand::constant(
                row.key,
                row.location(),
                analytics_type.group_name(),
                tag,
            ))
        },
    ))
}
