//! CSV row model: a downloaded sheet, its header row, and the walk over its data rows.
//!
//! Sheets are read in the Excel dialect (comma delimited, quoted fields). Empty cells are
//! `None`, so "no value" and "not in this row at all" look the same to the builders.

use std::io::BufRead;

use crate::{
    config::ColumnNames,
    error::Error,
    formats::Platform,
    report::{Report, Warning},
    traits::Parser,
    types::{Location, Source, Strand},
};

/// A whole sheet: the header row and every data row after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<Option<String>>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Parser for CsvTable {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = rdr.records();
        let headers = match records.next() {
            Some(record) => to_cells(&record?),
            None => return Ok(CsvTable::default()),
        };

        let mut rows = Vec::new();
        for record in records {
            rows.push(to_cells(&record?));
        }
        Ok(CsvTable { headers, rows })
    }
}

fn to_cells(record: &csv::StringRecord) -> Vec<Option<String>> {
    record
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                None
            } else {
                Some(cell.to_string())
            }
        })
        .collect()
}

/// Whether two column names match, trimmed and compared case-insensitively over all of
/// Unicode.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Where the key and platforms columns were found in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub key: usize,
    pub platforms: Option<usize>,
}

/// Finds the key and platforms columns and hands every other non-empty header cell to
/// `on_column`, so callers can resolve their own columns (languages, type, value).
///
/// Header names are compared trimmed and case-insensitively. A sheet without a key column
/// is a fatal error.
pub fn parse_headers<F>(
    headers: &[Option<String>],
    columns: &ColumnNames,
    source: &Source,
    mut on_column: F,
) -> Result<ColumnLayout, Error>
where
    F: FnMut(usize, &str),
{
    let mut key = None;
    let mut platforms = None;

    for (index, header) in headers.iter().enumerate() {
        let Some(header) = header.as_deref().map(str::trim) else {
            continue;
        };

        if same_name(header, &columns.key) {
            key = Some(index);
        } else if same_name(header, &columns.platforms) {
            platforms = Some(index);
        } else {
            on_column(index, header);
        }
    }

    let key = key.ok_or_else(|| Error::MissingKeyColumn {
        source_title: source.title.clone(),
        column: columns.key.clone(),
    })?;
    Ok(ColumnLayout { key, platforms })
}

/// One data row handed to a strand builder.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub key: &'a str,
    pub line: usize,
    pub source: &'a Source,
    cells: &'a [Option<String>],
}

impl<'a> Row<'a> {
    /// The cell at `index`, or `None` when it is empty or the row is too short.
    pub fn cell(&self, index: usize) -> Option<&'a str> {
        self.cells.get(index).and_then(|cell| cell.as_deref())
    }

    pub fn location(&self) -> Location {
        Location::new(&self.source.title, self.line)
    }
}

/// Walks the data rows of `table` (line 2 onwards) and builds the strand list.
///
/// - a row without a key is skipped with a warning;
/// - a key starting with the header marker becomes a [`Strand::header`];
/// - a row whose platforms cell excludes `platform` is skipped silently;
/// - anything else goes to `on_row`, whose strand (if any) is kept.
pub fn parse_rows<'t, F>(
    table: &'t CsvTable,
    source: &'t Source,
    layout: ColumnLayout,
    columns: &ColumnNames,
    platform: Platform,
    report: &mut Report,
    mut on_row: F,
) -> Vec<Strand>
where
    F: FnMut(&Row<'t>, &mut Report) -> Option<Strand>,
{
    let mut strands = Vec::new();

    for (index, cells) in table.rows.iter().enumerate() {
        // The header row is line 1.
        let line = index + 2;
        let location = || Location::new(&source.title, line);

        let key = cells
            .get(layout.key)
            .and_then(|cell| cell.as_deref())
            .map(str::trim)
            .unwrap_or_default();

        if key.is_empty() {
            report.warn(Warning::MissingKey(location()));
            continue;
        }

        let comment = (!columns.header_marker.is_empty())
            .then(|| key.strip_prefix(columns.header_marker.as_str()))
            .flatten();
        if let Some(comment) = comment {
            strands.push(Strand::header(comment.trim(), location()));
            continue;
        }

        if let Some(platforms) = layout.platforms {
            let cell = cells.get(platforms).and_then(|cell| cell.as_deref());
            if !platform.is_targeted_by(cell) {
                continue;
            }
        }

        let row = Row {
            key,
            line,
            source,
            cells,
        };
        if let Some(strand) = on_row(&row, report) {
            strands.push(strand);
        }
    }

    strands
}
