//! Verification of a task's merged strand list before it is written.
//!
//! Key syntax problems are fatal. Duplicates and missing translations are warnings: the
//! later duplicate wins, and a string with no translation at all is dropped.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    report::{Report, Warning},
    types::{Strand, StrandKind},
};

lazy_static! {
    static ref ILLEGAL_KEY_CHARACTER: Regex = Regex::new(r"[^A-Za-z0-9_]").unwrap();
}

/// Fails on the first content strand whose key has a space or a character outside
/// `[A-Za-z0-9_]`. Header strands are not checked.
pub fn verify_keys(strands: &[Strand]) -> Result<(), Error> {
    for strand in strands.iter().filter(|strand| strand.is_content()) {
        if strand.key.contains(' ') {
            return Err(Error::KeyWithSpace(strand.location.clone()));
        }
        if ILLEGAL_KEY_CHARACTER.is_match(&strand.key) {
            return Err(Error::KeyWithIllegalCharacters(strand.location.clone()));
        }
    }
    Ok(())
}

/// Verifies the strands of a strings task configured with `language_count` languages.
pub fn verify_strings(
    strands: Vec<Strand>,
    language_count: usize,
    report: &mut Report,
) -> Result<Vec<Strand>, Error> {
    verify_keys(&strands)?;
    let strands = remove_duplicates(strands, false, report);

    Ok(strands
        .into_iter()
        .filter(|strand| {
            let StrandKind::Language(translations) = &strand.kind else {
                return true;
            };
            if translations.is_empty() {
                report.warn(Warning::NoTranslations(strand.location.clone()));
                return false;
            }
            if translations.len() < language_count {
                report.warn(Warning::MissingTranslations(strand.location.clone()));
            }
            true
        })
        .collect())
}

/// Verifies the strands of a constants or analytics task. Duplicates are matched on key
/// and type.
pub fn verify_constants(strands: Vec<Strand>, report: &mut Report) -> Result<Vec<Strand>, Error> {
    verify_keys(&strands)?;
    Ok(remove_duplicates(strands, true, report))
}

// Keeps the last strand of every group and warns once per strand it replaces. Groups are
// keyed on the key alone, or on key and type when `by_type` is set. Types differing only in
// case land in the same container, so they count as the same type.
fn remove_duplicates(strands: Vec<Strand>, by_type: bool, report: &mut Report) -> Vec<Strand> {
    let mut removed = vec![false; strands.len()];
    {
        let mut latest: HashMap<(&str, String), usize> = HashMap::new();
        for (index, strand) in strands.iter().enumerate() {
            if !strand.is_content() {
                continue;
            }
            let type_name = if by_type {
                strand.type_name().unwrap_or_default().to_lowercase()
            } else {
                String::new()
            };

            if let Some(previous) = latest.insert((&strand.key, type_name), index) {
                removed[previous] = true;
                report.warn(Warning::DuplicateKey {
                    first: strands[previous].location.clone(),
                    second: strand.location.clone(),
                    same_type: by_type,
                });
            }
        }
    }

    strands
        .into_iter()
        .zip(removed)
        .filter_map(|(strand, removed)| (!removed).then_some(strand))
        .collect()
}
