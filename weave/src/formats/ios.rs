//! iOS output: `.strings` files and Swift constant classes.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::strip_html_tags;

lazy_static! {
    // A `%s` / `%1$s` placeholder, or any other percent sign.
    static ref PERCENT: Regex = Regex::new(r"%(\d+\$)?s|%").unwrap();
}

/// `/* text */`, preceded by a blank line.
pub fn comment_line(text: &str) -> String {
    format!("\n/* {text} */")
}

/// `"key" = "value";`. `value` must already be escaped with [`escape`].
pub fn string_line(key: &str, value: &str) -> String {
    format!("\"{key}\" = \"{value}\";")
}

/// Escapes a prepared value for a `.strings` file.
///
/// String placeholders become object placeholders (`%s` -> `%@`, `%1$s` -> `%1$@`), the
/// `<html>` markers are dropped, and every other `%` is doubled.
pub fn escape(value: &str) -> String {
    let value = strip_html_tags(value);
    PERCENT
        .replace_all(&value, |caps: &Captures| match (&caps[0], caps.get(1)) {
            ("%", _) => "%%".to_string(),
            (_, Some(position)) => format!("%{}@", position.as_str()),
            (_, None) => "%@".to_string(),
        })
        .into_owned()
}

/// Opening of a constants file: the generated-file comment and, optionally, the top-level class.
pub fn constants_header(object_name: Option<&str>, description: &str) -> String {
    let mut header = format!("//  {description}\n\n");
    if let Some(name) = object_name {
        header.push_str(&format!("class {name} {{\n"));
    }
    header
}

pub fn declaration(key: &str) -> String {
    format!("static let {key}")
}

/// A constant tag as the body of a Swift string literal.
pub fn literal(tag: &str) -> String {
    tag.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn group_header(name: &str) -> String {
    format!("enum {name} {{")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_placeholders() {
        assert_eq!(escape("Hello %s"), "Hello %@");
        assert_eq!(escape("%1$s and %2$s"), "%1$@ and %2$@");
    }

    #[test]
    fn test_escape_doubles_other_percent_signs() {
        assert_eq!(escape("Save 10%"), "Save 10%%");
        assert_eq!(escape("%d items, 5% off, for %s"), "%%d items, 5%% off, for %@");
    }

    #[test]
    fn test_escape_strips_html_markers() {
        assert_eq!(escape("<html><b>Bold</b></HTML>"), "<b>Bold</b>");
    }

    #[test]
    fn test_string_and_comment_lines() {
        assert_eq!(string_line("title", "Title"), "\"title\" = \"Title\";");
        assert_eq!(comment_line("Section"), "\n/* Section */");
    }

    #[test]
    fn test_constants_header() {
        assert_eq!(
            constants_header(Some("Tags"), "Generated"),
            "//  Generated\n\nclass Tags {\n"
        );
        assert_eq!(constants_header(None, "Generated"), "//  Generated\n\n");
    }
}
