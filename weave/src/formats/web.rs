//! Web output: flat JSON objects for strings, nested JSON objects for constants.

use super::strip_html_tags;

pub const HEADER: &str = "{";
pub const FOOTER: &str = "}";

const INDENT: &str = "    ";

/// `"key": "value"`, followed by a comma unless this is the last entry.
pub fn string_line(key: &str, value: &str, is_last: bool) -> String {
    format!("{INDENT}{}", entry(key, value, is_last))
}

/// Escapes a prepared value for a JSON string file. Backslashes must already be doubled,
/// before quotes were escaped.
///
/// A lone `%s` becomes `$1`; numbered placeholders `%N$s` (N from 1 to 10) become `$N`.
pub fn escape(value: &str) -> String {
    let mut value = strip_html_tags(value).replace("%s", "$1");
    for i in 1..=10 {
        value = value.replace(&format!("%{i}$s"), &format!("${i}"));
    }
    escape_control(&value)
}

/// A constant tag as the body of a JSON string.
pub fn literal(tag: &str) -> String {
    escape_control(&tag.replace('\\', "\\\\").replace('"', "\\\""))
}

fn escape_control(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn entry(key: &str, value: &str, is_last: bool) -> String {
    let comma = if is_last { "" } else { "," };
    format!("\"{key}\": \"{value}\"{comma}")
}

pub fn group_header(name: &str) -> String {
    format!("\"{name}\": {{")
}
