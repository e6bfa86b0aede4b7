//! Android output: `strings.xml` resources and Kotlin constant objects.

use std::io::Write;

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use super::{HTML_END_TAG, HTML_START_TAG, has_html_tag};
use crate::{config::AndroidEscaping, error::Error};

pub const FOOTER: &str = "</resources>";

const INDENT: &str = "    ";

/// Writes the XML declaration and opens `<resources>`.
pub fn write_header<W: Write>(out: &mut W) -> Result<(), Error> {
    let mut xml_writer = Writer::new(out);
    xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
    xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
    Ok(())
}

/// `<!-- text -->`, preceded by a blank line.
pub fn comment_line(text: &str) -> Result<String, Error> {
    let mut xml_writer = Writer::new(Vec::new());
    xml_writer.write_event(Event::Comment(BytesText::from_escaped(format!(" {text} "))))?;
    let comment = String::from_utf8_lossy(&xml_writer.into_inner()).into_owned();
    Ok(format!("\n{INDENT}{comment}"))
}

/// `<string name="key">value</string>`. `value` must already be escaped with [`escape`].
pub fn string_line(key: &str, value: &str) -> Result<String, Error> {
    let mut xml_writer = Writer::new(Vec::new());
    let mut elem = BytesStart::new("string");
    elem.push_attribute(("name", key));
    xml_writer.write_event(Event::Start(elem))?;
    xml_writer.write_event(Event::Text(BytesText::from_escaped(value)))?;
    xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
    let line = String::from_utf8_lossy(&xml_writer.into_inner()).into_owned();
    Ok(format!("{INDENT}{line}"))
}

/// Escapes a prepared value for an Android string resource.
///
/// A value wrapped in `<html>...</html>` keeps its markup inside a CDATA section; any other
/// value gets `<` and `>` escaped.
pub fn escape(value: &str, escaping: AndroidEscaping) -> String {
    let mut value = value
        .replace('&', "&amp;")
        .replace('\'', "\\'")
        .replace('@', "\\@")
        .replace("...", "&#8230;");

    if escaping.replace_dashes {
        value = value.replace('-', "\u{2013}");
    }
    if escaping.pad_percent {
        value = value.replace(" % ", " %% ");
    }

    if has_html_tag(&value) {
        let value = HTML_START_TAG.replace_all(&value, "<![CDATA[");
        HTML_END_TAG.replace_all(&value, "]]>").into_owned()
    } else {
        value.replace('>', "&gt;").replace('<', "&lt;")
    }
}

/// Opening of a constants file: package, doc comment and, optionally, the top-level object.
pub fn constants_header(
    package_name: &str,
    object_name: Option<&str>,
    description: &str,
) -> String {
    let mut header = format!("package {package_name}\n\n/**\n * {description}\n */\n");
    if let Some(name) = object_name {
        header.push_str(&format!("object {name} {{\n"));
    }
    header.push('\n');
    header
}

pub fn declaration(key: &str) -> String {
    format!("const val {key}")
}

/// A constant tag as the body of a Kotlin string literal. `$` is escaped so it never starts a
/// template.
pub fn literal(tag: &str) -> String {
    tag.replace('\\', "\\\\").replace('"', "\\\"").replace('$', "\\$")
}

pub fn group_header(name: &str) -> String {
    format!("object {name} {{")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape_default(value: &str) -> String {
        escape(value, AndroidEscaping::default())
    }

    #[test]
    fn test_escape_basic_characters() {
        assert_eq!(escape_default("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape_default("It's"), "It\\'s");
        assert_eq!(escape_default("@home"), "\\@home");
        assert_eq!(escape_default("Loading..."), "Loading&#8230;");
    }

    #[test]
    fn test_escape_angle_brackets_without_html() {
        assert_eq!(escape_default("a < b > c"), "a &lt; b &gt; c");
    }

    #[test]
    fn test_escape_html_wrapper_becomes_cdata() {
        assert_eq!(
            escape_default("50% off <html>Buy <b>now</b></html>"),
            "50% off <![CDATA[Buy <b>now</b>]]>"
        );
        assert_eq!(
            escape_default("<HTML><i>x</i></Html>"),
            "<![CDATA[<i>x</i>]]>"
        );
    }

    #[test]
    fn test_percent_left_alone_without_padding_context() {
        assert_eq!(escape_default("Save 10%"), "Save 10%");
        assert_eq!(escape_default("Save 10 % now"), "Save 10 %% now");
    }

    #[test]
    fn test_configurable_rules() {
        let all = AndroidEscaping {
            replace_dashes: true,
            pad_percent: false,
        };
        assert_eq!(escape("well-known 5 % off", all), "well\u{2013}known 5 % off");
        assert_eq!(escape_default("well-known"), "well-known");
    }

    #[test]
    fn test_string_line() {
        assert_eq!(
            string_line("greeting", "Tom &amp; Jerry").unwrap(),
            "    <string name=\"greeting\">Tom &amp; Jerry</string>"
        );
    }

    #[test]
    fn test_comment_line() {
        assert_eq!(comment_line("Section").unwrap(), "\n    <!-- Section -->");
    }

    #[test]
    fn test_constants_header() {
        assert_eq!(
            constants_header("com.example", Some("Tags"), "Generated"),
            "package com.example\n\n/**\n * Generated\n */\nobject Tags {\n\n"
        );
        assert_eq!(
            constants_header("com.example", None, "Generated"),
            "package com.example\n\n/**\n * Generated\n */\n\n"
        );
    }
}
