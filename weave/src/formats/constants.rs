//! Constants and analytics output.
//!
//! Constants are written untyped first, then one nested container per type. Analytics tags
//! are always written as two containers, events then screens.

use std::io::Write;

use super::{Platform, android, ios, web};
use crate::{
    casing::Casing,
    config::ConstantsConfig,
    error::Error,
    report::{Report, Warning},
    types::{AnalyticsType, Strand, StrandKind},
};

/// Text of the generated-file notice at the top of every constants file.
pub const CONSTANTS_HEADER: &str = "List of Constants, auto-generated by Weave";

const INDENT: &str = "    ";

/// A run of constants written together. `name` is `None` for the untyped run, which is not
/// wrapped in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantGroup<'a> {
    pub name: Option<String>,
    /// Key used for the container on Web.
    pub web_name: String,
    pub strands: Vec<&'a Strand>,
}

impl<'a> ConstantGroup<'a> {
    /// Untyped constants first, then one group per distinct non-empty type in the order the
    /// types first appear. Non-constant strands are ignored.
    ///
    /// Types that would produce the same container are merged under the first spelling: on
    /// Android and iOS that is the name after `type_casing`, on Web the raw name, both
    /// compared case-insensitively.
    pub fn by_type(strands: &'a [Strand], platform: Platform, type_casing: Casing) -> Vec<Self> {
        let constants = strands
            .iter()
            .filter_map(|strand| strand.type_name().map(|type_name| (type_name, strand)));
        let container = |type_name: &str| match platform {
            Platform::Web => type_name.to_lowercase(),
            Platform::Android | Platform::Ios => type_casing.apply(type_name).to_lowercase(),
        };

        let mut untyped = ConstantGroup {
            name: None,
            web_name: String::new(),
            strands: Vec::new(),
        };
        let mut typed: Vec<(String, ConstantGroup<'a>)> = Vec::new();

        for (type_name, strand) in constants {
            if type_name.is_empty() {
                untyped.strands.push(strand);
                continue;
            }

            let container = container(type_name);
            match typed.iter_mut().find(|(existing, _)| *existing == container) {
                Some((_, group)) => group.strands.push(strand),
                None => typed.push((
                    container,
                    ConstantGroup {
                        name: Some(type_name.to_string()),
                        web_name: type_name.to_string(),
                        strands: vec![strand],
                    },
                )),
            }
        }

        let mut groups = Vec::with_capacity(typed.len() + 1);
        if !untyped.strands.is_empty() {
            groups.push(untyped);
        }
        groups.extend(typed.into_iter().map(|(_, group)| group));
        groups
    }

    /// Exactly two groups, events then screens, emitted even when empty.
    pub fn analytics(strands: &'a [Strand]) -> Vec<Self> {
        [AnalyticsType::Event, AnalyticsType::Screen]
            .into_iter()
            .map(|analytics_type| ConstantGroup {
                name: Some(analytics_type.group_name().to_string()),
                web_name: analytics_type.group_name().to_lowercase(),
                strands: strands
                    .iter()
                    .filter(|strand| strand.type_name() == Some(analytics_type.group_name()))
                    .collect(),
            })
            .collect()
    }
}

/// Padding placed before `=` so it starts at `column`; a single space when the declaration
/// is already past it.
pub fn alignment(column: usize, prefix_len: usize) -> usize {
    if column >= prefix_len {
        column - prefix_len
    } else {
        1
    }
}

/// Writes a complete constants file for `groups`.
///
/// A constant that fails to write is reported and skipped.
pub fn write_constants<W: Write>(
    out: &mut W,
    platform: Platform,
    config: &ConstantsConfig,
    groups: &[ConstantGroup],
    report: &mut Report,
) -> Result<(), Error> {
    let top_level = config.is_top_level_class_created;
    let object_name = config.object_name(platform);
    let object_name = top_level.then_some(object_name.as_str());

    let header = match platform {
        Platform::Android => android::constants_header(
            config.package_name.as_deref().unwrap_or_default(),
            object_name,
            CONSTANTS_HEADER,
        ),
        Platform::Ios => ios::constants_header(object_name, CONSTANTS_HEADER),
        Platform::Web => format!("{}\n", web::HEADER),
    };
    out.write_all(header.as_bytes())?;

    let base_indent = if platform == Platform::Web || top_level {
        INDENT
    } else {
        ""
    };

    let mut wrote_body = false;
    for (index, group) in groups.iter().enumerate() {
        let is_last_group = index + 1 == groups.len();

        let Some(name) = &group.name else {
            for (i, strand) in group.strands.iter().enumerate() {
                let is_last = is_last_group && i + 1 == group.strands.len();
                write_constant(out, platform, config, strand, base_indent, is_last, report);
                wrote_body = true;
            }
            continue;
        };

        if platform != Platform::Web && wrote_body {
            writeln!(out)?;
        }
        let header = match platform {
            Platform::Android => android::group_header(&config.type_casing.apply(name)),
            Platform::Ios => ios::group_header(&config.type_casing.apply(name)),
            Platform::Web => web::group_header(&group.web_name),
        };
        writeln!(out, "{base_indent}{header}")?;

        let indent = format!("{base_indent}{INDENT}");
        for (i, strand) in group.strands.iter().enumerate() {
            let is_last = i + 1 == group.strands.len();
            write_constant(out, platform, config, strand, &indent, is_last, report);
        }

        let comma = if platform == Platform::Web && !is_last_group {
            ","
        } else {
            ""
        };
        writeln!(out, "{base_indent}}}{comma}")?;
        wrote_body = true;
    }

    if platform == Platform::Web || top_level {
        writeln!(out, "}}")?;
    }
    Ok(())
}

/// Renders one constant declaration at `indent`.
pub fn render_constant(
    platform: Platform,
    config: &ConstantsConfig,
    strand: &Strand,
    indent: &str,
    is_last: bool,
) -> Option<String> {
    let StrandKind::Constant { tag, .. } = &strand.kind else {
        return None;
    };

    let key = config.key_casing.apply(&strand.key);
    let (declaration, tag) = match platform {
        Platform::Android => (android::declaration(&key), android::literal(tag)),
        Platform::Ios => (ios::declaration(&key), ios::literal(tag)),
        Platform::Web => {
            let entry = web::entry(&strand.key, &web::literal(tag), is_last);
            return Some(format!("{indent}{entry}"));
        }
    };

    let padding = alignment(config.values_align_column, indent.len() + declaration.len());
    Some(format!(
        "{indent}{declaration}{}= \"{tag}\"",
        " ".repeat(padding)
    ))
}

fn write_constant<W: Write>(
    out: &mut W,
    platform: Platform,
    config: &ConstantsConfig,
    strand: &Strand,
    indent: &str,
    is_last: bool,
    report: &mut Report,
) {
    let Some(line) = render_constant(platform, config, strand, indent, is_last) else {
        return;
    };
    if let Err(e) = writeln!(out, "{line}") {
        report.warn(Warning::RenderFailed {
            location: strand.location.clone(),
            reason: e.to_string(),
        });
    }
}
