use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ParamKind, Parameter};

/// `typeExpression identifier`, with at least one space between them.
static PARAM_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S.*?)\s+([A-Za-z_$][A-Za-z0-9_$]*)$").expect("parameter shape regex")
});

/// Leading metadata such as `@Default(0)` or `@JsonKey(name: 'x')`.
static ANNOTATIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:@[A-Za-z_][A-Za-z0-9_.]*(?:\([^)]*\))?\s*)+").expect("annotation regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    None,
    Optional, // [ ... ]
    Named,    // { ... }
}

/// Split a factory's parameter list and keep every fragment that looks like a
/// parameter. Trailing commas, bare modifiers and positional junk vanish.
pub fn parse_parameter_list(text: &str) -> Vec<Parameter> {
    split_top_level(text)
        .into_iter()
        .filter_map(|(raw, group)| {
            let parsed = parse_parameter(raw, group);
            if parsed.is_none() && !raw.trim().is_empty() {
                tracing::debug!(fragment = raw.trim(), "dropping unrecognized parameter fragment");
            }
            parsed
        })
        .collect()
}

/// Commas only split at nesting depth zero. A `[`/`{` that starts a fresh
/// fragment at depth zero opens a parameter group rather than nesting.
fn split_top_level(text: &str) -> Vec<(&str, Group)> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut group = Group::None;
    let mut piece_group = Group::None;
    let mut start = 0usize;

    for (i, c) in text.char_indices() {
        match c {
            '[' | '{' if depth == 0 && group == Group::None && text[start..i].trim().is_empty() => {
                group = if c == '[' { Group::Optional } else { Group::Named };
                piece_group = group;
                start = i + 1;
            }
            ']' | '}' if depth == 0 && group != Group::None => {
                out.push((&text[start..i], piece_group));
                group = Group::None;
                start = i + 1;
            }
            '(' | '<' | '[' | '{' => depth += 1,
            ')' | '>' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push((&text[start..i], piece_group));
                piece_group = group;
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push((&text[start..], piece_group));
    out.retain(|(s, _)| !s.trim().is_empty());
    out
}

fn parse_parameter(raw: &str, group: Group) -> Option<Parameter> {
    let mut text = raw.trim();
    text = ANNOTATIONS.find(text).map_or(text, |m| &text[m.end()..]);

    let mut required = false;
    if let Some(rest) = strip_keyword(text, "required") {
        required = true;
        text = rest;
    }
    for modifier in ["covariant", "final"] {
        if let Some(rest) = strip_keyword(text, modifier) {
            text = rest;
        }
    }

    let (declaration, default_value) = match split_default(text) {
        Some((decl, value)) => (decl.trim(), Some(value.trim().to_string())),
        None => (text, None),
    };

    let caps = PARAM_SHAPE.captures(declaration)?;
    let type_expression = caps.get(1)?.as_str().trim();
    let name = caps.get(2)?.as_str();
    if type_expression.is_empty() {
        return None;
    }

    let kind = match group {
        Group::None => ParamKind::Positional,
        Group::Optional => ParamKind::OptionalPositional,
        Group::Named if required => ParamKind::RequiredNamed,
        Group::Named => ParamKind::Named,
    };

    Some(Parameter {
        name: name.to_string(),
        type_expression: type_expression.to_string(),
        default_value: default_value.filter(|v| !v.is_empty()),
        kind,
    })
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

/// First `=` at depth zero that is not part of `==` or `=>`.
fn split_default(text: &str) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' | b'<' | b'[' | b'{' => depth += 1,
            b')' | b'>' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'=' if depth == 0 => {
                let next = bytes.get(i + 1).copied();
                let prev = i.checked_sub(1).map(|p| bytes[p]);
                if next != Some(b'=') && next != Some(b'>') && prev != Some(b'=') {
                    return Some((&text[..i], &text[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}
