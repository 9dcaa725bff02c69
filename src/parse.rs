//! Pattern-based recovery of a union declaration from hand-written Dart.
//!
//! The input grammar is informal: free whitespace, multi-line factories,
//! optional trailing punctuation. Parsing is best-effort:
//! - the only hard failures are a missing `class <Name>` header and name
//!   collisions (see `validate`);
//! - every factory fragment and every parameter fragment is extracted
//!   independently, and a fragment that fails extraction is dropped without
//!   affecting its neighbours.
pub mod fragment;
pub mod param;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::ParseError;
use crate::model::{UnionDeclaration, Variant};

static CLASS_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bclass\s+([A-Z][A-Za-z0-9]*)").expect("class header regex")
});

// Leftmost match wins: string literals (group 1) are matched before any
// comment marker inside them and are kept; comments are dropped.
static COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)('(?:\\.|[^'\\\n])*'|"(?:\\.|[^"\\\n])*")|/\*.*?\*/|//[^\n]*"#,
    )
    .expect("comment regex")
});

static FACTORY_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bfactory\b[^;]*;").expect("factory fragment regex")
});

/// Parse `source` into a [`UnionDeclaration`].
///
/// Returns [`ParseError::NotFound`] when no class header is present. A header
/// without any recognizable factory yields a declaration with no variants.
pub fn parse(source: &str) -> Result<UnionDeclaration, ParseError> {
    let stripped = strip_comments(source);

    let name = union_name(&stripped).ok_or(ParseError::NotFound)?;
    let variants = find_variants(&stripped);

    tracing::debug!(union = %name, variants = variants.len(), "parsed union declaration");

    let decl = UnionDeclaration::new(name, variants);
    crate::validate::check_unique(&decl)?;
    Ok(decl)
}

fn union_name(source: &str) -> Option<String> {
    CLASS_NAME
        .captures(source)
        .map(|caps| caps[1].to_string())
}

fn strip_comments(source: &str) -> String {
    COMMENT
        .replace_all(source, |caps: &Captures<'_>| {
            caps.get(1).map_or_else(String::new, |lit| lit.as_str().to_string())
        })
        .into_owned()
}

/// Collapse line breaks so multi-line factories become one logical line.
fn normalize(source: &str) -> String {
    source
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn find_variants(source: &str) -> Vec<Variant> {
    let flat = normalize(source);
    let mut out = Vec::new();
    for m in FACTORY_FRAGMENT.find_iter(&flat) {
        match fragment::variant_from_fragment(m.as_str()) {
            Some(variant) => {
                tracing::trace!(
                    case = %variant.type_name,
                    label = %variant.factory_label,
                    params = variant.parameters.len(),
                    "recovered variant"
                );
                out.push(variant);
            }
            None => {
                tracing::debug!(fragment = m.as_str(), "dropping unrecognized factory fragment");
            }
        }
    }
    out
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
