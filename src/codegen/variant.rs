//! Per-variant fragments. Each returns one line (or a few indented lines) of
//! Dart; composition and indentation live in `codegen` and `dispatch`.

use super::escape_dart_string;
use crate::model::{ParamKind, Parameter, Variant};

/// `const factory Status.error(String message) = Failure;`
///
/// Defaults are left out: Dart rejects them on redirecting factories, the
/// concrete constructor carries them instead.
pub fn factory_redirect(union: &str, v: &Variant) -> String {
    let params = declare_params(&v.parameters, |p| format!("{} {}", p.type_expression, p.name));
    format!(
        "const factory {union}.{}({params}) = {};",
        v.factory_label, v.type_name
    )
}

/// `Result Function(String message)` or `Future<Result> Function(String message)`.
pub fn handler_type(v: &Variant, asynchronous: bool) -> String {
    let args = v
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.type_expression, p.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} Function({args})", result_type(asynchronous))
}

/// `Result Function(Failure value)`: handlers that receive the case itself.
pub fn case_handler_type(v: &Variant, binding: &str, asynchronous: bool) -> String {
    format!("{} Function({} {binding})", result_type(asynchronous), v.type_name)
}

fn result_type(asynchronous: bool) -> &'static str {
    if asynchronous { "Future<Result>" } else { "Result" }
}

/// Switch pattern: `Loading()` for unit cases, `final Failure value` otherwise.
pub fn case_pattern(v: &Variant, binding: &str) -> String {
    if v.is_unit() {
        format!("{}()", v.type_name)
    } else {
        format!("final {} {binding}", v.type_name)
    }
}

/// Always binds, for arms that hand the case value over.
pub fn binding_pattern(v: &Variant, binding: &str) -> String {
    format!("final {} {binding}", v.type_name)
}

/// `value.message, value.code` in declaration order.
pub fn call_args(v: &Variant, binding: &str) -> String {
    v.parameters
        .iter()
        .map(|p| format!("{binding}.{}", p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `'loading' => const Status.loading(),`; `None` for variants with parameters.
pub fn from_string_arm(union: &str, v: &Variant) -> Option<String> {
    if !v.is_unit() {
        return None;
    }
    Some(format!(
        "'{}' => {},",
        escape_dart_string(&v.factory_label),
        construct_expr(union, v)
    ))
}

/// Call of the variant's factory with no arguments.
pub fn construct_expr(union: &str, v: &Variant) -> String {
    if v.is_unit() {
        format!("const {union}.{}()", v.factory_label)
    } else {
        format!("{union}.{}()", v.factory_label)
    }
}

/// `final Failure value => 'Failure(${value.message})',`
pub fn to_string_arm(v: &Variant, binding: &str) -> String {
    let fields = v
        .parameters
        .iter()
        .map(|p| format!("${{{binding}.{}}}", p.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} => '{}({fields})',",
        case_pattern(v, binding),
        escape_dart_string(&v.type_name)
    )
}

/// The concrete case class as `(depth, line)` pairs; empty text is a blank line.
pub fn class_definition(union: &str, v: &Variant) -> Vec<(usize, String)> {
    let mut lines = vec![(0, format!("final class {} extends {union} {{", v.type_name))];

    if v.is_unit() {
        lines.push((1, format!("const {}();", v.type_name)));
    } else {
        for p in &v.parameters {
            lines.push((1, format!("final {} {};", p.type_expression, p.name)));
        }
        lines.push((0, String::new()));
        let params = declare_params(&v.parameters, |p| match &p.default_value {
            Some(default) => format!("this.{} = {default}", p.name),
            None => format!("this.{}", p.name),
        });
        lines.push((1, format!("const {}({params});", v.type_name)));
    }

    let props = v
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    lines.push((0, String::new()));
    lines.push((1, "@override".to_string()));
    lines.push((1, format!("List<Object?> get props => [{props}];")));
    lines.push((0, "}".to_string()));
    lines
}

/// Lay parameters out as declared: positional first, then `[...]`, then `{...}`.
fn declare_params(params: &[Parameter], render: impl Fn(&Parameter) -> String) -> String {
    let mut positional = Vec::new();
    let mut optional = Vec::new();
    let mut named = Vec::new();
    for p in params {
        match p.kind {
            ParamKind::Positional => positional.push(render(p)),
            ParamKind::OptionalPositional => optional.push(render(p)),
            ParamKind::Named => named.push(render(p)),
            ParamKind::RequiredNamed => named.push(format!("required {}", render(p))),
        }
    }

    let mut parts = positional;
    if !optional.is_empty() {
        parts.push(format!("[{}]", optional.join(", ")));
    }
    if !named.is_empty() {
        parts.push(format!("{{{}}}", named.join(", ")));
    }
    parts.join(", ")
}
