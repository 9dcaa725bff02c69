//! The helper extension: eight dispatch methods over the sealed hierarchy.
//!
//! All of them compile to an exhaustive Dart `switch` on `this`, so the
//! analyzer proves every case is covered; none of them need a "first variant"
//! fallback. The families differ only along three axes, which is what
//! [`Family`] encodes:
//!
//! | family            | handlers  | fallback          | receives      |
//! |-------------------|-----------|-------------------|---------------|
//! | `when`            | required  | none              | fields        |
//! | `maybeWhen`       | optional  | `orElse`          | fields        |
//! | `whenOrNull`      | optional  | `null`            | fields        |
//! | `map`             | required  | none              | case value    |
//! | `maybeMap`        | optional  | `orElse`          | case value    |
//!
//! plus `Async` flavours of the first three.

use super::variant;
use crate::model::{UnionDeclaration, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    When,
    MaybeWhen,
    WhenOrNull,
    WhenAsync,
    MaybeWhenAsync,
    WhenOrNullAsync,
    Map,
    MaybeMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fallback {
    None,
    OrElse,
    Null,
}

impl Family {
    pub const ALL: [Family; 8] = [
        Family::When,
        Family::MaybeWhen,
        Family::WhenOrNull,
        Family::WhenAsync,
        Family::MaybeWhenAsync,
        Family::WhenOrNullAsync,
        Family::Map,
        Family::MaybeMap,
    ];

    pub fn method_name(self) -> &'static str {
        match self {
            Family::When => "when",
            Family::MaybeWhen => "maybeWhen",
            Family::WhenOrNull => "whenOrNull",
            Family::WhenAsync => "whenAsync",
            Family::MaybeWhenAsync => "maybeWhenAsync",
            Family::WhenOrNullAsync => "whenOrNullAsync",
            Family::Map => "map",
            Family::MaybeMap => "maybeMap",
        }
    }

    fn is_async(self) -> bool {
        matches!(self, Family::WhenAsync | Family::MaybeWhenAsync | Family::WhenOrNullAsync)
    }

    fn fallback(self) -> Fallback {
        match self {
            Family::When | Family::WhenAsync | Family::Map => Fallback::None,
            Family::MaybeWhen | Family::MaybeWhenAsync | Family::MaybeMap => Fallback::OrElse,
            Family::WhenOrNull | Family::WhenOrNullAsync => Fallback::Null,
        }
    }

    fn passes_case(self) -> bool {
        matches!(self, Family::Map | Family::MaybeMap)
    }

    fn return_type(self) -> &'static str {
        match (self.is_async(), self.fallback()) {
            (false, Fallback::Null) => "Result?",
            (false, _) => "Result",
            (true, Fallback::Null) => "Future<Result?>",
            (true, _) => "Future<Result>",
        }
    }

    /// The whole method as `(depth, line)` pairs relative to the extension body.
    pub fn render(self, variants: &[Variant], binding: &str) -> Vec<(usize, String)> {
        let mut lines = vec![(
            0,
            format!("{} {}<Result extends Object?>({{", self.return_type(), self.method_name()),
        )];

        if self.fallback() == Fallback::OrElse {
            let ty = if self.is_async() { "Future<Result>" } else { "Result" };
            lines.push((1, format!("required {ty} Function() orElse,")));
        }
        for v in variants {
            lines.push((1, self.handler_param(v, binding)));
        }

        let body_open = if self.is_async() { "}) async {" } else { "}) {" };
        lines.push((0, body_open.to_string()));
        lines.push((1, "return switch (this) {".to_string()));
        for v in variants {
            lines.push((2, self.arm(v, binding)));
        }
        lines.push((1, "};".to_string()));
        lines.push((0, "}".to_string()));
        lines
    }

    fn handler_param(self, v: &Variant, binding: &str) -> String {
        let ty = if self.passes_case() {
            variant::case_handler_type(v, binding, self.is_async())
        } else {
            variant::handler_type(v, self.is_async())
        };
        match self.fallback() {
            Fallback::None => format!("required {ty} {},", v.factory_label),
            Fallback::OrElse | Fallback::Null => format!("{ty}? {},", v.factory_label),
        }
    }

    fn arm(self, v: &Variant, binding: &str) -> String {
        let label = &v.factory_label;
        let (pattern, args) = if self.passes_case() {
            (variant::binding_pattern(v, binding), binding.to_string())
        } else {
            (variant::case_pattern(v, binding), variant::call_args(v, binding))
        };
        let wait = if self.is_async() { "await " } else { "" };

        let body = match self.fallback() {
            Fallback::None => format!("{wait}{label}({args})"),
            Fallback::OrElse => {
                format!("{label} != null ? {wait}{label}({args}) : {wait}orElse()")
            }
            Fallback::Null => format!("{wait}{label}?.call({args})"),
        };
        format!("{pattern} => {body},")
    }
}

/// Name bound to the matched case inside helper bodies. Handler parameters
/// share the scope, so step around any factory label that would shadow it.
pub fn binding_name(decl: &UnionDeclaration) -> String {
    let mut name = String::from("value");
    while decl.variants.iter().any(|v| v.factory_label == name) {
        name.push('_');
    }
    name
}
