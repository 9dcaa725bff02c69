//! Dart emission for a parsed union.
//!
//! Output layout (always in this order):
//! 1. optional `equatable` import
//! 2. `sealed class <Union> extends Equatable` with factory redirections,
//!    `fromString` and a `toString` override
//! 3. `extension <Union>Helper on <Union>` with the dispatch helpers
//! 4. one `final class <Case> extends <Union>` per variant
//!
//! Every routine walks variants in discovery order and parameters in
//! declaration order; names are used verbatim.
pub mod dispatch;
pub mod variant;

use crate::error::GenerateError;
use crate::model::{UnionDeclaration, Variant};

pub const EQUATABLE_IMPORT: &str = "import 'package:equatable/equatable.dart';";

/// What `fromString` does with a string that names no zero-parameter variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Construct the first declared variant, even when it takes parameters.
    #[default]
    FirstDeclared,
    /// `throw ArgumentError.value(value, 'value')`
    Throw,
}

impl FallbackPolicy {
    /// The variant an unmatched lookup resolves to, if any.
    pub fn fallback_variant(self, decl: &UnionDeclaration) -> Option<&Variant> {
        match self {
            FallbackPolicy::FirstDeclared => decl.variants.first(),
            FallbackPolicy::Throw => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenOptions {
    pub equatable_import: bool,
    pub from_string: bool,
    pub fallback: FallbackPolicy,
    pub helper_suffix: String,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            equatable_import: true,
            from_string: true,
            fallback: FallbackPolicy::FirstDeclared,
            helper_suffix: "Helper".to_string(),
        }
    }
}

/// Render `decl` with `options`. Fails only for a union without variants.
pub fn generate(decl: &UnionDeclaration, options: &GenOptions) -> Result<String, GenerateError> {
    let mut cg = Codegen::with_options(options.clone());
    cg.emit(decl)?;
    Ok(cg.into_string())
}

pub struct Codegen {
    out: String,
    options: GenOptions,
}

impl Codegen {
    pub fn new() -> Self {
        Self::with_options(GenOptions::default())
    }

    pub fn with_options(options: GenOptions) -> Self {
        Self { out: String::new(), options }
    }

    pub fn emit(&mut self, decl: &UnionDeclaration) -> Result<(), GenerateError> {
        if decl.variants.is_empty() {
            return Err(GenerateError::EmptyUnion { name: decl.name.clone() });
        }

        if self.options.equatable_import {
            self.line(0, EQUATABLE_IMPORT);
            self.blank();
        }
        self.emit_base(decl);
        self.blank();
        self.emit_extension(decl);
        for v in &decl.variants {
            self.blank();
            for (depth, text) in variant::class_definition(&decl.name, v) {
                self.line(depth, &text);
            }
        }
        Ok(())
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn emit_base(&mut self, decl: &UnionDeclaration) {
        let name = &decl.name;
        self.line(0, &format!("sealed class {name} extends Equatable {{"));
        self.line(1, &format!("const {name}();"));
        self.blank();
        for v in &decl.variants {
            self.line(1, &variant::factory_redirect(name, v));
        }
        if self.options.from_string {
            self.blank();
            self.emit_from_string(decl);
        }
        self.blank();
        self.emit_to_string(decl);
        self.line(0, "}");
    }

    fn emit_from_string(&mut self, decl: &UnionDeclaration) {
        let name = &decl.name;
        self.line(1, &format!("factory {name}.fromString(String value) {{"));
        self.line(2, "return switch (value) {");
        for v in decl.unit_variants() {
            if let Some(arm) = variant::from_string_arm(name, v) {
                self.line(3, &arm);
            }
        }
        let fallback = match self.options.fallback.fallback_variant(decl) {
            Some(v) => variant::construct_expr(name, v),
            None => "throw ArgumentError.value(value, 'value')".to_string(),
        };
        self.line(3, &format!("_ => {fallback},"));
        self.line(2, "};");
        self.line(1, "}");
    }

    fn emit_to_string(&mut self, decl: &UnionDeclaration) {
        self.line(1, "@override");
        self.line(1, "String toString() {");
        self.line(2, "return switch (this) {");
        for v in &decl.variants {
            self.line(3, &variant::to_string_arm(v, "value"));
        }
        self.line(2, "};");
        self.line(1, "}");
    }

    fn emit_extension(&mut self, decl: &UnionDeclaration) {
        let binding = dispatch::binding_name(decl);
        self.line(
            0,
            &format!("extension {}{} on {} {{", decl.name, self.options.helper_suffix, decl.name),
        );
        for (i, family) in dispatch::Family::ALL.iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            for (depth, text) in family.render(&decl.variants, &binding) {
                self.line(depth + 1, &text);
            }
        }
        self.line(0, "}");
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-quoted Dart string literal body: escapes `\`, `'` and `$`.
pub fn escape_dart_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '\'' | '$' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
