//! Structured union model recovered by the parser. No regex state here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    #[default]
    Positional,              // `String message`
    OptionalPositional,      // inside `[...]`
    Named,                   // inside `{...}`
    RequiredNamed,           // `{required String message}`
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_expression: String,     // verbatim, never parsed further (keeps `?`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub kind: ParamKind,
}

impl Parameter {
    pub fn positional(type_expression: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_expression: type_expression.into(),
            default_value: None,
            kind: ParamKind::Positional,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub type_name: String,           // `= Loading;`
    pub factory_label: String,       // `Status.loading(`; the dispatch discriminant
    pub parameters: Vec<Parameter>,  // declaration order
}

impl Variant {
    pub fn new(type_name: impl Into<String>, factory_label: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            factory_label: factory_label.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn is_unit(&self) -> bool {
        self.parameters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionDeclaration {
    pub name: String,
    pub variants: Vec<Variant>,      // discovery order; may be empty after parsing
}

impl UnionDeclaration {
    pub fn new(name: impl Into<String>, variants: Vec<Variant>) -> Self {
        Self { name: name.into(), variants }
    }

    pub fn unit_variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(|v| v.is_unit())
    }
}
