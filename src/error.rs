//! Error kinds surfaced by the parse → generate pipeline.
//!
//! Degraded fragments (a factory or parameter that fails extraction) are not
//! errors: they are dropped inside the parser and only traced.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    FactoryLabel,
    TypeName,
    Parameter,
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionKind::FactoryLabel => f.write_str("factory label"),
            CollisionKind::TypeName => f.write_str("case type name"),
            CollisionKind::Parameter => f.write_str("parameter name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no union declaration found (expected `class <Name>`)")]
    NotFound,

    #[error("duplicate {kind} `{name}` in union `{union}`")]
    Collision {
        union: String,
        kind: CollisionKind,
        name: String,
    },

    #[error("factory label `{name}` in union `{union}` clashes with the `orElse` helper parameter")]
    ReservedLabel { union: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("union `{name}` has no recognizable factory constructors")]
    EmptyUnion { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}
