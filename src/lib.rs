//! Dart sealed-union boilerplate from hand-written factory declarations.
//!
//! ```text
//! class Status {
//!   factory Status.loading() = Loading;
//!   factory Status.error(String message) = Failure;
//! }
//! ```
//!
//! becomes a `sealed class Status extends Equatable` with factory
//! redirections, `fromString`/`toString`, a `StatusHelper` extension
//! (`when`, `maybeWhen`, `whenOrNull`, their async flavours, `map`,
//! `maybeMap`) and one `final class` per case.
//!
//! The pipeline is pure: [`parse`] recovers a [`UnionDeclaration`],
//! [`generate`] renders it. Both allocate everything per call.
pub mod cli;
pub mod codegen;
pub mod error;
pub mod model;
pub mod parse;
pub mod path_de;
pub mod validate;

pub use codegen::{generate, Codegen, FallbackPolicy, GenOptions};
pub use error::{CollisionKind, ConvertError, GenerateError, ParseError};
pub use model::{ParamKind, Parameter, UnionDeclaration, Variant};
pub use parse::parse;

/// Source text in, replacement text out. On any error nothing should be
/// replaced.
pub fn convert(source: &str, options: &GenOptions) -> Result<String, ConvertError> {
    let decl = parse(source)?;
    Ok(generate(&decl, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn convert_reports_missing_header() {
        let err = convert("enum Status { a, b }", &GenOptions::default()).unwrap_err();
        assert_eq!(err, ConvertError::Parse(ParseError::NotFound));
    }

    #[test]
    fn convert_reports_empty_union() {
        let err = convert("class Status {}", &GenOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Generate(GenerateError::EmptyUnion { .. })));
    }

    #[test]
    fn output_parses_back_to_the_same_model() {
        let src = "class Status { factory Status.loading() = Loading; factory Status.error(String message, {int code = 0}) = Failure; }";
        let decl = parse(src).unwrap();
        let out = generate(&decl, &GenOptions::default()).unwrap();
        let reparsed = parse(&out).unwrap();
        // defaults only live on the concrete constructor
        let mut expected = decl.clone();
        expected.variants[1].parameters[1].default_value = None;
        assert_eq!(reparsed, expected);
    }

    fn ident() -> impl Strategy<Value = String> {
        "[a-z][a-zA-Z0-9]{0,6}"
    }

    fn type_name() -> impl Strategy<Value = String> {
        "[A-Z][a-zA-Z0-9]{0,6}"
    }

    prop_compose! {
        fn factory_line(i: usize)(label in ident(), case in type_name(), params in prop::collection::vec((type_name(), ident()), 0..4)) -> (String, String, Vec<(String, String)>) {
            // suffix keeps labels and case names distinct across lines
            (format!("{label}{i}"), format!("{case}{i}"), params.into_iter().enumerate().map(|(j, (t, n))| (t, format!("{n}{j}"))).collect())
        }
    }

    proptest! {
        #[test]
        fn parse_then_generate_preserves_labels_and_arity(
            a in factory_line(0),
            b in factory_line(1),
            c in factory_line(2),
        ) {
            let lines = [a, b, c];
            let mut src = String::from("class Sample {\n");
            for (label, case, params) in &lines {
                let params = params.iter().map(|(t, n)| format!("{t} {n}")).collect::<Vec<_>>().join(",\n    ");
                src.push_str(&format!("  factory Sample.{label}(\n    {params}\n  ) = {case};\n"));
            }
            src.push('}');

            let decl = parse(&src).unwrap();
            prop_assert_eq!(decl.variants.len(), 3);
            for (v, (label, case, params)) in decl.variants.iter().zip(&lines) {
                prop_assert_eq!(&v.factory_label, label);
                prop_assert_eq!(&v.type_name, case);
                let got: Vec<_> = v.parameters.iter().map(|p| (p.type_expression.clone(), p.name.clone())).collect();
                prop_assert_eq!(&got, params);
            }

            let first = generate(&decl, &GenOptions::default()).unwrap();
            let second = generate(&parse(&src).unwrap(), &GenOptions::default()).unwrap();
            prop_assert_eq!(&first, &second);

            for (label, _, params) in &lines {
                let arm = format!("'{label}' => const Sample.{label}(),");
                prop_assert_eq!(first.contains(&arm), params.is_empty());
            }
        }
    }
}
