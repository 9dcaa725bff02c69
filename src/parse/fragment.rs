use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Variant;

/// `= Case;`, `=> Case;` or `=> Case();` anchored at the end of the fragment.
static CASE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"=>?\s*([_A-Z][A-Za-z0-9_]*)\s*(?:\(\s*\))?\s*;$").expect("case label regex")
});

/// `factory Union.label(` anchored at the start of the fragment.
static FACTORY_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^factory\s+[A-Za-z_$][A-Za-z0-9_$]*\s*\.\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*\(")
        .expect("factory label regex")
});

/// Turn one `factory ... ;` fragment into a [`Variant`].
///
/// `None` when either the case label or the factory label is missing. The
/// parameter list never fails the fragment: unreadable parameters are dropped
/// one by one.
pub fn variant_from_fragment(fragment: &str) -> Option<Variant> {
    let fragment = fragment.trim();

    let type_name = CASE_LABEL.captures(fragment)?.get(1)?.as_str();
    let label = FACTORY_LABEL.captures(fragment)?;
    let factory_label = label.get(1)?.as_str();

    // the label match ends right after the opening parenthesis
    let open = label.get(0)?.end() - 1;
    let parameters = match outer_parens(fragment, open) {
        Some(inner) => super::param::parse_parameter_list(inner),
        None => Vec::new(),
    };

    Some(Variant {
        type_name: type_name.to_string(),
        factory_label: factory_label.to_string(),
        parameters,
    })
}

/// Text between the parenthesis at byte `open` and its balanced partner.
fn outer_parens(text: &str, open: usize) -> Option<&str> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_labels_and_parameters() {
        let v = variant_from_fragment("factory Status.error(String message, int code) = Failure;").unwrap();
        assert_eq!(v.type_name, "Failure");
        assert_eq!(v.factory_label, "error");
        let names: Vec<_> = v.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["message", "code"]);
    }

    #[test]
    fn function_typed_parameter_keeps_nested_parens() {
        let v = variant_from_fragment(
            "factory Job.run(void Function(int progress) onTick, Duration timeout) = Running;",
        )
        .unwrap();
        assert_eq!(v.parameters.len(), 2);
        assert_eq!(v.parameters[0].type_expression, "void Function(int progress)");
        assert_eq!(v.parameters[0].name, "onTick");
        assert_eq!(v.parameters[1].name, "timeout");
    }

    #[test]
    fn missing_pieces_drop_the_fragment() {
        // no case label
        assert!(variant_from_fragment("factory Status.loading();").is_none());
        // lowercase case label
        assert!(variant_from_fragment("factory Status.loading() = loading;").is_none());
        // no factory label
        assert!(variant_from_fragment("factory Status() = Loading;").is_none());
    }

    #[test]
    fn unbalanced_parameter_list_yields_no_parameters() {
        // `[^;]*;` stops at the semicolon, the closing paren never shows up
        let v = variant_from_fragment("factory Status.odd(String a = Odd;").unwrap();
        assert_eq!(v.type_name, "Odd");
        assert!(v.parameters.is_empty());
    }

    #[test]
    fn digits_in_case_names() {
        let v = variant_from_fragment("factory Http.e404() = Http404;").unwrap();
        assert_eq!(v.type_name, "Http404");
        assert_eq!(v.factory_label, "e404");
    }
}
