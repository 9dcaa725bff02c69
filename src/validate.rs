use indexmap::IndexSet;

use crate::error::{CollisionKind, ParseError};
use crate::model::UnionDeclaration;

/// Named parameters every `maybeWhen`/`maybeMap` helper already declares.
const RESERVED_LABELS: &[&str] = &["orElse"];

/// Reject declarations whose generated members would collide: two factories
/// with the same label, two cases with the same type name, or a variant that
/// repeats a parameter name. The first repeated name in discovery order wins.
/// A factory labelled like the helpers' fallback parameter is rejected too.
pub fn check_unique(decl: &UnionDeclaration) -> Result<(), ParseError> {
    let collision = |kind, name: &str| ParseError::Collision {
        union: decl.name.clone(),
        kind,
        name: name.to_string(),
    };

    let mut labels = IndexSet::new();
    let mut types = IndexSet::new();
    for v in &decl.variants {
        if RESERVED_LABELS.contains(&v.factory_label.as_str()) {
            return Err(ParseError::ReservedLabel {
                union: decl.name.clone(),
                name: v.factory_label.clone(),
            });
        }
        if !labels.insert(v.factory_label.as_str()) {
            return Err(collision(CollisionKind::FactoryLabel, &v.factory_label));
        }
        if !types.insert(v.type_name.as_str()) {
            return Err(collision(CollisionKind::TypeName, &v.type_name));
        }

        let mut params = IndexSet::new();
        for p in &v.parameters {
            if !params.insert(p.name.as_str()) {
                return Err(collision(CollisionKind::Parameter, &p.name));
            }
        }
    }
    Ok(())
}
