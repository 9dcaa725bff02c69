use serde::de::DeserializeOwned;

use crate::model::UnionDeclaration;

/// JSON decoding failure with the JSON path of the offending node.
#[derive(Debug, thiserror::Error)]
#[error("at JSON path {path} → {message}")]
pub struct PathError {
    pub path: String,
    pub message: String,
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, PathError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| PathError {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Read a model previously dumped by `sealed-gen model`.
pub fn model_from_json(src: &str) -> Result<UnionDeclaration, PathError> {
    from_str_with_path(src)
}
