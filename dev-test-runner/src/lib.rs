//! Corpus fixtures for end-to-end checks of `sealed-gen`.
//!
//! `corpus/expectations.json` lists every sample with what the parser is
//! expected to recover from it.
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Generated,
    NotFound,
    Empty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Expectation {
    pub file: String,
    #[serde(default)]
    pub outcome: Outcome,
    #[serde(default)]
    pub union: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub cases: Vec<String>,
    #[serde(default)]
    pub arity: Vec<usize>,
}

impl Expectation {
    pub fn source(&self) -> String {
        let path = corpus_dir().join(&self.file);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|error| panic!("failed to read {}: {error}", path.display()))
    }
}

pub fn corpus_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("corpus")
}

pub fn load_expectations() -> Vec<Expectation> {
    let path = corpus_dir().join("expectations.json");
    let src = std::fs::read_to_string(&path)
        .unwrap_or_else(|error| panic!("failed to read {}: {error}", path.display()));
    let de = &mut serde_json::Deserializer::from_str(&src);
    match serde_path_to_error::deserialize(de) {
        Ok(v) => v,
        Err(err) => panic!("bad expectations at {} → {}", err.path(), err.inner()),
    }
}
