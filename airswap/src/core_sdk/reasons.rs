use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

const BUILTIN_REASONS: &str = include_str!("../reasons/validator_reasons.json");

#[derive(thiserror::Error, Debug)]
pub enum ReasonsError {
    #[error("cannot read reason table {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("reason table is not a JSON object of strings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Maps the `bytes32` codes returned by the pre-swap checker to readable text.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ReasonTable {
    entries: HashMap<String, String>,
}

impl ReasonTable {
    pub fn builtin() -> Result<Self, ReasonsError> {
        Self::from_json_str(BUILTIN_REASONS)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ReasonsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReasonsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ReasonsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
