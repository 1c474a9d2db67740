// SPDX-License-Identifier: Apache-2.0

//! Portable configuration documents. The export format is the wire format:
//! pretty-printed camelCase JSON, human-inspectable and hand-editable.

use std::fmt::{Display, Formatter};

use crate::config::{Configuration, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Json(String),
    Invalid(ValidationError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "malformed configuration document: {msg}"),
            Self::Invalid(err) => write!(f, "invalid configuration document: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ValidationError> for ParseError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

pub fn export_config(config: &Configuration) -> Result<String, ParseError> {
    serde_json::to_string_pretty(config).map_err(|e| ParseError::Json(e.to_string()))
}

/// Parses a portable document, repairs what defaults can repair (missing
/// sections, sparse ranks), then validates. Unknown fields are ignored;
/// duplicate link ids and a missing profile name remain hard failures.
pub fn import_config(text: &str) -> Result<Configuration, ParseError> {
    let mut config: Configuration =
        serde_json::from_str(text).map_err(|e| ParseError::Json(e.to_string()))?;
    config.normalize_link_order();
    config.validate()?;
    Ok(config)
}
