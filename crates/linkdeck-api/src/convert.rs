// SPDX-License-Identifier: Apache-2.0

//! Conversions from domain errors to the wire envelope. Store errors are
//! mapped at the server boundary, next to the transport that produced them.

use serde_json::json;

use linkdeck_editor::EditError;
use linkdeck_model::{ParseError, ValidationError};

use crate::errors::{ApiError, ApiErrorCode};

#[must_use]
pub fn validation_error(err: &ValidationError) -> ApiError {
    ApiError::validation_failed(err.to_string())
}

#[must_use]
pub fn parse_error(err: &ParseError) -> ApiError {
    match err {
        ParseError::Json(_) => ApiError::invalid_body(err.to_string()),
        ParseError::Invalid(inner) => validation_error(inner),
        _ => ApiError::new(ApiErrorCode::Internal, err.to_string(), serde_json::Value::Null),
    }
}

#[must_use]
pub fn edit_error(err: &EditError) -> ApiError {
    match err {
        EditError::Validation(inner) => validation_error(inner),
        EditError::LinkNotFound(id) => ApiError::new(
            ApiErrorCode::LinkNotFound,
            err.to_string(),
            json!({"linkId": id.as_str()}),
        ),
        EditError::IndexOutOfRange { index, len } => ApiError::new(
            ApiErrorCode::IndexOutOfRange,
            err.to_string(),
            json!({"index": index, "len": len}),
        ),
        _ => ApiError::new(ApiErrorCode::Internal, err.to_string(), serde_json::Value::Null),
    }
}
