// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidRequestBody,
    ValidationFailed,
    IndexOutOfRange,
    ConfigNotFound,
    UserNotFound,
    LinkNotFound,
    InvalidCredentials,
    Unauthorized,
    Forbidden,
    UsernameTaken,
    EmailTaken,
    StoreUnavailable,
    NotReady,
    Internal,
}

/// Wire error envelope; handlers wrap it as `{"error": {...}}` and attach
/// the propagated request id before responding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: "req-unknown".to_string(),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::InvalidRequestBody, message, Value::Null)
    }

    #[must_use]
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::ValidationFailed, message, Value::Null)
    }

    #[must_use]
    pub fn config_not_found(username: &str) -> Self {
        Self::new(
            ApiErrorCode::ConfigNotFound,
            format!("no configuration for username: {username}"),
            json!({"username": username}),
        )
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(
            ApiErrorCode::Unauthorized,
            "missing or expired session token",
            Value::Null,
        )
    }

    #[must_use]
    pub fn forbidden(username: &str) -> Self {
        Self::new(
            ApiErrorCode::Forbidden,
            format!("session does not own configuration: {username}"),
            json!({"username": username}),
        )
    }

    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::new(
            ApiErrorCode::InvalidCredentials,
            "invalid email or password",
            Value::Null,
        )
    }

    #[must_use]
    pub fn username_taken(username: &str) -> Self {
        Self::new(
            ApiErrorCode::UsernameTaken,
            format!("username already registered: {username}"),
            json!({"username": username}),
        )
    }

    #[must_use]
    pub fn email_taken(email: &str) -> Self {
        Self::new(
            ApiErrorCode::EmailTaken,
            format!("email already registered: {email}"),
            json!({"email": email}),
        )
    }

    #[must_use]
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::StoreUnavailable, message, Value::Null)
    }
}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de>>() {}
    assert_traits::<ApiErrorCode>();
    assert_traits::<ApiError>();
};
