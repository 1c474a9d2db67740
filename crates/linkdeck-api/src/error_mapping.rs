// SPDX-License-Identifier: Apache-2.0

use crate::errors::{ApiError, ApiErrorCode};

#[must_use]
pub fn map_error(error: &ApiError) -> u16 {
    match error.code {
        ApiErrorCode::InvalidRequestBody
        | ApiErrorCode::ValidationFailed
        | ApiErrorCode::IndexOutOfRange => 400,
        ApiErrorCode::Unauthorized | ApiErrorCode::InvalidCredentials => 401,
        ApiErrorCode::Forbidden => 403,
        ApiErrorCode::ConfigNotFound | ApiErrorCode::UserNotFound | ApiErrorCode::LinkNotFound => {
            404
        }
        ApiErrorCode::UsernameTaken | ApiErrorCode::EmailTaken => 409,
        ApiErrorCode::StoreUnavailable | ApiErrorCode::NotReady => 503,
        ApiErrorCode::Internal => 500,
    }
}
