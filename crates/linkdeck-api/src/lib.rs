#![forbid(unsafe_code)]
//! Wire contract of the Linkdeck REST API: request/response DTOs, the
//! error envelope, and the mapping from domain errors to HTTP statuses.

mod convert;
mod dto;
mod error_mapping;
mod errors;

pub use convert::{edit_error, parse_error, validation_error};
pub use dto::{LoginRequest, RegisterRequest, SessionResponse};
pub use error_mapping::map_error;
pub use errors::{ApiError, ApiErrorCode};

pub const CRATE_NAME: &str = "linkdeck-api";
