// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use linkdeck_model::{LinkId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EditError {
    Validation(ValidationError),
    LinkNotFound(LinkId),
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::LinkNotFound(id) => write!(f, "no link with id {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} links")
            }
        }
    }
}

impl std::error::Error for EditError {}

impl From<ValidationError> for EditError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}
