// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::config::ValidationError;

pub const LINK_ID_MAX_LEN: usize = 64;
pub const LINK_NAME_MAX_LEN: usize = 256;
pub const LINK_URL_MAX_LEN: usize = 2048;

/// Identity of a link, unique within its owning configuration only.
/// Caller-generated; the editor mints fresh decimal ids.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::Empty("link id"));
        }
        if input.trim() != input {
            return Err(ValidationError::InvalidLinkId(input.to_string()));
        }
        if input.len() > LINK_ID_MAX_LEN {
            return Err(ValidationError::TooLong("link id", LINK_ID_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn numeric(value: u64) -> Self {
        Self(value.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum IconType {
    #[default]
    Lucide,
    Emoji,
    Image,
}

/// One entry in the public link list. `order` is a zero-based dense rank;
/// the canonical in-memory form keeps the owning vector sorted by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkItem {
    pub id: LinkId,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub icon_type: IconType,
    #[serde(default = "default_show")]
    pub show: bool,
    #[serde(default)]
    pub order: u32,
}

fn default_show() -> bool {
    true
}
