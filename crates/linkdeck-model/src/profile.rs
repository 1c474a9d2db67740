// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::config::ValidationError;

pub const USERNAME_MAX_LEN: usize = 39;

pub const DEFAULT_BIO: &str = "Welcome to my Linkdeck profile!";
pub const DEFAULT_AVATAR: &str = "\u{1F464}";

/// Public-page key. Doubles as the storage key, so the accepted alphabet
/// is deliberately narrow and never normalized implicitly.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::Empty("username"));
        }
        if input.len() > USERNAME_MAX_LEN {
            return Err(ValidationError::TooLong("username", USERNAME_MAX_LEN));
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(ValidationError::InvalidUsername(input.to_string()));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum AvatarType {
    #[default]
    Emoji,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_bio")]
    pub bio: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default)]
    pub avatar_type: AvatarType,
    #[serde(default)]
    pub username: Username,
}

impl Profile {
    /// The profile written at registration time.
    #[must_use]
    pub fn new_for(username: Username, display_name: impl Into<String>) -> Self {
        Self {
            name: display_name.into(),
            username,
            ..Self::default()
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            bio: default_bio(),
            avatar: default_avatar(),
            avatar_type: AvatarType::Emoji,
            username: Username::default(),
        }
    }
}

fn default_bio() -> String {
    DEFAULT_BIO.to_string()
}

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}
