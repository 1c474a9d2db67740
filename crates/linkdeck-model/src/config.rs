// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::link::LinkItem;
use crate::profile::{Profile, Username};
use crate::theme::Theme;

pub const DEFAULT_SPECIAL_TITLE: &str = "Contact Me";
pub const DEFAULT_SPECIAL_EMOJI: &str = "\u{1F4E7}";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    Empty(&'static str),
    TooLong(&'static str, usize),
    InvalidUsername(String),
    InvalidLinkId(String),
    DuplicateLinkId(String),
    EmptyLinkField { id: String, field: &'static str },
    NonDenseOrder,
    UsernameMismatch { expected: String, found: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidUsername(raw) => write!(
                f,
                "username must be lowercase ascii letters, digits, '-' or '_': {raw:?}"
            ),
            Self::InvalidLinkId(raw) => {
                write!(f, "link id must not contain surrounding whitespace: {raw:?}")
            }
            Self::DuplicateLinkId(id) => write!(f, "duplicate link id: {id}"),
            Self::EmptyLinkField { id, field } => {
                write!(f, "link {id} has an empty required field: {field}")
            }
            Self::NonDenseOrder => {
                f.write_str("link order values must form a dense zero-based ranking")
            }
            Self::UsernameMismatch { expected, found } => write!(
                f,
                "configuration username {found} does not match owner {expected}"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialButton {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_special_title")]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_special_emoji")]
    pub emoji: String,
}

impl Default for SpecialButton {
    fn default() -> Self {
        Self {
            enabled: false,
            title: default_special_title(),
            url: String::new(),
            emoji: default_special_emoji(),
        }
    }
}

fn default_special_title() -> String {
    DEFAULT_SPECIAL_TITLE.to_string()
}

fn default_special_emoji() -> String {
    DEFAULT_SPECIAL_EMOJI.to_string()
}

/// The full persisted state of one user's public page. Deserialization is
/// lenient: missing sections and optional fields are filled with documented
/// defaults; `validate` is the hard gate afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub links: Vec<LinkItem>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub special_button: SpecialButton,
}

impl Configuration {
    /// The document created once per user at registration.
    #[must_use]
    pub fn default_for(username: Username, display_name: impl Into<String>) -> Self {
        Self {
            profile: Profile::new_for(username, display_name),
            links: Vec::new(),
            theme: Theme::default(),
            special_button: SpecialButton::default(),
        }
    }

    /// Links in display order.
    #[must_use]
    pub fn sorted_links(&self) -> Vec<&LinkItem> {
        let mut refs: Vec<&LinkItem> = self.links.iter().collect();
        refs.sort_by_key(|l| l.order);
        refs
    }

    /// Re-ranks `links` to the canonical form: vector sorted by rank and
    /// `links[i].order == i`. Ties keep their incoming relative order.
    pub fn normalize_link_order(&mut self) {
        self.links.sort_by_key(|l| l.order);
        for (rank, link) in self.links.iter_mut().enumerate() {
            link.order = rank as u32;
        }
    }

    /// Hard validation gate. Order density is checked, not repaired; run
    /// `normalize_link_order` first when accepting external documents.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.profile.name.trim().is_empty() {
            return Err(ValidationError::Empty("profile name"));
        }
        Username::parse(self.profile.username.as_str())?;

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for link in &self.links {
            if link.id.as_str().is_empty() {
                return Err(ValidationError::Empty("link id"));
            }
            if !seen.insert(link.id.as_str()) {
                return Err(ValidationError::DuplicateLinkId(link.id.to_string()));
            }
            if link.name.trim().is_empty() {
                return Err(ValidationError::EmptyLinkField {
                    id: link.id.to_string(),
                    field: "name",
                });
            }
            if link.url.trim().is_empty() {
                return Err(ValidationError::EmptyLinkField {
                    id: link.id.to_string(),
                    field: "url",
                });
            }
        }

        for (rank, link) in self.links.iter().enumerate() {
            if link.order as usize != rank {
                return Err(ValidationError::NonDenseOrder);
            }
        }
        Ok(())
    }

    /// `profile.username` must match the key the document is stored under;
    /// renaming is out of scope.
    pub fn ensure_owner(&self, username: &Username) -> Result<(), ValidationError> {
        if &self.profile.username != username {
            return Err(ValidationError::UsernameMismatch {
                expected: username.to_string(),
                found: self.profile.username.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            links: Vec::new(),
            theme: Theme::default(),
            special_button: SpecialButton::default(),
        }
    }
}
