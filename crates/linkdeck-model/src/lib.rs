#![forbid(unsafe_code)]
//! Linkdeck model SSOT.
//!
//! Every persisted or wire-visible shape of a user's public page lives
//! here: the `Configuration` aggregate, its closed enumerations, the
//! validation/normalization rules, and the portable import/export codec.
//!
//! ```compile_fail
//! use linkdeck_model::ColorScheme;
//!
//! fn exhaustive_match(s: ColorScheme) -> &'static str {
//!     match s {
//!         ColorScheme::Light => "l",
//!         ColorScheme::Dark => "d",
//!         ColorScheme::Royal => "r",
//!     }
//! }
//! ```

mod codec;
mod config;
mod link;
mod profile;
mod theme;
mod user;

pub use codec::{export_config, import_config, ParseError};
pub use config::{Configuration, SpecialButton, ValidationError};
pub use link::{IconType, LinkId, LinkItem, LINK_ID_MAX_LEN, LINK_NAME_MAX_LEN, LINK_URL_MAX_LEN};
pub use profile::{AvatarType, Profile, Username, DEFAULT_AVATAR, DEFAULT_BIO, USERNAME_MAX_LEN};
pub use theme::{
    ButtonStyle, ColorScheme, Theme, DEFAULT_BACKGROUND_COLOR, DEFAULT_FONT_FAMILY,
};
pub use user::User;

pub const CRATE_NAME: &str = "linkdeck-model";
