#![forbid(unsafe_code)]
//! Structural edits over a configuration's link collection.
//!
//! Every operation takes the current [`linkdeck_model::Configuration`] by
//! reference and returns a fresh one; inputs are never mutated and a failed
//! operation applies nothing. After every successful structural edit the
//! link ranks form a dense zero-based permutation and ids stay unique.

mod error;
mod ops;

pub use error::EditError;
pub use ops::{
    add_link, delete_link, fresh_link_id, reorder_links, toggle_visibility, update_link,
    LinkDraft, LinkPatch,
};

pub const CRATE_NAME: &str = "linkdeck-editor";
