#![forbid(unsafe_code)]
//! Persistence for Linkdeck: one JSON document per username for the page
//! configuration, one for the account record. Overwrite semantics,
//! last-write-wins; the contract carries no concurrency token, so callers
//! serialize their own edits.

mod contracts;
mod error;
mod local;
mod memory;

pub use contracts::{ProfileStore, UserRecord};
pub use error::{StoreError, StoreErrorCode};
pub use local::LocalFsStore;
pub use memory::MemoryStore;

pub const CRATE_NAME: &str = "linkdeck-store";
