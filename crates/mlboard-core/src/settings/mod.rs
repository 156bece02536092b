//! Typed user preferences over an injected key-value store.
//!
//! The store decides where values live (browser storage, a file, memory);
//! this module only knows keys, types and defaults.

pub mod errors;
pub mod store;
pub mod types;

pub use errors::SettingsError;
pub use store::{KeyValueStore, MemoryStore};
pub use types::{DashboardDefaults, DashboardSettings};
