//! Host-accessible persistent preference storage.
//!
//! The bridge reads (and never requires) a handful of string-valued keys from
//! whatever persistence the embedding host provides. Read failures must
//! surface as absence, never as errors.

pub mod memory;

pub use memory::InMemoryPreferences;

use anyhow::Result;

/// Prefix applied to every key the bridge touches, keeping it clear of the
/// host's own namespace.
pub const KEY_PREFIX: &str = "MDBRIDGE_";

/// Qualify `key` with the bridge's storage prefix.
pub fn prefixed(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

/// Object-safe string key/value storage supplied by the host.
pub trait PreferenceStore: Send + Sync {
    /// Retrieves the value associated with the given key, or `None` if not
    /// found or not readable.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Sets the value for the given key, overwriting any existing value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the item with the given key.
    fn remove_item(&self, key: &str) -> Result<()>;
}
