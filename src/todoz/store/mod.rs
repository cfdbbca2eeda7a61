//! # Storage Layer
//!
//! Todoz persists everything through a single abstraction: a durable key-value slot.
//! The [`KeyValueStore`] trait is deliberately tiny; it knows nothing about todos. The
//! persistence adapter (`persist.rs`) decides *what* goes into a slot, the store only
//! decides *how* bytes reach durable storage.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage. Each key maps to `<root>/<key>.json`.
//!   Writes go to a temp file first and are renamed into place, so a crash never leaves
//!   a half-written slot behind.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O. Can simulate
//!   write failures to exercise error paths.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── todos.json      # The todo collection (JSON array)
//! └── config.json     # Configuration (see config.rs)
//! ```

use crate::error::{Result, TodozError};

pub mod fs;
pub mod memory;

/// Abstract interface for a durable key-value slot.
///
/// All methods take `&self`; implementations that need mutation use interior mutability.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if nothing was ever written there.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be a single atomic replacement: readers see either the old or the new value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Keys become file names, so they are limited to a conservative character set.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(TodozError::Store(format!("Invalid storage key: {:?}", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_keys() {
        assert!(validate_key("todos").is_ok());
        assert!(validate_key("todos-v2.backup").is_ok());
        assert!(validate_key("my_list").is_ok());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../todos").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(".hidden").is_err());
    }
}
