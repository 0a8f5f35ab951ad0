//! Key-value storage interface.
//!
//! History and draft data are persisted as JSON strings under well-known
//! keys. Any medium that can get and set strings by key can back them.

use crate::error::Result;

pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` if nothing is stored.
    fn get_string(&self, key: &str) -> Result<Option<String>>;

    fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Reads `key`, passes the current value to `apply` and stores what it
    /// returns, all under one exclusive hold of the key. Nothing is written
    /// when `apply` fails.
    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<String>) -> Result<String>,
    ) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
