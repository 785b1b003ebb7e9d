//! Key-value persistence trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;

/// Key under which the raw credential string is persisted.
pub const TOKEN_KEY: &str = "token";

/// Key under which the serialized [`Identity`](crate::Identity) is persisted.
pub const USER_KEY: &str = "user";

/// A simple string-to-string store that survives process restarts.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Missing keys yield `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Remove several values.
    ///
    /// Every key is attempted even if an earlier removal fails; the first
    /// error is returned.
    async fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let mut first_err = None;
        for key in keys {
            if let Err(e) = self.remove(key).await {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// A store handle shared between the pipeline and the session store.
pub type SharedStore = Arc<dyn KeyValueStore>;
