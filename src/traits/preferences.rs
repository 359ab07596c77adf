//! Per-site key-value preference store.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::PreferenceError;

/// Trait for the local per-site configuration store.
///
/// Keys are namespaced by the caller (fixed prefix plus course id). Values
/// are JSON so numbers, flags and strings share one store.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read a key. `Ok(None)` means the key was never written.
    async fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError>;

    /// Write a key.
    async fn set(&self, key: &str, value: Value) -> Result<(), PreferenceError>;

    /// Read a key, substituting `default` when it was never written.
    async fn get_or(&self, key: &str, default: Value) -> Result<Value, PreferenceError> {
        Ok(self.get(key).await?.unwrap_or(default))
    }
}
