//! In-memory preference store for testing.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::PreferenceError;
use crate::traits::PreferenceStore;

/// Preference store kept in memory, with injectable failures.
///
/// Clones share their contents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferences {
    values: Arc<Mutex<HashMap<String, Value>>>,
    read_should_fail: Arc<Mutex<bool>>,
    write_should_fail: Arc<Mutex<bool>>,
    writes: Arc<Mutex<Vec<(String, Value)>>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: Value) -> Self {
        self.values.lock().unwrap().insert(key.to_string(), value);
        self
    }

    pub fn set_read_should_fail(&self, should_fail: bool) {
        *self.read_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Current value of a key, bypassing failure injection.
    pub fn value(&self, key: &str) -> Option<Value> {
        self.values.lock().unwrap().get(key).cloned()
    }

    /// Every successful write, in order.
    pub fn writes(&self) -> Vec<(String, Value)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferences {
    async fn get(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        if *self.read_should_fail.lock().unwrap() {
            return Err(PreferenceError::ReadFailed {
                key: key.to_string(),
                message: "Simulated read failure".to_string(),
            });
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), PreferenceError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(PreferenceError::WriteFailed {
                key: key.to_string(),
                message: "Simulated write failure".to_string(),
            });
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        self.writes.lock().unwrap().push((key.to_string(), value));
        Ok(())
    }
}
