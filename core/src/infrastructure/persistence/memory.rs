use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::{common::entities::app_errors::CoreError, inventory::ports::LocalStore};

/// Process-local store for the demo and for tests. Nothing survives a
/// restart.
#[derive(Default)]
pub struct InMemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            map: Mutex::new(entries.into_iter().collect()),
        }
    }
}

impl LocalStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self
            .map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
