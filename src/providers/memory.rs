use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Result, RoutineError};
use crate::interfaces::providers::KeyValueStore;

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    #[doc(hidden)]
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.entries.write() {
            guard.insert(key.to_string(), value.to_string());
        }
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| RoutineError::Storage("store lock poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| RoutineError::Storage("store lock poisoned".to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
