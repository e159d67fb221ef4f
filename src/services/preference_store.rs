use std::sync::Arc;

use tracing::info;

use crate::domains::preferences::{RoutinePreferences, SavedPreferences};
use crate::error::{Result, RoutineError};
use crate::interfaces::providers::KeyValueStore;

pub const PREFERENCES_KEY: &str = "routinePreferences";

#[derive(Clone)]
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Writes the whole record under the fixed key, replacing whatever was there.
    pub fn save(&self, preferences: &RoutinePreferences) -> Result<()> {
        let json = serde_json::to_string(preferences)
            .map_err(|e| RoutineError::Serialization(e.to_string()))?;
        self.store.set(PREFERENCES_KEY, &json)?;
        info!(
            time_of_day = %preferences.time_of_day,
            activities = preferences.activities.len(),
            "saved routine preferences"
        );
        Ok(())
    }

    /// `Ok(None)` when nothing was ever saved.
    pub fn load(&self) -> Result<Option<SavedPreferences>> {
        let Some(raw) = self.store.get(PREFERENCES_KEY)? else {
            return Ok(None);
        };
        let saved: SavedPreferences = serde_json::from_str(&raw)
            .map_err(|e| RoutineError::CorruptPreferences(e.to_string()))?;
        Ok(Some(saved))
    }
}
