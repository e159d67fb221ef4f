use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::interfaces::providers::{CompletionClient, KeyValueStore};
use crate::providers::mistral::ChatCompletionClient;
use crate::providers::sqlite::SqliteKeyValueStore;
use crate::services::controller::FormController;
use crate::services::preference_store::PreferenceStore;

/// Wires storage and the completion client together from a [`Config`].
#[derive(Clone)]
pub struct RoutineBuilder {
    store: PreferenceStore,
    client: Arc<dyn CompletionClient>,
}

impl RoutineBuilder {
    pub fn new(store: Arc<dyn KeyValueStore>, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            store: PreferenceStore::new(store),
            client,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?;
        let client = ChatCompletionClient::with_timeout(
            api_key,
            Some(config.model()),
            Some(config.base_url()),
            config.timeout_seconds(),
        );
        let store = SqliteKeyValueStore::new(&config.db_path())?;
        Ok(Self::new(Arc::new(store), Arc::new(client)))
    }

    pub fn from_config_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::from_file(path)?;
        Self::from_config(&config)
    }

    pub fn preference_store(&self) -> &PreferenceStore {
        &self.store
    }

    /// A fresh controller whose form has already been populated from storage.
    pub fn controller(&self) -> FormController {
        let mut controller = FormController::new(self.store.clone(), self.client.clone());
        controller.load();
        controller
    }
}
