use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, RoutineError};

pub const DEFAULT_MODEL: &str = "mistral-small-latest";
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_DB_PATH: &str = "./data/routine-builder.db";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub completion: Option<CompletionConfig>,
    pub storage: Option<StorageConfig>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| RoutineError::Config(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| RoutineError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise starts from an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// A credential passed on the command line or through the environment wins over the file.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.completion.get_or_insert_with(CompletionConfig::default).api_key = Some(key);
        }
        self
    }

    pub fn with_db_path(mut self, db_path: Option<String>) -> Self {
        if let Some(path) = db_path {
            self.storage.get_or_insert_with(StorageConfig::default).db_path = Some(path);
        }
        self
    }

    pub fn api_key(&self) -> Result<String> {
        self.completion
            .as_ref()
            .and_then(|c| c.api_key.clone())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                RoutineError::Config(
                    "missing completion api key (set MISTRAL_API_KEY or completion.api_key)"
                        .to_string(),
                )
            })
    }

    pub fn model(&self) -> String {
        self.completion
            .as_ref()
            .and_then(|c| c.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn base_url(&self) -> String {
        self.completion
            .as_ref()
            .and_then(|c| c.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.completion.as_ref().and_then(|c| c.timeout_seconds)
    }

    pub fn db_path(&self) -> String {
        self.storage
            .as_ref()
            .and_then(|s| s.db_path.clone())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_sections_are_missing() {
        let config = Config::default();
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.db_path(), DEFAULT_DB_PATH);
        assert!(config.timeout_seconds().is_none());
        assert!(matches!(config.api_key(), Err(RoutineError::Config(_))));
    }

    #[test]
    fn override_key_beats_file_key() {
        let config = Config {
            completion: Some(CompletionConfig {
                api_key: Some("from-file".to_string()),
                ..Default::default()
            }),
            storage: None,
        };
        let config = config.with_api_key(Some("from-env".to_string()));
        assert_eq!(config.api_key().unwrap(), "from-env");

        let config = config.with_api_key(Some("   ".to_string()));
        assert_eq!(config.api_key().unwrap(), "from-env");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = Config {
            completion: Some(CompletionConfig {
                api_key: Some(" ".to_string()),
                ..Default::default()
            }),
            storage: None,
        };
        assert!(config.api_key().is_err());
    }
}
