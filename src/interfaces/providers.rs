use async_trait::async_trait;

use crate::error::Result;

/// Sends one prompt to a text-completion service and returns the generated text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Local persistent string storage, one value per key.
///
/// `set` replaces any previous value wholesale.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
