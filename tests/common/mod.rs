#![allow(dead_code)]

use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use routine_builder::error::{Result, RoutineError};
use routine_builder::interfaces::providers::{CompletionClient, KeyValueStore};
use routine_builder::RoutinePreferences;

pub struct QueueCompletionClient {
    queue: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl QueueCompletionClient {
    pub fn new(queue: Vec<Result<String>>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::from(queue)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl CompletionClient for QueueCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().await.push(prompt.to_string());
        let mut guard = self.queue.lock().await;
        guard
            .pop_front()
            .unwrap_or_else(|| Err(RoutineError::RequestFailed("queue empty".to_string())))
    }
}

/// A store whose backend is unavailable.
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(RoutineError::Storage("disk unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(RoutineError::Storage("disk unavailable".to_string()))
    }
}

pub fn morning_strength() -> RoutinePreferences {
    RoutinePreferences {
        time_of_day: "Morning".to_string(),
        focus_area: "Strength".to_string(),
        time_available: "30".to_string(),
        energy_level: "High".to_string(),
        activities: vec!["stretching".to_string(), "cardio".to_string()],
    }
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "cmpl-1",
        "object": "chat.completion",
        "created": 1,
        "model": "mistral-small-latest",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}
