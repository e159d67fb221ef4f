use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutineError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("corrupt preferences: {0}")]
    CorruptPreferences(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, RoutineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_category_and_detail() {
        let err = RoutineError::RequestFailed("status 503".to_string());
        assert_eq!(format!("{err}"), "request failed: status 503");

        let err = RoutineError::CorruptPreferences("expected value".to_string());
        assert!(format!("{err}").contains("corrupt preferences"));

        let ok: Result<()> = Ok(());
        assert!(ok.is_ok());
    }
}
