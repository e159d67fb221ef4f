mod common;

use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;

use routine_builder::error::RoutineError;
use routine_builder::interfaces::providers::CompletionClient;
use routine_builder::providers::mistral::ChatCompletionClient;

use common::completion_body;

fn client_for(server: &MockServer) -> ChatCompletionClient {
    ChatCompletionClient::new(
        "test-key".to_string(),
        Some("mistral-small-latest".to_string()),
        Some(server.base_url()),
    )
}

#[tokio::test]
async fn sends_fixed_request_shape_and_returns_content() {
    let server = MockServer::start_async().await;
    let chat_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body(json!({
                    "model": "mistral-small-latest",
                    "messages": [{"role": "user", "content": "plan my morning"}],
                    "temperature": 0.7,
                    "max_tokens": 500
                }));
            then.status(200)
                .json_body(completion_body("## Routine\n- Stretch"));
        })
        .await;

    let text = client_for(&server).complete("plan my morning").await.unwrap();
    assert_eq!(text, "## Routine\n- Stretch");
    chat_mock.assert_hits(1);
}

#[tokio::test]
async fn non_success_status_is_request_failed() {
    let server = MockServer::start_async().await;
    let chat_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).json_body(json!({"message": "Unauthorized"}));
        })
        .await;

    let err = client_for(&server).complete("hi").await.unwrap_err();
    match err {
        RoutineError::RequestFailed(detail) => assert!(detail.contains("401")),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
    chat_mock.assert_hits(1);
}

#[tokio::test]
async fn unexpected_body_is_malformed_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let err = client_for(&server).complete("hi").await.unwrap_err();
    assert!(matches!(err, RoutineError::MalformedResponse(_)));

    let text_server = MockServer::start_async().await;
    text_server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).body("<html>gateway</html>");
        })
        .await;
    let err = client_for(&text_server).complete("hi").await.unwrap_err();
    assert!(matches!(err, RoutineError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_request_failed() {
    let client = ChatCompletionClient::with_timeout(
        "key".to_string(),
        None,
        Some("http://127.0.0.1:1".to_string()),
        Some(5),
    );
    let err = client.complete("hi").await.unwrap_err();
    assert!(matches!(err, RoutineError::RequestFailed(_)));
}
