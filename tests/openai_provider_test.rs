//! OpenAI provider integration tests
//!
//! Runs `OpenAiProvider` against a `wiremock` server standing in for the
//! `/chat/completions` endpoint.

use serde_json::json;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use statefulchat::config::ProviderConfig;
use statefulchat::conversation::Message;
use statefulchat::error::ChatError;
use statefulchat::providers::{Credentials, OpenAiProvider, Provider, TokenUsage};

fn provider_for(server: &MockServer) -> OpenAiProvider {
    let config = ProviderConfig {
        api_base: format!("{}/v1", server.uri()),
        model: "gpt-4o-mini".to_string(),
        timeout_seconds: 5,
        ..Default::default()
    };
    OpenAiProvider::new(config, Credentials::with_key("OPENAI_API_KEY", "sk-test")).unwrap()
}

fn assert_gateway_error(err: &anyhow::Error) {
    assert!(
        matches!(err.downcast_ref::<ChatError>(), Some(ChatError::Gateway(_))),
        "expected gateway error, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_complete_sends_full_history_and_returns_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "You are a helpful assistant."},
                {"role": "user", "content": "Hello"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": " Hi there \n"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let messages = vec![
        Message::system("You are a helpful assistant."),
        Message::user("Hello"),
    ];

    let response = provider.complete(&messages).await.unwrap();

    assert_eq!(response.content, " Hi there \n");
    assert_eq!(response.usage, Some(TokenUsage::new(12, 3)));
}

#[tokio::test]
async fn test_error_status_is_gateway_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit exceeded"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[Message::user("Hello")])
        .await
        .unwrap_err();

    assert_gateway_error(&err);
    assert!(err.to_string().contains("429"));
    assert!(err.to_string().contains("rate limit exceeded"));
}

#[tokio::test]
async fn test_empty_choices_is_gateway_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[Message::user("Hello")])
        .await
        .unwrap_err();

    assert_gateway_error(&err);
}

#[tokio::test]
async fn test_malformed_body_is_gateway_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[Message::user("Hello")])
        .await
        .unwrap_err();

    assert_gateway_error(&err);
}

#[tokio::test]
async fn test_unreachable_server_is_gateway_error() {
    let server = MockServer::start().await;
    let provider = provider_for(&server);
    drop(server);

    let err = provider
        .complete(&[Message::user("Hello")])
        .await
        .unwrap_err();

    assert_gateway_error(&err);
}
