use emoji_llm::{
    AnthropicProvider, ContentBlock, LLMError, MessagesProvider, MessagesRequest,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn provider_for(mock_server: &MockServer) -> AnthropicProvider {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    AnthropicProvider::with_client(client, "sk-test").with_base_url(mock_server.uri())
}

#[tokio::test]
async fn create_message_posts_request_and_decodes_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "sk-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_json(json!({
            "model": "claude-test",
            "max_tokens": 128,
            "messages": [{"role": "user", "content": "draw a cat"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "model": "claude-test",
            "content": [{"type": "text", "text": "<svg/>"}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 5, "output_tokens": 2}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let request = MessagesRequest::single_user("claude-test", 128, "draw a cat");

    let response = provider.create_message(&request).await.expect("create_message");

    assert_eq!(
        response.content,
        vec![ContentBlock::Text {
            text: "<svg/>".to_string()
        }]
    );
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let request = MessagesRequest::single_user("claude-test", 16, "hi");

    match provider.create_message(&request).await {
        Err(LLMError::Auth(message)) => assert!(message.contains("invalid x-api-key")),
        other => panic!("expected LLMError::Auth, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_api_error_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let request = MessagesRequest::single_user("claude-test", 16, "hi");

    match provider.create_message(&request).await {
        Err(LLMError::Api { status, body }) => {
            assert_eq!(status, 529);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected LLMError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_success_body_is_a_json_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let request = MessagesRequest::single_user("claude-test", 16, "hi");

    let result = provider.create_message(&request).await;
    assert!(matches!(result, Err(LLMError::Json(_))));
}

#[tokio::test]
async fn unreachable_service_is_an_http_error() {
    let mock_server = MockServer::start().await;
    let provider = provider_for(&mock_server);
    drop(mock_server);

    let request = MessagesRequest::single_user("claude-test", 16, "hi");

    let result = provider.create_message(&request).await;
    assert!(matches!(result, Err(LLMError::Http(_))));
}
