//! Contract tests for the OpenAI-compatible chat provider

use banter_ai_core::{AiError, ChatProvider, OpenAiChatProvider, OpenAiConfig, UserContent};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenAiChatProvider {
    OpenAiChatProvider::new(OpenAiConfig::new("test-key").with_base_url(server.uri()))
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

#[tokio::test]
async fn test_chat_sends_bearer_model_and_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-5-mini",
            "messages": [
                { "role": "system", "content": "be helpful" },
                { "role": "user", "content": "hello" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("reply!")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let reply = provider
        .chat("gpt-5-mini", "be helpful", UserContent::text("hello"))
        .await
        .unwrap();

    assert_eq!(reply, "reply!");
}

#[tokio::test]
async fn test_image_is_attached_as_data_url_part() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("data:image/jpeg;base64,aGVsbG8="))
        .and(body_string_contains("image_url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("a chat screenshot")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let reply = provider
        .chat(
            "gpt-5.2",
            "describe",
            UserContent::with_image("what is this", "aGVsbG8="),
        )
        .await
        .unwrap();

    assert_eq!(reply, "a chat screenshot");
}

#[tokio::test]
async fn test_provider_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited, slow down"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .chat("gpt-5.2", "sys", UserContent::text("hi"))
        .await
        .unwrap_err();

    match err {
        AiError::Provider { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("rate limited"));
        }
        other => panic!("expected Provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_malformed_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .chat("gpt-5.2", "sys", UserContent::text("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::MalformedReply(_)));
}

#[tokio::test]
async fn test_non_json_success_body_is_malformed_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .chat("gpt-5.2", "sys", UserContent::text("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::MalformedReply(_)));
}
