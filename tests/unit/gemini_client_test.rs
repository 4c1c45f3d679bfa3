use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chatrelay::services::gemini::GeminiClient;
use chatrelay::services::provider::{ChatProvider, ProviderError};

const GENERATE_PATH: &str = "/models/gemini-flash-latest:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        server.uri(),
        "test-key".to_string(),
        "gemini-flash-latest".to_string(),
    )
}

fn candidate_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [{ "text": text }] } }
        ]
    })
}

#[tokio::test]
async fn test_send_returns_candidate_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("Hi there")))
        .mount(&mock_server)
        .await;

    let session = client_for(&mock_server).create_session();
    let reply = session.send("Hello").await.unwrap();

    assert_eq!(reply, "Hi there");
}

#[tokio::test]
async fn test_second_send_replays_history() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("reply")))
        .mount(&mock_server)
        .await;

    let session = client_for(&mock_server).create_session();
    session.send("first").await.unwrap();
    session.send("second").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let contents = second["contents"].as_array().unwrap();
    // prior user turn, prior model reply, new user turn
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0]["role"], "user");
    assert_eq!(contents[0]["parts"][0]["text"], "first");
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[2]["parts"][0]["text"], "second");
}

#[tokio::test]
async fn test_api_error_status_and_message_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "quota exceeded" }
        })))
        .mount(&mock_server)
        .await;

    let session = client_for(&mock_server).create_session();
    let err = session.send("Hello").await.unwrap_err();

    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_empty_candidates_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&mock_server)
        .await;

    let session = client_for(&mock_server).create_session();
    let err = session.send("Hello").await.unwrap_err();

    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_failed_send_leaves_history_untouched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("ok")))
        .mount(&mock_server)
        .await;

    let session = client_for(&mock_server).create_session();
    session.send("doomed").await.unwrap_err();
    session.send("retry").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let contents = second["contents"].as_array().unwrap();
    // the failed turn was not committed
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0]["parts"][0]["text"], "retry");
}

#[tokio::test]
async fn test_multi_part_candidate_text_is_concatenated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Hello, " }, { "text": "world" }]
                }
            }]
        })))
        .mount(&mock_server)
        .await;

    let session = client_for(&mock_server).create_session();
    let reply = session.send("Hello").await.unwrap();

    assert_eq!(reply, "Hello, world");
}
