use axum::{http::StatusCode, routing::post, Json, Router};
use llmload_client::{ChatBackend, HttpChatClient};
use llmload_common::LoadError;

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}:{}", addr.ip(), addr.port())
}

#[tokio::test]
async fn parses_standard_envelope() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|Json(req): Json<serde_json::Value>| async move {
            assert_eq!(req["messages"][0]["role"], "user");
            assert!((req["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
            Json(serde_json::json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "They filter blood."},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 6, "completion_tokens": 7, "total_tokens": 13}
            }))
        }),
    );
    let base = spawn_stub(app).await;

    let client = HttpChatClient::new(&format!("{base}/v1/chat/completions"), 0.7).unwrap();
    let completion = client
        .complete("test-model", "Why do we have kidneys?")
        .await
        .unwrap();
    assert_eq!(completion.answer, "They filter blood.");
    assert_eq!(completion.completion_tokens, 7);
}

#[tokio::test]
async fn non_200_surfaces_status_and_body() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
    );
    let base = spawn_stub(app).await;

    let client = HttpChatClient::new(&format!("{base}/v1/chat/completions"), 0.7).unwrap();
    let err = client.complete("test-model", "hello").await.unwrap_err();
    match err {
        LoadError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "model loading");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn garbage_payload_is_malformed() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(serde_json::json!({"choices": []})) }),
    );
    let base = spawn_stub(app).await;

    let client = HttpChatClient::new(&format!("{base}/v1/chat/completions"), 0.7).unwrap();
    let err = client.complete("test-model", "hello").await.unwrap_err();
    assert!(matches!(err, LoadError::MalformedResponse(_)));
}

#[tokio::test]
async fn empty_choices_is_malformed() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            Json(serde_json::json!({
                "choices": [],
                "usage": {"prompt_tokens": 0, "completion_tokens": 0, "total_tokens": 0}
            }))
        }),
    );
    let base = spawn_stub(app).await;

    let client = HttpChatClient::new(&format!("{base}/v1/chat/completions"), 0.7).unwrap();
    let err = client.complete("test-model", "hello").await.unwrap_err();
    match err {
        LoadError::MalformedResponse(msg) => assert!(msg.contains("no choices")),
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_http_error() {
    // Nothing listens on this port.
    let client = HttpChatClient::new("http://127.0.0.1:1/v1/chat/completions", 0.7).unwrap();
    let err = client.complete("test-model", "hello").await.unwrap_err();
    assert!(matches!(err, LoadError::Http(_)));
}
