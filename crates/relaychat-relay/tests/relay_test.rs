use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use mockito::Matcher;
use relaychat_relay::{build_router, state::AppState, RelayConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(config: RelayConfig) -> Router {
    build_router(Arc::new(AppState::new(config).unwrap()))
}

fn configured(upstream_url: String) -> RelayConfig {
    let mut config = RelayConfig::default().with_api_key("sk-test");
    config.upstream.url = upstream_url;
    config.upstream.timeout_secs = 5;
    config
}

fn post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let (status, _, body) = send(app(RelayConfig::default()), post("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid JSON body"}));
}

#[tokio::test]
async fn test_missing_messages_is_rejected() {
    for payload in [r#"{}"#, r#"{"messages": "hi"}"#, "null", "[1, 2]"] {
        let (status, _, body) = send(app(RelayConfig::default()), post(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert_eq!(body, json!({"error": "Request must include a messages array"}));
    }
}

#[tokio::test]
async fn test_missing_api_key_returns_500() {
    let (status, _, body) = send(
        app(RelayConfig::default()),
        post(r#"{"messages": [{"role": "user", "content": "hi"}]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "OpenAI API key not configured in relay"}));
}

#[tokio::test]
async fn test_forwards_with_fixed_model_and_key() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::Json(json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "hi"}],
            "max_tokens": 300
        })))
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#)
        .create_async()
        .await;

    let config = configured(format!("{}/v1/chat/completions", server.url()));
    let (status, headers, body) = send(
        app(config),
        // Caller-supplied model and max_tokens are ignored
        post(r#"{"messages": [{"role": "user", "content": "hi"}], "model": "gpt-3.5", "max_tokens": 9000}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"choices": [{"message": {"role": "assistant", "content": "Hello!"}}]})
    );
    assert!(headers.contains_key("x-request-id"));
    upstream.assert_async().await;
}

#[tokio::test]
async fn test_upstream_error_json_is_passed_through() {
    let mut server = mockito::Server::new_async().await;
    let _upstream = server
        .mock("POST", "/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let (status, _, body) = send(
        app(configured(server.url())),
        post(r#"{"messages": []}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["message"], "Incorrect API key provided");
}

#[tokio::test]
async fn test_non_json_upstream_returns_502() {
    let mut server = mockito::Server::new_async().await;
    let _upstream = server
        .mock("POST", "/")
        .with_status(500)
        .with_body("<html>gateway error</html>")
        .create_async()
        .await;

    let (status, _, body) = send(
        app(configured(server.url())),
        post(r#"{"messages": []}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Error contacting OpenAI");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_unreachable_upstream_returns_502() {
    let (status, _, body) = send(
        app(configured("http://127.0.0.1:1/v1/chat/completions".to_string())),
        post(r#"{"messages": [{"role": "user", "content": "hi"}]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Error contacting OpenAI");
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/")
        .header(header::ORIGIN, "https://shop.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(app(RelayConfig::default()), request).await;

    assert!(status.is_success());
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_bare_options_probe_succeeds() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let (status, _, _) = send(app(RelayConfig::default()), request).await;
    assert!(status.is_success());
}

#[tokio::test]
async fn test_error_responses_carry_cors_headers() {
    let mut request = post("{not json");
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://shop.example.com".parse().unwrap());

    let (status, headers, _) = send(app(RelayConfig::default()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_health_reports_upstream_configuration() {
    let health = || {
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap()
    };

    let (status, _, body) = send(app(RelayConfig::default()), health()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["upstream_configured"], false);

    let (_, _, body) = send(app(RelayConfig::default().with_api_key("sk-test")), health()).await;
    assert_eq!(body["upstream_configured"], true);
}
