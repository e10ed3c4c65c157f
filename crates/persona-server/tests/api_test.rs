//! HTTP surface tests against an unconfigured deployment.
//!
//! Without provider keys every chat request resolves through the canned
//! short-circuit scripts, so the full request/response cycle is testable
//! with no network and no external tools.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use persona_server::{app, config::Config, AppState};
use serde_json::Value;
use tower::ServiceExt;

fn unconfigured_app() -> axum::Router {
    app(AppState::from_config(&Config::default()))
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check_returns_ok() {
    let response = unconfigured_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn empty_message_serves_greeting_script() {
    let response = unconfigured_app()
        .oneshot(chat_request(r#"{"message":""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let messages = json["messages"].as_array().unwrap();
    assert!(!messages.is_empty());
    assert_eq!(messages[0]["text"], "Hey there! How was your day?");
    // Canned lines carry no audio or cues.
    assert_eq!(messages[0]["audio"], "");
    assert!(messages[0]["lipsync"]["mouthCues"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_message_field_serves_greeting_script() {
    let response = unconfigured_app().oneshot(chat_request("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["messages"][0]["text"], "Hey there! How was your day?");
}

#[tokio::test]
async fn missing_credentials_serve_unconfigured_script() {
    let response = unconfigured_app()
        .oneshot(chat_request(r#"{"message":"hello there"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let text = json["messages"][0]["text"].as_str().unwrap();
    assert!(text.contains("API keys"));
    // Wire names follow the frontend's camelCase contract.
    assert!(json["messages"][0].get("facialExpression").is_some());
    assert!(json["messages"][0].get("animation").is_some());
}

#[tokio::test]
async fn unreachable_catalog_provider_maps_to_bad_gateway() {
    let mut config = Config::default();
    // Nothing listens here; the request fails without leaving the host.
    config.elevenlabs.base_url = "http://127.0.0.1:9".to_string();
    let router = app(AppState::from_config(&config));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/voices")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("catalog"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = unconfigured_app()
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
