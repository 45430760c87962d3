use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use hourglass::{create_router, AppState, StartInputs};

fn app() -> (Arc<AppState>, Router) {
    let state = AppState::new(20560, "127.0.0.1".to_string());
    let router = create_router(Arc::clone(&state));
    (state, router)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (_, router) = app();
    let (status, body) = send(&router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn status_starts_idle() {
    let (_, router) = app();
    let (status, body) = send(&router, get("/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["display"], "00:00:00");
    assert_eq!(body["port"], 20560);
    assert_eq!(body["last_action"], Value::Null);
}

#[tokio::test]
async fn start_runs_countdown() {
    let (_, router) = app();
    let (status, body) = send(
        &router,
        post_json("/start", json!({"hours": 1, "warning_minutes": 50, "message": "Hurry"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["phase"], "running");
    assert_eq!(body["timer"]["total_seconds"], 3600);
    assert_eq!(body["timer"]["warning_threshold_seconds"], 3000);
    assert_eq!(body["timer"]["warning_message"], "Hurry");
    assert_eq!(body["timer"]["display"], "01:00:00");

    let (_, body) = send(&router, get("/status")).await;
    assert_eq!(body["last_action"], "start");
}

#[tokio::test]
async fn start_accepts_raw_text_fields() {
    let (_, router) = app();
    let (status, body) = send(
        &router,
        post_json("/start", json!({"hours": "0.5 h", "warning_minutes": "5", "message": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["total_seconds"], 1800);
    assert_eq!(body["timer"]["warning_message"], "Time is running out!");
}

#[tokio::test]
async fn second_start_is_ignored() {
    let (_, router) = app();
    send(&router, post_json("/start", json!({"hours": 1, "warning_minutes": 5}))).await;

    let (status, body) = send(
        &router,
        post_json("/start", json!({"hours": 2, "warning_minutes": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "already_running");
    assert_eq!(body["timer"]["total_seconds"], 3600);
}

#[tokio::test]
async fn invalid_start_is_unprocessable() {
    let (_, router) = app();

    let cases = [
        (json!({"warning_minutes": 5}), "hours greater than 0"),
        (json!({"hours": 1}), "warning threshold greater than 0"),
        (json!({"hours": 1, "warning_minutes": 60}), "less than the total countdown time"),
    ];

    for (request, expected) in cases {
        let (status, body) = send(&router, post_json("/start", request)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], "error");
        assert!(
            body["message"].as_str().unwrap().contains(expected),
            "unexpected message {}",
            body["message"]
        );
        assert_eq!(body["timer"]["phase"], "idle");
    }
}

#[tokio::test]
async fn reset_returns_to_idle() {
    let (state, router) = app();
    send(&router, post_json("/start", json!({"hours": 1, "warning_minutes": 5}))).await;

    let (status, body) = send(&router, Request::post("/reset").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["remaining_seconds"], 0);

    let (action, time) = state.get_last_action();
    assert_eq!(action.as_deref(), Some("reset"));
    assert!(time.is_some());
}

/// Split an SSE body into `(event name, data)` pairs, skipping keep-alive comments
fn parse_sse(text: &str) -> Vec<(String, String)> {
    text.split("\n\n")
        .filter_map(|block| {
            let mut name = None;
            let mut data = String::new();
            for line in block.lines() {
                if let Some(value) = line.strip_prefix("event:") {
                    name = Some(value.trim().to_string());
                } else if let Some(value) = line.strip_prefix("data:") {
                    data.push_str(value.trim());
                }
            }
            name.map(|name| (name, data))
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn events_endpoint_streams_countdown() {
    let (state, router) = app();
    let response = router.oneshot(get("/events")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/event-stream"
    );

    // The handler has subscribed by the time the response is returned
    state
        .start_countdown(&StartInputs::new(0.001, 0.03, "Hurry"))
        .unwrap();

    let mut body = response.into_body().into_data_stream();
    let mut text = String::new();
    while !text.contains("countdown_complete") {
        let chunk = body.next().await.expect("stream ended early").unwrap();
        text.push_str(std::str::from_utf8(&chunk).unwrap());
    }

    let events = parse_sse(&text);
    let names: Vec<&str> = events.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        [
            "started",
            "display",
            "display",
            "display",
            "warning_raised",
            "display",
            "display",
            "countdown_complete",
        ]
    );

    let displays: Vec<Value> = events
        .iter()
        .filter(|(name, _)| name == "display")
        .map(|(_, data)| serde_json::from_str(data).unwrap())
        .collect();
    assert_eq!(displays[0]["text"], "00:00:04");
    assert_eq!(displays[4]["text"], "00:00:00");

    let (_, warning) = &events[4];
    let warning: Value = serde_json::from_str(warning).unwrap();
    assert_eq!(warning["event"], "warning_raised");
    assert_eq!(warning["message"], "Hurry");
}
