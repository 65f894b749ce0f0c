use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use hikeprep_rs::{config::Config, routes, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(Config::default());
    Router::new().merge(routes::router()).with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json")
    };
    (status, value)
}

fn incline_session() -> Value {
    json!({
        "date": "2026-03-16",
        "type": "incline",
        "duration_min": 60.0,
        "speed_mph": 3.0,
        "incline_pct": 10.0,
        "pack_weight_lb": 20.0,
        "perceived_effort": 6
    })
}

#[tokio::test]
async fn log_session_returns_metrics() {
    let app = app();
    let (status, body) = send(&app, "POST", "/api/sessions", Some(incline_session())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("id").and_then(Value::as_str).is_some());
    assert_eq!(body["type"], "incline");
    assert_eq!(body["treadmill"]["speed_mph"], 3.0);

    let vertical = body["metrics"]["vertical_gain_ft"].as_f64().expect("vertical");
    assert!((vertical - 1584.0).abs() < 1e-6);
    let stress = body["metrics"]["training_stress"].as_f64().expect("stress");
    assert!((stress - 540.0).abs() < 1e-6);
}

#[tokio::test]
async fn effort_defaults_to_five() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"date": "2026-03-17", "type": "strength", "duration_min": 40})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["perceived_effort"], 5);
    assert_eq!(body["metrics"]["vertical_gain_ft"], 0.0);
}

#[tokio::test]
async fn invalid_sessions_are_rejected() {
    let app = app();
    let cases = [
        json!({"date": "2026-03-16", "type": "yoga", "duration_min": 30}),
        json!({"date": "2026-03-16", "type": "flat", "duration_min": 0}),
        json!({"date": "2026-03-16", "type": "flat", "duration_min": 30, "perceived_effort": 11}),
        json!({"date": "2026-03-16", "type": "flat", "duration_min": 30, "perceived_effort": -1}),
        json!({"date": "2026-03-16", "type": "incline", "duration_min": 30, "incline_pct": -2}),
        json!({"date": "2026-03-16", "type": "incline", "duration_min": 30, "speed_mph": 3, "distance_mi": 2}),
        json!({"date": "2026-03-16", "type": "flat", "duration_min": 1e300, "perceived_effort": 10}),
        json!({"date": "2026-03-16", "type": "flat", "duration_min": 30, "pack_weight_lb": 1e300}),
    ];

    for case in cases {
        let (status, body) = send(&app, "POST", "/api/sessions", Some(case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {case}");
        assert!(body.get("error").and_then(Value::as_str).is_some());
    }

    let (_, sessions) = send(&app, "GET", "/api/sessions", None).await;
    assert_eq!(sessions.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn list_is_latest_first_and_limited() {
    let app = app();
    for day in ["2026-03-10", "2026-03-16", "2026-03-12"] {
        let body = json!({"date": day, "type": "flat", "duration_min": 30, "speed_mph": 3.2});
        let (status, _) = send(&app, "POST", "/api/sessions", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|s| s["date"].as_str())
        .collect();
    assert_eq!(dates, vec!["2026-03-16", "2026-03-12", "2026-03-10"]);

    let (_, body) = send(&app, "GET", "/api/sessions?limit=1", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn delete_removes_session() {
    let app = app();
    let (_, created) = send(&app, "POST", "/api/sessions", Some(incline_session())).await;
    let id = created["id"].as_str().expect("id").to_string();

    let (status, fetched) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);

    let (status, _) = send(&app, "DELETE", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
