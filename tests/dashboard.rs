use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use hikeprep_rs::{config::Config, routes, state::AppState, types::phase::Phase};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(config: Config) -> Router {
    let state = AppState::new(config);
    Router::new().merge(routes::router()).with_state(state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, serde_json::from_slice(&bytes).expect("json"))
}

async fn log(app: &Router, session: Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/sessions")
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(session.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn empty_dashboard_is_zeroed() {
    let app = app(Config::default());
    let (status, body) = get_json(&app, "/api/dashboard?today=2026-03-18").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "base");
    assert_eq!(body["week_start"], "2026-03-16");
    assert_eq!(body["week_end"], "2026-03-22");
    assert_eq!(body["this_week"]["session_count"], 0);
    assert_eq!(body["weekly_progress_pct"], 0);
    assert_eq!(body["readiness"]["score"].as_u64().map(|s| s <= 100), Some(true));
    assert_eq!(body["series"]["weeks"].as_array().map(Vec::len), Some(12));
    assert_eq!(body["week_flags"].as_array().map(Vec::len), Some(12));
}

#[tokio::test]
async fn dashboard_reflects_logged_sessions() {
    let app = app(Config::default());
    log(
        &app,
        json!({
            "date": "2026-03-16", "type": "incline", "duration_min": 60,
            "speed_mph": 3.0, "incline_pct": 10, "pack_weight_lb": 20, "perceived_effort": 6
        }),
    )
    .await;
    log(
        &app,
        json!({"date": "2026-03-17", "type": "strength", "duration_min": 45, "notes": "shin splint twinge"}),
    )
    .await;

    let (status, body) = get_json(&app, "/api/dashboard?today=2026-03-18&phase=build&weeks=8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "build");
    assert_eq!(body["target"]["vertical_gain_ft"], 3750.0);
    assert_eq!(body["this_week"]["session_count"], 2);
    assert_eq!(body["this_week"]["avg_pack_weight_lb"], 10.0);
    // 1584 / 3750
    assert_eq!(body["weekly_progress_pct"], 42);

    let series = &body["series"];
    for key in ["weeks", "vertical_gain_ft", "avg_pack_weight_lb", "training_stress"] {
        assert_eq!(series[key].as_array().map(Vec::len), Some(8), "{key}");
    }
    assert_eq!(series["weeks"][7], "Mar 16");
    assert_eq!(series["vertical_gain_ft"][7], 1584.0);

    let alerts: Vec<&str> = body["alerts"]
        .as_array()
        .expect("alerts")
        .iter()
        .filter_map(|a| a["kind"].as_str())
        .collect();
    assert_eq!(alerts.first().copied(), Some("injury_signal"));
}

#[tokio::test]
async fn pinned_phase_overrides_calendar() {
    let config = Config {
        active_phase: Some(Phase::Peak),
        ..Config::default()
    };
    let app = app(config);
    let (status, body) = get_json(&app, "/api/dashboard?today=2026-01-05").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "peak");
}

#[tokio::test]
async fn dashboard_rejects_bad_parameters() {
    let app = app(Config::default());
    let (status, _) = get_json(&app, "/api/dashboard?today=2026-03-18&phase=offseason").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&app, "/api/dashboard?today=2026-03-18&weeks=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn phase_calendar_lists_months() {
    let app = app(Config::default());
    let (status, body) = get_json(&app, "/api/phases?from=2026-03-14&months=7").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().expect("rows");
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["month"], "Mar 2026");
    assert_eq!(rows[0]["starts"], "2026-03-01");
    let phases: Vec<&str> = rows.iter().filter_map(|r| r["phase"].as_str()).collect();
    assert_eq!(
        phases,
        vec!["base", "build", "build", "peak", "peak", "taper", "taper"]
    );
    assert_eq!(rows[3]["profile"]["vertical_gain_ft"]["max"], 9000.0);
}
