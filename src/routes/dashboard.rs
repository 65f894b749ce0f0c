use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::error::AppError;
use crate::metrics::dashboard::{Dashboard, DashboardOptions};
use crate::state::AppState;
use crate::types::phase::Phase;

const MAX_WEEKS: usize = 104;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(dashboard))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DashboardQuery {
    today: Option<NaiveDate>,
    phase: Option<String>,
    weeks: Option<usize>,
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Dashboard>, AppError> {
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());

    let phase = match query.phase.as_deref() {
        Some(raw) => Phase::from_str(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown phase: {}", raw)))?,
        None => state.active_phase(today),
    };

    let config = state.config();
    let series_weeks = query.weeks.unwrap_or(config.series_weeks);
    if series_weeks == 0 || series_weeks > MAX_WEEKS {
        return Err(AppError::BadRequest(format!(
            "weeks must be between 1 and {} (got {})",
            MAX_WEEKS, series_weeks
        )));
    }

    let sessions = state.snapshot();
    let options = DashboardOptions {
        today,
        phase,
        series_weeks,
        readiness_weeks: config.readiness_weeks,
    };
    let dashboard = Dashboard::build(&sessions, options, &config.training)?;

    tracing::info!(
        "Dashboard for {} ({} phase): {} sessions, readiness {}, {} alerts",
        today,
        phase.as_str(),
        sessions.len(),
        dashboard.readiness.score,
        dashboard.alerts.len()
    );

    Ok(Json(dashboard))
}
