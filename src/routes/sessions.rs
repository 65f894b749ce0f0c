use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, SessionError};
use crate::state::AppState;
use crate::types::session::{Session, SessionType, StoredSession, Treadmill};
use crate::types::summary::SessionMetrics;

const DEFAULT_LIST_LIMIT: usize = 200;
const DEFAULT_EFFORT: i64 = 5;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", get(list_sessions).post(log_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct LogSessionRequest {
    date: NaiveDate,
    #[serde(rename = "type")]
    session_type: String,
    duration_min: f64,
    speed_mph: Option<f64>,
    distance_mi: Option<f64>,
    #[serde(default)]
    incline_pct: f64,
    #[serde(default)]
    pack_weight_lb: f64,
    perceived_effort: Option<i64>,
    notes: Option<String>,
}

impl LogSessionRequest {
    fn into_session(self) -> Result<Session, AppError> {
        let session_type = SessionType::parse(&self.session_type)?;

        let treadmill = match (self.speed_mph, self.distance_mi) {
            (Some(_), Some(_)) => {
                return Err(AppError::BadRequest(
                    "Provide either speed_mph or distance_mi, not both".to_string(),
                ))
            }
            (Some(mph), None) => Some(Treadmill::SpeedMph(mph)),
            (None, Some(miles)) => Some(Treadmill::DistanceMi(miles)),
            (None, None) => None,
        };

        let effort = self.perceived_effort.unwrap_or(DEFAULT_EFFORT);
        let perceived_effort =
            u8::try_from(effort).map_err(|_| SessionError::EffortOutOfRange(effort))?;

        let session = Session {
            date: self.date,
            session_type,
            duration_min: self.duration_min,
            incline_pct: self.incline_pct,
            treadmill,
            pack_weight_lb: self.pack_weight_lb,
            perceived_effort,
            notes: self
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        };
        session.validate()?;
        Ok(session)
    }
}

#[derive(Serialize)]
struct SessionResponse {
    #[serde(flatten)]
    stored: StoredSession,
    metrics: SessionMetrics,
}

impl SessionResponse {
    fn new(stored: StoredSession, state: &AppState) -> Result<Self, AppError> {
        let metrics = SessionMetrics::compute(&stored.session, &state.config().training)?;
        Ok(Self { stored, metrics })
    }
}

#[derive(Deserialize)]
struct ListQuery {
    limit: Option<usize>,
}

async fn log_session(
    State(state): State<AppState>,
    Json(request): Json<LogSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = request.into_session().map_err(|err| {
        tracing::warn!("Rejected session: {}", err);
        err
    })?;

    let stored = state.insert(session);
    tracing::info!(
        "Logged {} session {} on {} ({} min)",
        stored.session.session_type.as_str(),
        stored.id,
        stored.session.date,
        stored.session.duration_min
    );

    Ok((StatusCode::CREATED, Json(SessionResponse::new(stored, &state)?)))
}

async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SessionResponse>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let items = state
        .list(limit)
        .into_iter()
        .map(|stored| SessionResponse::new(stored, &state))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(items))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let id = parse_id(&id)?;
    let stored = state
        .get(&id)
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    Ok(Json(SessionResponse::new(stored, &state)?))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state
        .remove(&id)
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    tracing::info!("Deleted session {}", id);
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid session id: {}", raw)))
}
