use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use crate::types::phase::{Phase, PhaseProfile, PhaseTarget};

const DEFAULT_MONTHS: u32 = 7;
const MAX_MONTHS: u32 = 24;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/phases", get(phase_calendar))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CalendarQuery {
    from: Option<NaiveDate>,
    months: Option<u32>,
}

#[derive(Serialize)]
struct PhaseMonth {
    month: String,
    starts: NaiveDate,
    phase: Phase,
    profile: PhaseProfile,
    target: PhaseTarget,
}

/// Phase in effect on the first of each month, starting with the month of `from`.
async fn phase_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<PhaseMonth>>, AppError> {
    let from = query.from.unwrap_or_else(|| Local::now().date_naive());
    let months = query.months.unwrap_or(DEFAULT_MONTHS);
    if months == 0 || months > MAX_MONTHS {
        return Err(AppError::BadRequest(format!(
            "months must be between 1 and {} (got {})",
            MAX_MONTHS, months
        )));
    }

    let first = from
        .with_day(1)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {}", from)))?;

    let rows = (0..months)
        .map(|offset| -> Result<PhaseMonth, AppError> {
            let starts = first
                .checked_add_months(Months::new(offset))
                .ok_or_else(|| AppError::BadRequest("Date out of range".to_string()))?;
            let phase = state.active_phase(starts);
            let profile = phase.profile();
            Ok(PhaseMonth {
                month: starts.format("%b %Y").to_string(),
                starts,
                phase,
                profile,
                target: profile.target(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(rows))
}
