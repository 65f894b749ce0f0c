use std::cmp::Ordering;

use chrono::{Datelike, Duration, NaiveDate};
use rayon::prelude::*;

use crate::config::TrainingConfig;
use crate::error::SessionError;
use crate::types::session::{Session, Treadmill};
use crate::types::summary::{SessionMetrics, WeeklySummary};

/// Monday of the week containing `date`.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn in_week(date: NaiveDate, week_start: NaiveDate) -> bool {
    date >= week_start && date < week_start + Duration::days(7)
}

/// Totals for sessions dated in `[week_start, week_start + 7 days)`.
///
/// The pack average divides by every session in the window, so unloaded
/// strength or recovery days pull it down. An empty window gives a zeroed
/// summary.
///
/// Sessions are summed in [`canonical_order`], so the totals are bit-for-bit
/// the same however the input is ordered.
pub fn aggregate_week(
    sessions: &[Session],
    week_start: NaiveDate,
    config: &TrainingConfig,
) -> Result<WeeklySummary, SessionError> {
    let mut summary = WeeklySummary::empty(week_start);
    let mut pack_total = 0.0;

    let mut in_window: Vec<&Session> = sessions
        .iter()
        .filter(|s| in_week(s.date, week_start))
        .collect();
    in_window.sort_by(|a, b| canonical_order(a, b));

    for session in in_window {
        let metrics = SessionMetrics::compute(session, config)?;

        summary.session_count += 1;
        summary.total_vertical_gain_ft += metrics.vertical_gain_ft;
        summary.total_duration_min += session.duration_min;
        summary.training_stress += metrics.training_stress;
        summary.total_load_score += metrics.load_score;
        summary.longest_session_min = summary.longest_session_min.max(session.duration_min);
        pack_total += session.pack_weight_lb;
    }

    if summary.session_count > 0 {
        summary.avg_pack_weight_lb = pack_total / summary.session_count as f64;
    }

    Ok(summary)
}

/// Total order over every field that feeds a session's metrics.
pub fn canonical_order(a: &Session, b: &Session) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.duration_min.total_cmp(&b.duration_min))
        .then_with(|| a.pack_weight_lb.total_cmp(&b.pack_weight_lb))
        .then_with(|| a.perceived_effort.cmp(&b.perceived_effort))
        .then_with(|| a.session_type.as_str().cmp(b.session_type.as_str()))
        .then_with(|| a.incline_pct.total_cmp(&b.incline_pct))
        .then_with(|| treadmill_key(a).cmp(&treadmill_key(b)))
        .then_with(|| treadmill_value(a).total_cmp(&treadmill_value(b)))
}

fn treadmill_key(session: &Session) -> u8 {
    match session.treadmill {
        None => 0,
        Some(Treadmill::SpeedMph(_)) => 1,
        Some(Treadmill::DistanceMi(_)) => 2,
    }
}

fn treadmill_value(session: &Session) -> f64 {
    match session.treadmill {
        None => 0.0,
        Some(Treadmill::SpeedMph(v)) | Some(Treadmill::DistanceMi(v)) => v,
    }
}

/// Summaries for `weeks` consecutive weeks ending with the week of `today`,
/// oldest first. Weeks are aggregated in parallel.
pub fn recent_weeks(
    sessions: &[Session],
    today: NaiveDate,
    weeks: usize,
    config: &TrainingConfig,
) -> Result<Vec<WeeklySummary>, SessionError> {
    week_starts(today, weeks)
        .into_par_iter()
        .map(|start| aggregate_week(sessions, start, config))
        .collect()
}

pub fn week_starts(today: NaiveDate, weeks: usize) -> Vec<NaiveDate> {
    let current = week_start_for(today);
    (0..weeks)
        .rev()
        .map(|i| current - Duration::days(7 * i as i64))
        .collect()
}
