use chrono::{Duration, NaiveDate};

use crate::config::{FlagThresholds, TrainingConfig, INJURY_KEYWORDS};
use crate::error::SessionError;
use crate::metrics::weekly::{aggregate_week, week_start_for};
use crate::types::phase::{PhaseProfile, PhaseTarget};
use crate::types::session::Session;
use crate::types::summary::{RiskAlert, RiskAlertKind, WeekFlags, WeeklySummary};

/// Overuse and undertraining flags for each week of a chronological series.
///
/// Overuse: stress above `overuse_multiplier` times the mean stress of up to
/// `trailing_weeks` preceding weeks. The first week has no history and is
/// never flagged. Undertraining: this week and the one before both fall below
/// `undertraining_fraction` of the target vertical gain.
pub fn flag_weeks(
    summaries: &[WeeklySummary],
    target: &PhaseTarget,
    thresholds: &FlagThresholds,
) -> Vec<WeekFlags> {
    let undertraining_floor = thresholds.undertraining_fraction * target.vertical_gain_ft;

    summaries
        .iter()
        .enumerate()
        .map(|(idx, week)| {
            let window_start = idx.saturating_sub(thresholds.trailing_weeks.max(1));
            let trailing = &summaries[window_start..idx];

            let overuse = if trailing.is_empty() {
                false
            } else {
                let trailing_avg = trailing.iter().map(|w| w.training_stress).sum::<f64>()
                    / trailing.len() as f64;
                trailing_avg > 0.0
                    && week.training_stress > thresholds.overuse_multiplier * trailing_avg
            };

            let undertraining = target.vertical_gain_ft > 0.0
                && idx > 0
                && week.total_vertical_gain_ft < undertraining_floor
                && summaries[idx - 1].total_vertical_gain_ft < undertraining_floor;

            WeekFlags {
                week_start: week.week_start,
                overuse,
                undertraining,
            }
        })
        .collect()
}

/// Named warnings for the week containing `today`, most urgent first.
pub fn risk_alerts(
    sessions: &[Session],
    today: NaiveDate,
    profile: &PhaseProfile,
    config: &TrainingConfig,
) -> Result<Vec<RiskAlert>, SessionError> {
    let thresholds = &config.alerts;
    let this_start = week_start_for(today);
    let this_week = aggregate_week(sessions, this_start, config)?;
    let prev_week = aggregate_week(sessions, this_start - Duration::days(7), config)?;

    let mut alerts = Vec::new();

    if prev_week.total_vertical_gain_ft > 0.0
        && this_week.total_vertical_gain_ft
            > prev_week.total_vertical_gain_ft * (1.0 + thresholds.vertical_increase_fraction)
    {
        alerts.push(alert(
            RiskAlertKind::OveruseVertical,
            format!(
                "Vertical increased >{:.0}% week-over-week.",
                thresholds.vertical_increase_fraction * 100.0
            ),
        ));
    }

    if this_week.avg_pack_weight_lb - prev_week.avg_pack_weight_lb > thresholds.pack_increase_lb {
        alerts.push(alert(
            RiskAlertKind::OverusePack,
            format!(
                "Average pack increased >{} lb week-over-week.",
                thresholds.pack_increase_lb
            ),
        ));
    }

    let effort_since = today - Duration::days(thresholds.effort_window_days);
    let efforts: Vec<f64> = sessions
        .iter()
        .filter(|s| s.date >= effort_since && s.date <= today)
        .map(|s| s.perceived_effort as f64)
        .collect();
    if !efforts.is_empty() {
        let avg_effort = efforts.iter().sum::<f64>() / efforts.len() as f64;
        if avg_effort >= thresholds.high_effort_avg {
            alerts.push(alert(
                RiskAlertKind::OveruseEffort,
                format!(
                    "Average effort >= {} over the last {} days.",
                    thresholds.high_effort_avg, thresholds.effort_window_days
                ),
            ));
        }
    }

    let vertical_floor = profile.vertical_gain_ft.min;
    if vertical_floor > 0.0 {
        let this_ratio = this_week.total_vertical_gain_ft / vertical_floor;
        let prev_ratio = prev_week.total_vertical_gain_ft / vertical_floor;
        if this_ratio < thresholds.undertraining_fraction
            && prev_ratio < thresholds.undertraining_fraction
        {
            alerts.push(alert(
                RiskAlertKind::Undertraining,
                format!(
                    "Under {:.0}% of the weekly vertical target for 2 weeks.",
                    thresholds.undertraining_fraction * 100.0
                ),
            ));
        }
    }

    let injury_since = today - Duration::days(thresholds.injury_window_days);
    let injury_signal = sessions
        .iter()
        .filter(|s| s.date >= injury_since && s.date <= today)
        .filter_map(|s| s.notes.as_deref())
        .any(mentions_injury);
    if injury_signal {
        alerts.push(alert(
            RiskAlertKind::InjurySignal,
            format!(
                "Notes mention possible injury signals in the last {} days.",
                thresholds.injury_window_days
            ),
        ));
    }

    alerts.sort_by_key(|a| a.priority);
    Ok(alerts)
}

pub fn mentions_injury(notes: &str) -> bool {
    let lower = notes.to_lowercase();
    INJURY_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn alert(kind: RiskAlertKind, message: String) -> RiskAlert {
    RiskAlert {
        kind,
        priority: kind.priority(),
        message,
    }
}
