use crate::types::phase::PhaseTarget;
use crate::types::summary::{MetricComparison, TargetComparison, WeeklySummary};

pub fn compare_metric(actual: f64, target: f64) -> MetricComparison {
    let percent_of_target = if target == 0.0 {
        None
    } else {
        Some(actual / target * 100.0)
    };

    MetricComparison {
        actual,
        target,
        percent_of_target,
    }
}

pub fn compare_to_target(summary: &WeeklySummary, target: &PhaseTarget) -> TargetComparison {
    TargetComparison {
        vertical_gain_ft: compare_metric(summary.total_vertical_gain_ft, target.vertical_gain_ft),
        duration_min: compare_metric(summary.longest_session_min, target.duration_min),
        pack_weight_lb: compare_metric(summary.avg_pack_weight_lb, target.pack_weight_lb),
    }
}

/// Vertical progress for the progress bar, clamped to 0-100.
pub fn weekly_progress_pct(summary: &WeeklySummary, target: &PhaseTarget) -> u8 {
    compare_metric(summary.total_vertical_gain_ft, target.vertical_gain_ft)
        .percent_of_target
        .map(|pct| pct.clamp(0.0, 100.0).floor() as u8)
        .unwrap_or(0)
}
