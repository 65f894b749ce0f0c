use crate::config::TrainingConfig;
use crate::metrics::flags::flag_weeks;
use crate::types::phase::PhaseTarget;
use crate::types::summary::{ReadinessScore, WeekFlags, WeeklySummary};

/// 0-100 blend of consistency, trend and target coverage over the supplied
/// weeks (oldest first), minus penalties when the latest week is flagged.
///
/// The latest week's flags are judged against `summaries` alone. Callers
/// holding a longer history should flag that history and use
/// [`readiness_with_flags`].
pub fn readiness_score(
    summaries: &[WeeklySummary],
    target: &PhaseTarget,
    config: &TrainingConfig,
) -> ReadinessScore {
    let flags = flag_weeks(summaries, target, &config.flags);
    readiness_with_flags(summaries, flags.last(), target, config)
}

/// Same blend as [`readiness_score`], with the penalty taken from
/// `latest_flags` instead of re-flagging `summaries`.
pub fn readiness_with_flags(
    summaries: &[WeeklySummary],
    latest_flags: Option<&WeekFlags>,
    target: &PhaseTarget,
    config: &TrainingConfig,
) -> ReadinessScore {
    if summaries.is_empty() {
        return ReadinessScore::zero();
    }

    let weights = &config.readiness;
    let consistency = consistency(summaries, target, weights.consistency_fraction);
    let trend = trend(summaries);
    let coverage = coverage(summaries, target);

    let weight_total = weights.consistency + weights.trend + weights.coverage;
    let blended = if weight_total > 0.0 {
        (weights.consistency * consistency + weights.trend * trend + weights.coverage * coverage)
            / weight_total
    } else {
        0.0
    };

    let mut penalty = 0.0;
    if let Some(latest) = latest_flags {
        if latest.overuse {
            penalty += weights.overuse_penalty;
        }
        if latest.undertraining {
            penalty += weights.undertraining_penalty;
        }
    }

    let score = (blended * 100.0 - penalty).clamp(0.0, 100.0).round() as u8;

    ReadinessScore {
        score,
        consistency,
        trend,
        coverage,
        penalty,
    }
}

/// Fraction of weeks at or above `fraction` of the vertical target.
fn consistency(summaries: &[WeeklySummary], target: &PhaseTarget, fraction: f64) -> f64 {
    let threshold = fraction * target.vertical_gain_ft;
    let met = summaries
        .iter()
        .filter(|w| w.total_vertical_gain_ft >= threshold)
        .count();
    met as f64 / summaries.len() as f64
}

/// Fraction of week-to-week steps in which vertical gain went up.
fn trend(summaries: &[WeeklySummary]) -> f64 {
    if summaries.len() < 2 {
        return 0.0;
    }
    let rising = summaries
        .windows(2)
        .filter(|pair| pair[1].total_vertical_gain_ft > pair[0].total_vertical_gain_ft)
        .count();
    rising as f64 / (summaries.len() - 1) as f64
}

fn coverage(summaries: &[WeeklySummary], target: &PhaseTarget) -> f64 {
    let weeks = summaries.len() as f64;
    let avg_vertical = summaries.iter().map(|w| w.total_vertical_gain_ft).sum::<f64>() / weeks;
    let avg_pack = summaries.iter().map(|w| w.avg_pack_weight_lb).sum::<f64>() / weeks;
    let longest = summaries
        .iter()
        .map(|w| w.longest_session_min)
        .fold(0.0, f64::max);

    (capped_ratio(avg_vertical, target.vertical_gain_ft)
        + capped_ratio(avg_pack, target.pack_weight_lb)
        + capped_ratio(longest, target.duration_min))
        / 3.0
}

fn capped_ratio(actual: f64, target: f64) -> f64 {
    if target <= 0.0 {
        1.0
    } else {
        (actual / target).clamp(0.0, 1.0)
    }
}
