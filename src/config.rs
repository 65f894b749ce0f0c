use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::phase::{Phase, PhaseCalendar};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_body_size: usize,
    /// Overrides the calendar when set.
    pub active_phase: Option<Phase>,
    pub calendar: PhaseCalendar,
    pub series_weeks: usize,
    pub readiness_weeks: usize,
    pub training: TrainingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            max_body_size: 64 * 1024,
            active_phase: None,
            calendar: PhaseCalendar::default(),
            series_weeks: 12,
            readiness_weeks: 4,
            training: TrainingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, falling back to the default for any
    /// key that is missing or unparseable. Coefficients must also be finite
    /// and positive.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let training = TrainingConfig::default();

        let max_body_size_kb: usize = parse_or(&lookup, "MAX_BODY_SIZE_KB", 64);

        let active_phase = lookup("ACTIVE_PHASE").and_then(|s| Phase::from_str(&s));

        let calendar = PhaseCalendar {
            build_start_month: parse_or(
                &lookup,
                "PHASE_BUILD_MONTH",
                defaults.calendar.build_start_month,
            ),
            peak_start_month: parse_or(
                &lookup,
                "PHASE_PEAK_MONTH",
                defaults.calendar.peak_start_month,
            ),
            taper_start_month: parse_or(
                &lookup,
                "PHASE_TAPER_MONTH",
                defaults.calendar.taper_start_month,
            ),
        };

        let flags = FlagThresholds {
            overuse_multiplier: positive_or(
                &lookup,
                "OVERUSE_MULTIPLIER",
                training.flags.overuse_multiplier,
            ),
            trailing_weeks: parse_or(&lookup, "TRAILING_WEEKS", training.flags.trailing_weeks)
                .max(1),
            undertraining_fraction: positive_or(
                &lookup,
                "UNDERTRAINING_FRACTION",
                training.flags.undertraining_fraction,
            ),
        };

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            max_body_size: max_body_size_kb * 1024,
            active_phase,
            calendar,
            series_weeks: parse_or(&lookup, "SERIES_WEEKS", defaults.series_weeks).max(1),
            readiness_weeks: parse_or(&lookup, "READINESS_WEEKS", defaults.readiness_weeks)
                .max(1),
            training: TrainingConfig {
                load_reference_lb: positive_or(
                    &lookup,
                    "LOAD_REFERENCE_LB",
                    training.load_reference_lb,
                ),
                load_score_reference_lb: positive_or(
                    &lookup,
                    "LOAD_SCORE_REFERENCE_LB",
                    training.load_score_reference_lb,
                ),
                flags,
                ..training
            },
        }
    }
}

fn parse_or<T: FromStr>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn positive_or(lookup: impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    let value: f64 = parse_or(lookup, key, default);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}

/// Coefficients and thresholds for the metrics calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Pack weight at which training stress doubles.
    pub load_reference_lb: f64,
    /// Pack weight at which the vertical-weighted load score doubles.
    pub load_score_reference_lb: f64,
    pub flags: FlagThresholds,
    pub readiness: ReadinessWeights,
    pub alerts: AlertThresholds,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            load_reference_lb: 40.0,
            load_score_reference_lb: 50.0,
            flags: FlagThresholds::default(),
            readiness: ReadinessWeights::default(),
            alerts: AlertThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlagThresholds {
    /// Stress above this multiple of the trailing average is overuse.
    pub overuse_multiplier: f64,
    pub trailing_weeks: usize,
    /// Two consecutive weeks below this fraction of target vertical is undertraining.
    pub undertraining_fraction: f64,
}

impl Default for FlagThresholds {
    fn default() -> Self {
        Self {
            overuse_multiplier: 1.5,
            trailing_weeks: 4,
            undertraining_fraction: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadinessWeights {
    pub consistency: f64,
    pub trend: f64,
    pub coverage: f64,
    /// A week counts as consistent at this fraction of target vertical.
    pub consistency_fraction: f64,
    pub overuse_penalty: f64,
    pub undertraining_penalty: f64,
}

impl Default for ReadinessWeights {
    fn default() -> Self {
        Self {
            consistency: 0.4,
            trend: 0.2,
            coverage: 0.4,
            consistency_fraction: 0.8,
            overuse_penalty: 15.0,
            undertraining_penalty: 10.0,
        }
    }
}

/// Week-over-week warnings for the current week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub vertical_increase_fraction: f64,
    pub pack_increase_lb: f64,
    pub high_effort_avg: f64,
    pub effort_window_days: i64,
    /// Fraction of the phase's minimum vertical band.
    pub undertraining_fraction: f64,
    pub injury_window_days: i64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            vertical_increase_fraction: 0.25,
            pack_increase_lb: 5.0,
            high_effort_avg: 7.0,
            effort_window_days: 7,
            undertraining_fraction: 0.7,
            injury_window_days: 14,
        }
    }
}

pub const INJURY_KEYWORDS: [&str; 6] = ["pain", "knee", "foot", "shin", "achilles", "hip"];
