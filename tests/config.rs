use std::collections::HashMap;

use hikeprep_rs::config::{Config, TrainingConfig};
use hikeprep_rs::types::phase::Phase;

fn config_from(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn missing_vars_use_defaults() {
    let config = config_from(&[]);
    assert_eq!(config.port, 3000);
    assert_eq!(config.active_phase, None);
    assert_eq!(config.training, TrainingConfig::default());
}

#[test]
fn valid_overrides_are_applied() {
    let config = config_from(&[
        ("PORT", "8080"),
        ("ACTIVE_PHASE", "Peak"),
        ("OVERUSE_MULTIPLIER", "2.0"),
        ("TRAILING_WEEKS", "6"),
        ("LOAD_REFERENCE_LB", "35"),
    ]);
    assert_eq!(config.port, 8080);
    assert_eq!(config.active_phase, Some(Phase::Peak));
    assert_eq!(config.training.flags.overuse_multiplier, 2.0);
    assert_eq!(config.training.flags.trailing_weeks, 6);
    assert_eq!(config.training.load_reference_lb, 35.0);
}

#[test]
fn coefficients_must_be_finite_and_positive() {
    let defaults = TrainingConfig::default();
    let config = config_from(&[
        ("LOAD_REFERENCE_LB", "-40"),
        ("LOAD_SCORE_REFERENCE_LB", "0"),
        ("OVERUSE_MULTIPLIER", "NaN"),
        ("UNDERTRAINING_FRACTION", "inf"),
    ]);
    assert_eq!(config.training.load_reference_lb, defaults.load_reference_lb);
    assert_eq!(
        config.training.load_score_reference_lb,
        defaults.load_score_reference_lb
    );
    assert_eq!(
        config.training.flags.overuse_multiplier,
        defaults.flags.overuse_multiplier
    );
    assert_eq!(
        config.training.flags.undertraining_fraction,
        defaults.flags.undertraining_fraction
    );
}

#[test]
fn week_counts_are_at_least_one() {
    let config = config_from(&[
        ("TRAILING_WEEKS", "0"),
        ("SERIES_WEEKS", "0"),
        ("READINESS_WEEKS", "0"),
    ]);
    assert_eq!(config.training.flags.trailing_weeks, 1);
    assert_eq!(config.series_weeks, 1);
    assert_eq!(config.readiness_weeks, 1);
}
