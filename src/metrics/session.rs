use crate::config::TrainingConfig;
use crate::error::SessionError;
use crate::types::session::{Session, SessionType};
use crate::types::summary::SessionMetrics;

/// Simulated vertical gain in feet: horizontal distance x incline.
///
/// Only incline sessions climb; every other type returns exactly 0. An
/// incline session without a treadmill reading covers no distance.
pub fn vertical_gain_ft(session: &Session) -> Result<f64, SessionError> {
    session.check_measurements()?;

    if session.session_type != SessionType::Incline {
        return Ok(0.0);
    }

    let distance_ft = session
        .treadmill
        .map(|t| t.horizontal_distance_ft(session.duration_min))
        .unwrap_or(0.0);

    Ok(distance_ft * (session.incline_pct / 100.0))
}

/// `duration x effort x (1 + pack / load_reference_lb)`.
pub fn training_stress(session: &Session, config: &TrainingConfig) -> Result<f64, SessionError> {
    session.check_measurements()?;

    let load_factor = 1.0 + session.pack_weight_lb / config.load_reference_lb.max(f64::EPSILON);
    Ok(session.duration_min * session.perceived_effort as f64 * load_factor)
}

/// Vertical gain weighted by pack load.
pub fn load_score(session: &Session, config: &TrainingConfig) -> Result<f64, SessionError> {
    let vertical = vertical_gain_ft(session)?;
    let load_factor =
        1.0 + session.pack_weight_lb / config.load_score_reference_lb.max(f64::EPSILON);
    Ok(vertical * load_factor)
}

impl SessionMetrics {
    pub fn compute(session: &Session, config: &TrainingConfig) -> Result<Self, SessionError> {
        Ok(Self {
            vertical_gain_ft: vertical_gain_ft(session)?,
            training_stress: training_stress(session, config)?,
            load_score: load_score(session, config)?,
        })
    }
}
