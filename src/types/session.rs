use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;

pub const FEET_PER_MILE: f64 = 5280.0;
pub const MIN_EFFORT: u8 = 1;
pub const MAX_EFFORT: u8 = 10;

/// Entry-time ceilings. Inputs under these keep every derived metric finite.
pub const MAX_DURATION_MIN: f64 = 24.0 * 60.0;
pub const MAX_INCLINE_PCT: f64 = 100.0;
pub const MAX_PACK_WEIGHT_LB: f64 = 200.0;
pub const MAX_SPEED_MPH: f64 = 30.0;
pub const MAX_DISTANCE_MI: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Incline,
    Flat,
    Strength,
    Recovery,
}

impl SessionType {
    pub fn parse(s: &str) -> Result<Self, SessionError> {
        match s.trim().to_lowercase().as_str() {
            "incline" => Ok(SessionType::Incline),
            "flat" => Ok(SessionType::Flat),
            "strength" => Ok(SessionType::Strength),
            "recovery" => Ok(SessionType::Recovery),
            other => Err(SessionError::UnknownType(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Incline => "incline",
            SessionType::Flat => "flat",
            SessionType::Strength => "strength",
            SessionType::Recovery => "recovery",
        }
    }
}

/// Treadmill input: either the belt speed held for the whole session or the
/// distance read off the console at the end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Treadmill {
    SpeedMph(f64),
    DistanceMi(f64),
}

impl Treadmill {
    /// Horizontal distance covered in feet for a session of `duration_min`.
    pub fn horizontal_distance_ft(&self, duration_min: f64) -> f64 {
        match *self {
            Treadmill::SpeedMph(mph) => mph * (duration_min / 60.0) * FEET_PER_MILE,
            Treadmill::DistanceMi(miles) => miles * FEET_PER_MILE,
        }
    }

    fn max(&self) -> f64 {
        match self {
            Treadmill::SpeedMph(_) => MAX_SPEED_MPH,
            Treadmill::DistanceMi(_) => MAX_DISTANCE_MI,
        }
    }

    fn value(&self) -> (&'static str, f64) {
        match *self {
            Treadmill::SpeedMph(mph) => ("speed_mph", mph),
            Treadmill::DistanceMi(miles) => ("distance_mi", miles),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub duration_min: f64,
    #[serde(default)]
    pub incline_pct: f64,
    #[serde(default)]
    pub treadmill: Option<Treadmill>,
    #[serde(default)]
    pub pack_weight_lb: f64,
    pub perceived_effort: u8,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Session {
    pub fn new(date: NaiveDate, session_type: SessionType, duration_min: f64) -> Self {
        Self {
            date,
            session_type,
            duration_min,
            incline_pct: 0.0,
            treadmill: None,
            pack_weight_lb: 0.0,
            perceived_effort: 5,
            notes: None,
        }
    }

    pub fn with_incline(mut self, incline_pct: f64, treadmill: Treadmill) -> Self {
        self.incline_pct = incline_pct;
        self.treadmill = Some(treadmill);
        self
    }

    pub fn with_pack(mut self, pack_weight_lb: f64) -> Self {
        self.pack_weight_lb = pack_weight_lb;
        self
    }

    pub fn with_effort(mut self, perceived_effort: u8) -> Self {
        self.perceived_effort = perceived_effort;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Entry-time validation: everything `check_measurements` covers plus a
    /// strictly positive duration and the `MAX_*` ceilings.
    pub fn validate(&self) -> Result<(), SessionError> {
        self.check_measurements()?;
        if self.duration_min <= 0.0 {
            return Err(SessionError::NonPositiveDuration(self.duration_min));
        }

        let mut limits = vec![
            ("duration_min", self.duration_min, MAX_DURATION_MIN),
            ("incline_pct", self.incline_pct, MAX_INCLINE_PCT),
            ("pack_weight_lb", self.pack_weight_lb, MAX_PACK_WEIGHT_LB),
        ];
        if let Some(treadmill) = self.treadmill {
            let (field, value) = treadmill.value();
            limits.push((field, value, treadmill.max()));
        }

        for (field, value, max) in limits {
            if value > max {
                return Err(SessionError::TooLarge { field, value, max });
            }
        }
        Ok(())
    }

    /// Checks the numeric fields the calculator depends on. A zero duration
    /// passes; negatives, NaN and infinities do not.
    pub fn check_measurements(&self) -> Result<(), SessionError> {
        let mut fields = vec![
            ("duration_min", self.duration_min),
            ("incline_pct", self.incline_pct),
            ("pack_weight_lb", self.pack_weight_lb),
        ];
        if let Some(treadmill) = self.treadmill {
            fields.push(treadmill.value());
        }

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SessionError::NonFinite(field));
            }
            if value < 0.0 {
                return Err(SessionError::Negative { field, value });
            }
        }

        self.check_effort()
    }

    pub fn check_effort(&self) -> Result<(), SessionError> {
        if !(MIN_EFFORT..=MAX_EFFORT).contains(&self.perceived_effort) {
            return Err(SessionError::EffortOutOfRange(self.perceived_effort as i64));
        }
        Ok(())
    }
}

/// A session as held by the store.
#[derive(Debug, Clone, Serialize)]
pub struct StoredSession {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    #[serde(flatten)]
    pub session: Session,
}
