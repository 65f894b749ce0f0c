use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Base,
    Build,
    Peak,
    Taper,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Base, Phase::Build, Phase::Peak, Phase::Taper];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "base" => Some(Phase::Base),
            "build" => Some(Phase::Build),
            "peak" => Some(Phase::Peak),
            "taper" => Some(Phase::Taper),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Base => "base",
            Phase::Build => "build",
            Phase::Peak => "peak",
            Phase::Taper => "taper",
        }
    }

    pub fn profile(&self) -> PhaseProfile {
        let (vertical, long_session, pack) = match self {
            Phase::Base => ((1500.0, 2000.0), (45.0, 60.0), (0.0, 5.0)),
            Phase::Build => ((3000.0, 4500.0), (60.0, 75.0), (10.0, 20.0)),
            Phase::Peak => ((6000.0, 9000.0), (75.0, 90.0), (20.0, 35.0)),
            Phase::Taper => ((2000.0, 3000.0), (45.0, 60.0), (0.0, 15.0)),
        };

        PhaseProfile {
            phase: *self,
            vertical_gain_ft: TargetBand::new(vertical.0, vertical.1),
            long_session_min: TargetBand::new(long_session.0, long_session.1),
            pack_weight_lb: TargetBand::new(pack.0, pack.1),
        }
    }

    pub fn target(&self) -> PhaseTarget {
        self.profile().target()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBand {
    pub min: f64,
    pub max: f64,
}

impl TargetBand {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Weekly ranges for a phase, as shown on the phase calendar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseProfile {
    pub phase: Phase,
    pub vertical_gain_ft: TargetBand,
    pub long_session_min: TargetBand,
    pub pack_weight_lb: TargetBand,
}

impl PhaseProfile {
    pub fn target(&self) -> PhaseTarget {
        PhaseTarget {
            phase: self.phase,
            vertical_gain_ft: self.vertical_gain_ft.midpoint(),
            duration_min: self.long_session_min.midpoint(),
            pack_weight_lb: self.pack_weight_lb.midpoint(),
        }
    }
}

/// Scalar weekly targets the calculator compares against.
///
/// `duration_min` is the longest single session of the week, not the weekly
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTarget {
    pub phase: Phase,
    pub vertical_gain_ft: f64,
    pub duration_min: f64,
    pub pack_weight_lb: f64,
}

/// Month boundaries that pick the phase for a date when none is chosen
/// explicitly. Months are 1-based and apply to the date's own year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCalendar {
    pub build_start_month: u32,
    pub peak_start_month: u32,
    pub taper_start_month: u32,
}

impl Default for PhaseCalendar {
    fn default() -> Self {
        Self {
            build_start_month: 4,
            peak_start_month: 6,
            taper_start_month: 8,
        }
    }
}

impl PhaseCalendar {
    pub fn phase_for(&self, date: NaiveDate) -> Phase {
        let month = date.month();
        if month < self.build_start_month {
            Phase::Base
        } else if month < self.peak_start_month {
            Phase::Build
        } else if month < self.taper_start_month {
            Phase::Peak
        } else {
            Phase::Taper
        }
    }
}
