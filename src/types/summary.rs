use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub vertical_gain_ft: f64,
    pub training_stress: f64,
    pub load_score: f64,
}

/// Totals for one Monday-start week. Never stored; rebuilt from sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub session_count: usize,
    pub total_vertical_gain_ft: f64,
    pub total_duration_min: f64,
    /// Mean over all sessions in the week, unloaded ones included.
    pub avg_pack_weight_lb: f64,
    pub longest_session_min: f64,
    pub training_stress: f64,
    pub total_load_score: f64,
}

impl WeeklySummary {
    pub fn empty(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            session_count: 0,
            total_vertical_gain_ft: 0.0,
            total_duration_min: 0.0,
            avg_pack_weight_lb: 0.0,
            longest_session_min: 0.0,
            training_stress: 0.0,
            total_load_score: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.session_count == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub actual: f64,
    pub target: f64,
    /// `None` when the target is zero.
    pub percent_of_target: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetComparison {
    pub vertical_gain_ft: MetricComparison,
    pub duration_min: MetricComparison,
    pub pack_weight_lb: MetricComparison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekFlags {
    pub week_start: NaiveDate,
    pub overuse: bool,
    pub undertraining: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAlertKind {
    OveruseVertical,
    OverusePack,
    OveruseEffort,
    Undertraining,
    InjurySignal,
}

impl RiskAlertKind {
    /// 1 is the most urgent.
    pub fn priority(&self) -> u8 {
        match self {
            RiskAlertKind::InjurySignal => 1,
            RiskAlertKind::OveruseVertical => 2,
            RiskAlertKind::OverusePack => 2,
            RiskAlertKind::OveruseEffort => 3,
            RiskAlertKind::Undertraining => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    pub kind: RiskAlertKind,
    pub priority: u8,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    pub score: u8,
    pub consistency: f64,
    pub trend: f64,
    pub coverage: f64,
    pub penalty: f64,
}

impl ReadinessScore {
    pub fn zero() -> Self {
        Self {
            score: 0,
            consistency: 0.0,
            trend: 0.0,
            coverage: 0.0,
            penalty: 0.0,
        }
    }
}

/// Parallel arrays for the three-axis trend chart, oldest week first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub weeks: Vec<String>,
    pub vertical_gain_ft: Vec<f64>,
    pub avg_pack_weight_lb: Vec<f64>,
    pub training_stress: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}
