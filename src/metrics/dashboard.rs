use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::error::SessionError;
use crate::metrics::{flags, readiness, series, targets, weekly};
use crate::types::phase::{Phase, PhaseProfile, PhaseTarget};
use crate::types::session::Session;
use crate::types::summary::{
    ChartSeries, ReadinessScore, RiskAlert, TargetComparison, WeekFlags, WeeklySummary,
};

#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub today: NaiveDate,
    pub phase: Phase,
    pub series_weeks: usize,
    pub readiness_weeks: usize,
}

/// Everything the dashboard view renders, computed in one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub phase: Phase,
    pub profile: PhaseProfile,
    pub target: PhaseTarget,
    pub this_week: WeeklySummary,
    pub comparison: TargetComparison,
    pub weekly_progress_pct: u8,
    pub alerts: Vec<RiskAlert>,
    pub readiness: ReadinessScore,
    pub week_flags: Vec<WeekFlags>,
    pub series: ChartSeries,
}

impl Dashboard {
    pub fn build(
        sessions: &[Session],
        options: DashboardOptions,
        config: &TrainingConfig,
    ) -> Result<Self, SessionError> {
        let profile = options.phase.profile();
        let target = profile.target();

        let series_weeks = options.series_weeks.max(options.readiness_weeks).max(1);
        let summaries = weekly::recent_weeks(sessions, options.today, series_weeks, config)?;
        let this_week = summaries
            .last()
            .copied()
            .unwrap_or_else(|| WeeklySummary::empty(weekly::week_start_for(options.today)));

        // One flag pass over the full history, shared by readiness and the chart.
        let week_flags = flags::flag_weeks(&summaries, &target, &config.flags);

        let readiness_from = summaries.len().saturating_sub(options.readiness_weeks);
        let readiness = readiness::readiness_with_flags(
            &summaries[readiness_from..],
            week_flags.last(),
            &target,
            config,
        );

        let chart_from = summaries.len().saturating_sub(options.series_weeks.max(1));
        let charted = &summaries[chart_from..];

        Ok(Self {
            today: options.today,
            week_start: this_week.week_start,
            week_end: this_week.week_start + Duration::days(6),
            phase: options.phase,
            profile,
            target,
            comparison: targets::compare_to_target(&this_week, &target),
            weekly_progress_pct: targets::weekly_progress_pct(&this_week, &target),
            alerts: flags::risk_alerts(sessions, options.today, &profile, config)?,
            readiness,
            week_flags: week_flags[chart_from..].to_vec(),
            series: series::weekly_series(charted),
            this_week,
        })
    }
}
