use crate::types::summary::{ChartSeries, WeeklySummary};

pub fn weekly_series(summaries: &[WeeklySummary]) -> ChartSeries {
    ChartSeries {
        weeks: summaries
            .iter()
            .map(|w| w.week_start.format("%b %d").to_string())
            .collect(),
        vertical_gain_ft: summaries
            .iter()
            .map(|w| w.total_vertical_gain_ft.round())
            .collect(),
        avg_pack_weight_lb: summaries
            .iter()
            .map(|w| round_to_tenth(w.avg_pack_weight_lb))
            .collect(),
        training_stress: summaries
            .iter()
            .map(|w| round_to_tenth(w.training_stress))
            .collect(),
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
