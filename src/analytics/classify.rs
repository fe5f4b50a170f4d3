use super::horizon::MS_IN_A_DAY;
use super::metrics::{MetricField, RangeMetrics};
use super::runs::Run;

/// Thresholds for the interesting-now screen.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierParams {
    pub recent_run_max_age_ms: i64,
    pub min_day_gain_percent: i64,
    pub max_hour_loss_percent: i64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            recent_run_max_age_ms: MS_IN_A_DAY,
            min_day_gain_percent: 10,
            max_hour_loss_percent: -5,
        }
    }
}

/// Decide whether a coin is worth watching right now.
///
/// A coin with no detected runs always qualifies. Otherwise its latest run
/// must have ended within the recency window of `now_ms`, the day range must
/// be up strictly more than the gain floor, and the hour range must sit
/// strictly above the loss floor. All comparisons are strict, so values
/// exactly at a threshold do not qualify.
pub fn is_interesting(
    runs: &[Run],
    hour: &RangeMetrics,
    day: &RangeMetrics,
    now_ms: i64,
    params: &ClassifierParams,
) -> bool {
    let Some(last_run) = runs.last() else {
        return true;
    };

    (now_ms - last_run.to.time_ms).abs() < params.recent_run_max_age_ms
        && day.delta(MetricField::Close, MetricField::Open) > params.min_day_gain_percent
        && hour.delta(MetricField::Close, MetricField::Open) > params.max_hour_loss_percent
}
