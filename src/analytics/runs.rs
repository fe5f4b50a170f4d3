use crate::error::AppError;
use crate::model::price_point::PricePoint;
use crate::model::series::PriceSeries;

use super::interpolate::value_at_time;
use super::metrics::{percent_change, RangeMetrics};

/// One detected sustained-gain episode. `from` is the lowest point of the
/// collapsed window and `to` the highest, so `from.time_ms` may exceed
/// `to.time_ms` when the peak precedes the trough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Run {
    pub from: PricePoint,
    pub to: PricePoint,
}

/// Tunables for run detection.
#[derive(Debug, Clone, Copy)]
pub struct RunParams {
    pub threshold_percent: i64,
    pub step_ms: i64,
    pub window_ms: i64,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            threshold_percent: 15,
            step_ms: 86_400_000,
            window_ms: 7 * 86_400_000,
        }
    }
}

/// A window whose percent change cleared the threshold, before collapsing.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GainWindow {
    from_ms: i64,
    to_ms: i64,
}

/// Scan the series for sustained gains: sample a sliding window once per
/// step from the first point up to `now_ms`, keep windows whose interpolated
/// percent change strictly exceeds the threshold, collapse overlaps, and
/// summarize each surviving window by its range extremes.
///
/// A series with fewer than two points yields no runs.
pub fn detect_runs(
    series: &PriceSeries,
    now_ms: i64,
    params: &RunParams,
) -> Result<Vec<Run>, AppError> {
    assert!(
        params.step_ms > 0 && params.window_ms > 0,
        "run step and window must be positive"
    );

    let points = series.points();
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let mut windows = Vec::new();
    let mut time = points[0].time_ms;
    while time < now_ms {
        let from_value = value_at_time(points, time)?;
        let to_value = value_at_time(points, time + params.window_ms)?;
        if percent_change(to_value, from_value) > params.threshold_percent {
            windows.push(GainWindow {
                from_ms: time,
                to_ms: time + params.window_ms,
            });
        }
        time += params.step_ms;
    }

    collapse(&mut windows);

    let mut runs = Vec::with_capacity(windows.len());
    for window in &windows {
        let metrics = RangeMetrics::compute(series.range(window.from_ms, window.to_ms))?;
        runs.push(Run {
            from: metrics.low,
            to: metrics.high,
        });
    }
    Ok(runs)
}

/// Merge overlapping and touching windows in place. Windows arrive in time
/// order; the backward scan lets each merge extend the earlier window and
/// drop the later one without shifting unvisited indices.
fn collapse(windows: &mut Vec<GainWindow>) {
    for i in (0..windows.len().saturating_sub(1)).rev() {
        if windows[i].to_ms >= windows[i + 1].from_ms {
            windows[i].to_ms = windows[i + 1].to_ms;
            windows.remove(i + 1);
        }
    }
}
