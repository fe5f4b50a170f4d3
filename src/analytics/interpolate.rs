use crate::error::AppError;
use crate::model::price_point::PricePoint;

/// Linearly interpolated series value at `time_ms`.
///
/// `points` must be sorted ascending by time. Times at or outside the series
/// ends clamp to the first or last value, so for a non-empty series every
/// path yields a real value; an empty series is an error.
pub fn value_at_time(points: &[PricePoint], time_ms: i64) -> Result<f64, AppError> {
    let first = points
        .first()
        .ok_or(AppError::EmptySeries("interpolation needs at least one point"))?;
    let last = points[points.len() - 1];

    if time_ms <= first.time_ms {
        return Ok(first.value);
    }
    if time_ms >= last.time_ms {
        return Ok(last.value);
    }

    // First index with time >= time_ms. The clamps above guarantee it exists
    // and is preceded by a strictly earlier point, so the segment below has
    // nonzero width even when the series holds duplicate timestamps.
    let idx = points.partition_point(|p| p.time_ms < time_ms);
    let to = points[idx];
    if to.time_ms == time_ms {
        return Ok(to.value);
    }
    let from = points[idx - 1];

    let span = (to.time_ms - from.time_ms) as f64;
    let elapsed = (time_ms - from.time_ms) as f64;
    Ok(from.value + elapsed / span * (to.value - from.value))
}
