use std::collections::HashMap;

use crate::error::AppError;
use crate::model::price_point::PricePoint;

/// Integer percent change going from `from_value` to `to_value`, rounded to
/// the nearest whole percent.
pub fn percent_change(to_value: f64, from_value: f64) -> i64 {
    (to_value / from_value * 100.0 - 100.0).round() as i64
}

/// The four named points of a range summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    Open,
    Close,
    High,
    Low,
}

impl MetricField {
    pub const ALL: [MetricField; 4] = [
        MetricField::Open,
        MetricField::Close,
        MetricField::High,
        MetricField::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricField::Open => "open",
            MetricField::Close => "close",
            MetricField::High => "high",
            MetricField::Low => "low",
        }
    }
}

/// Summary of a time-ordered slice of a price series: chronological first and
/// last points, the extremes, and the pairwise percent-delta map.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeMetrics {
    pub open: PricePoint,
    pub close: PricePoint,
    pub high: PricePoint,
    pub low: PricePoint,
    deltas: HashMap<String, i64>,
}

impl RangeMetrics {
    /// Compute the summary of `points`, which must be sorted by time.
    ///
    /// Value ties go to the earliest point, so `high` and `low` carry the
    /// timestamp of the first extreme. A single point yields a summary where
    /// all four fields coincide and every delta is zero.
    pub fn compute(points: &[PricePoint]) -> Result<Self, AppError> {
        let first = *points
            .first()
            .ok_or(AppError::EmptySeries("range metrics need at least one point"))?;
        let last = points[points.len() - 1];

        let mut high = first;
        let mut low = first;
        for p in &points[1..] {
            if p.value > high.value {
                high = *p;
            }
            if p.value < low.value {
                low = *p;
            }
        }

        let value_of = |field: MetricField| match field {
            MetricField::Open => first.value,
            MetricField::Close => last.value,
            MetricField::High => high.value,
            MetricField::Low => low.value,
        };
        let mut deltas = HashMap::new();
        for to in MetricField::ALL {
            for from in MetricField::ALL {
                if to == from {
                    continue;
                }
                deltas.insert(
                    format!("{}_{}", to.as_str(), from.as_str()),
                    percent_change(value_of(to), value_of(from)),
                );
            }
        }

        Ok(Self {
            open: first,
            close: last,
            high,
            low,
            deltas,
        })
    }

    pub fn point(&self, field: MetricField) -> PricePoint {
        match field {
            MetricField::Open => self.open,
            MetricField::Close => self.close,
            MetricField::High => self.high,
            MetricField::Low => self.low,
        }
    }

    /// Percent change from `from`'s value to `to`'s value.
    pub fn delta(&self, to: MetricField, from: MetricField) -> i64 {
        percent_change(self.point(to).value, self.point(from).value)
    }

    /// All twelve ordered-pair deltas keyed as `"<to>_<from>"`.
    pub fn deltas(&self) -> &HashMap<String, i64> {
        &self.deltas
    }
}
