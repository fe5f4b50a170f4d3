use crate::model::price_point::PricePoint;

/// One raw history sample as the provider reports it: the close quote for
/// one base-fiat unit, in asset terms, at `time_secs` (epoch seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub time_secs: i64,
    pub close: f64,
}

impl RawSample {
    pub fn new(time_secs: i64, close: f64) -> Self {
        Self { time_secs, close }
    }
}

/// A coin's merged price history, sorted ascending by timestamp.
///
/// Timestamps carry millisecond precision. Duplicates are allowed: when a
/// coarse and a fine resolution report the same instant both samples are
/// kept, coarser first.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a series from already-inverted points, sorting them by time.
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.time_ms);
        Self { points }
    }

    /// Merge per-resolution history batches into one series.
    ///
    /// The provider quotes each sample as asset units per base-fiat unit, so
    /// closes are inverted (`1 / close`) to express the asset's price in
    /// fiat, and second timestamps are scaled to milliseconds. Samples with
    /// a missing, zero, negative or non-finite close are dropped. Batches
    /// are concatenated coarsest first and the sort is stable, so on
    /// timestamp collisions the day sample precedes the hour sample, which
    /// precedes the minute sample.
    pub fn merge(day: &[RawSample], hour: &[RawSample], minute: &[RawSample]) -> Self {
        let mut points = Vec::with_capacity(day.len() + hour.len() + minute.len());
        for batch in [day, hour, minute] {
            for sample in batch {
                if sample.close <= 0.0 || !sample.close.is_finite() {
                    continue;
                }
                points.push(PricePoint::new(sample.time_secs * 1_000, 1.0 / sample.close));
            }
        }
        points.sort_by_key(|p| p.time_ms);
        Self { points }
    }

    /// Insert a live point, keeping the series sorted. Points at an already
    /// present timestamp land after the existing ones.
    pub fn push_live(&mut self, point: PricePoint) {
        let idx = self.points.partition_point(|p| p.time_ms <= point.time_ms);
        self.points.insert(idx, point);
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// All points with `from_ms <= time_ms <= to_ms`.
    pub fn range(&self, from_ms: i64, to_ms: i64) -> &[PricePoint] {
        let start = self.points.partition_point(|p| p.time_ms < from_ms);
        let end = self.points.partition_point(|p| p.time_ms <= to_ms);
        if start >= end {
            return &[];
        }
        &self.points[start..end]
    }
}
