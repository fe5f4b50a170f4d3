use crate::error::AppError;
use crate::model::series::PriceSeries;

use super::metrics::RangeMetrics;

pub const MS_IN_A_MINUTE: i64 = 60 * 1_000;
pub const MS_IN_AN_HOUR: i64 = 60 * MS_IN_A_MINUTE;
pub const MS_IN_A_DAY: i64 = 24 * MS_IN_AN_HOUR;
pub const MS_IN_A_WEEK: i64 = 7 * MS_IN_A_DAY;
pub const MS_IN_A_MONTH: i64 = 30 * MS_IN_A_DAY;
pub const MS_IN_A_YEAR: i64 = 365 * MS_IN_A_DAY;

/// Lookback horizons recomputed on every poll. `All` covers the whole series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl Horizon {
    pub const ALL: [Horizon; 6] = [
        Horizon::Hour,
        Horizon::Day,
        Horizon::Week,
        Horizon::Month,
        Horizon::Year,
        Horizon::All,
    ];

    /// Span of the horizon in milliseconds; `None` means unbounded.
    pub fn span_ms(&self) -> Option<i64> {
        match self {
            Horizon::Hour => Some(MS_IN_AN_HOUR),
            Horizon::Day => Some(MS_IN_A_DAY),
            Horizon::Week => Some(MS_IN_A_WEEK),
            Horizon::Month => Some(MS_IN_A_MONTH),
            Horizon::Year => Some(MS_IN_A_YEAR),
            Horizon::All => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Horizon::Hour => "hour",
            Horizon::Day => "day",
            Horizon::Week => "week",
            Horizon::Month => "month",
            Horizon::Year => "year",
            Horizon::All => "all",
        }
    }
}

/// Range metrics for every horizon ending at the same instant.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonMetrics {
    pub hour: RangeMetrics,
    pub day: RangeMetrics,
    pub week: RangeMetrics,
    pub month: RangeMetrics,
    pub year: RangeMetrics,
    pub all: RangeMetrics,
}

impl HorizonMetrics {
    /// Compute metrics for every horizon ending at `now_ms`.
    ///
    /// Any horizon window without a sample is an error. The watcher appends
    /// the freshly polled point before calling this, which places at least
    /// that point in every window.
    pub fn compute(series: &PriceSeries, now_ms: i64) -> Result<Self, AppError> {
        let over = |horizon: Horizon| -> Result<RangeMetrics, AppError> {
            let slice = match horizon.span_ms() {
                Some(span) => series.range(now_ms - span, now_ms),
                None => series.points(),
            };
            RangeMetrics::compute(slice)
        };

        Ok(Self {
            hour: over(Horizon::Hour)?,
            day: over(Horizon::Day)?,
            week: over(Horizon::Week)?,
            month: over(Horizon::Month)?,
            year: over(Horizon::Year)?,
            all: over(Horizon::All)?,
        })
    }

    pub fn get(&self, horizon: Horizon) -> &RangeMetrics {
        match horizon {
            Horizon::Hour => &self.hour,
            Horizon::Day => &self.day,
            Horizon::Week => &self.week,
            Horizon::Month => &self.month,
            Horizon::Year => &self.year,
            Horizon::All => &self.all,
        }
    }
}
