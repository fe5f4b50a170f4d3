/// One sampled (or interpolated) point of a coin's price series: the price
/// of one asset unit in base-fiat terms at `time_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub time_ms: i64,
    pub value: f64,
}

impl PricePoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}
