use chrono::TimeZone;

use crate::analytics::horizon::{Horizon, MS_IN_A_DAY};
use crate::analytics::metrics::{percent_change, MetricField, RangeMetrics};
use crate::analytics::runs::Run;
use crate::model::coin::{Coin, CoinTable};
use crate::model::price_point::PricePoint;

/// ANSI full-reset escape printed between console refreshes.
pub const CLEAR_SCREEN: &str = "\x1Bc";

const SEPARATOR: &str = "----------------------------------------------------------------";

/// Horizons rendered in a full coin report, coarsening downward.
const REPORT_HORIZONS: [Horizon; 5] = [
    Horizon::Day,
    Horizon::Week,
    Horizon::Month,
    Horizon::Year,
    Horizon::All,
];

const MAX_RUNS_SHOWN: usize = 2;

/// Format a price with precision scaled to its magnitude: whole units for
/// large values, more decimals as the value shrinks.
pub fn format_value(value: f64) -> String {
    let dp = (3.0 - value.log10().floor()).clamp(0.0, 12.0) as usize;
    format!("{:.*}", dp, value)
}

/// Signed integer percent with an explicit `+` on gains.
pub fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// Signed fractional percent with an explicit `+` on gains.
pub fn signed_f64(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Human timestamp: `NOW` within a five-second window of `now_ms`, a local
/// date-time otherwise.
pub fn format_time(time_ms: i64, now_ms: i64) -> String {
    if (now_ms - time_ms).abs() < 5_000 {
        return "NOW".to_string();
    }
    chrono::Utc
        .timestamp_millis_opt(time_ms)
        .single()
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%b %e, %Y, %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "--".to_string())
}

fn price_cell(point: &PricePoint, with_time: bool, now_ms: i64) -> String {
    if with_time {
        format!(
            "{} - {}",
            format_value(point.value),
            format_time(point.time_ms, now_ms)
        )
    } else {
        format_value(point.value)
    }
}

/// Full metric block for one horizon: header, the four named points, and the
/// deltas leading into the close plus the low-to-high swing.
fn metrics_block(label: &str, metrics: &RangeMetrics, now_ms: i64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} - {} to {}\n{}\n",
        label.to_uppercase(),
        format_time(metrics.open.time_ms, now_ms),
        format_time(metrics.close.time_ms, now_ms),
        SEPARATOR
    ));
    out.push_str(&format!(
        "{:<15}| {}\n",
        "open:",
        price_cell(&metrics.open, false, now_ms)
    ));
    out.push_str(&format!(
        "{:<15}| {}\n",
        "close:",
        price_cell(&metrics.close, false, now_ms)
    ));
    out.push_str(&format!(
        "{:<15}| {}\n",
        "high:",
        price_cell(&metrics.high, true, now_ms)
    ));
    out.push_str(&format!(
        "{:<15}| {}\n",
        "low:",
        price_cell(&metrics.low, true, now_ms)
    ));
    out.push_str(&format!(
        "{:<15}| {}%\n",
        "open -> close:",
        signed(metrics.delta(MetricField::Close, MetricField::Open))
    ));
    out.push_str(&format!(
        "{:<15}| {}%\n",
        "high -> close:",
        signed(metrics.delta(MetricField::Close, MetricField::High))
    ));
    out.push_str(&format!(
        "{:<15}| {}%\n",
        "low -> close:",
        signed(metrics.delta(MetricField::Close, MetricField::Low))
    ));
    out.push_str(&format!(
        "{:<15}| {}%\n",
        "low -> high:",
        signed(metrics.delta(MetricField::High, MetricField::Low))
    ));
    out
}

/// Compact block used by the ranked snapshot: header, named points, and the
/// open-to-close delta only.
fn metrics_block_short(code: &str, metrics: &RangeMetrics, now_ms: i64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} - {}\n{}\n",
        code,
        format_time(metrics.open.time_ms, now_ms),
        SEPARATOR
    ));
    out.push_str(&format!(
        "{:<15}| {}\n",
        "open:",
        price_cell(&metrics.open, false, now_ms)
    ));
    out.push_str(&format!(
        "{:<15}| {}\n",
        "close:",
        price_cell(&metrics.close, false, now_ms)
    ));
    out.push_str(&format!(
        "{:<15}| {}\n",
        "high:",
        price_cell(&metrics.high, true, now_ms)
    ));
    out.push_str(&format!(
        "{:<15}| {}\n",
        "low:",
        price_cell(&metrics.low, true, now_ms)
    ));
    out.push_str(&format!(
        "{:<15}| {}%\n",
        "open -> close:",
        signed(metrics.delta(MetricField::Close, MetricField::Open))
    ));
    out
}

fn run_block(run: &Run, now_ms: i64) -> String {
    let days_ago = (now_ms - run.to.time_ms).div_euclid(MS_IN_A_DAY);
    let mut out = String::new();
    out.push_str(&format!("{}\n{} days ago\n", SEPARATOR, days_ago));
    out.push_str(&format!(
        "{:<15}| {}\n",
        "from:",
        price_cell(&run.from, true, now_ms)
    ));
    out.push_str(&format!(
        "{:<15}| {}\n",
        "to:",
        price_cell(&run.to, true, now_ms)
    ));
    out.push_str(&format!(
        "{:<15}| {}%\n",
        "change:",
        signed(percent_change(run.to.value, run.from.value))
    ));
    out
}

/// Full report for one coin: title, every report horizon, and the latest
/// runs newest first.
pub fn coin_report(coin: &Coin, now_ms: i64) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", coin.meta.title, coin.meta.code));
    let Some(metrics) = &coin.metrics else {
        out.push_str("no metrics yet\n");
        return out;
    };
    for horizon in REPORT_HORIZONS {
        out.push_str(&metrics_block(
            horizon.label(),
            metrics.get(horizon),
            now_ms,
        ));
    }
    out.push_str(&format!("RUNS ({})\n", coin.runs.len()));
    for run in coin.runs.iter().rev().take(MAX_RUNS_SHOWN) {
        out.push_str(&run_block(run, now_ms));
    }
    out
}

/// Compact week block for every coin, ranked by week open-to-close gain with
/// the biggest gain first.
pub fn week_snapshot(coins: &CoinTable, now_ms: i64) -> String {
    let mut ranked: Vec<&Coin> = coins
        .coins()
        .iter()
        .filter(|c| c.metrics.is_some())
        .collect();
    ranked.sort_by_key(|c| {
        std::cmp::Reverse(
            c.metrics
                .as_ref()
                .map(|m| m.week.delta(MetricField::Close, MetricField::Open))
                .unwrap_or(i64::MIN),
        )
    });

    let mut out = String::new();
    for coin in ranked {
        if let Some(metrics) = &coin.metrics {
            out.push_str(&metrics_block_short(&coin.meta.code, &metrics.week, now_ms));
        }
    }
    out
}

/// Summary printed when the interesting set changes: the owned, bought and
/// sold code lists, the simulated session gain, and a full report for each
/// owned coin.
pub fn watch_summary(
    coins: &CoinTable,
    owned: &[String],
    bought: &[String],
    sold: &[String],
    gain: f64,
    now_ms: i64,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("OWNED: {}\n", owned.join(", ")));
    out.push_str(&format!("BUY:   {}\n", bought.join(", ")));
    out.push_str(&format!("SELL:  {}\n", sold.join(", ")));
    out.push_str(&format!("GAIN:  {}%\n", signed_f64(gain)));
    for code in owned {
        if let Some(coin) = coins.get(code) {
            out.push('\n');
            out.push_str(&coin_report(coin, now_ms));
        }
    }
    out
}
