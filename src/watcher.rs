use std::time::Duration;

use anyhow::{Context, Result};

use crate::analytics::classify::{is_interesting, ClassifierParams};
use crate::analytics::horizon::HorizonMetrics;
use crate::analytics::portfolio;
use crate::analytics::runs::{detect_runs, RunParams};
use crate::config::Config;
use crate::cryptocompare::rest::CryptoCompareClient;
use crate::model::coin::CoinTable;
use crate::model::price_point::PricePoint;
use crate::model::transaction::{TradeKind, TransactionLog};
use crate::report;

/// Split a set change into codes that entered and codes that left,
/// preserving the order of the source lists.
pub fn diff_interesting(prev: &[String], next: &[String]) -> (Vec<String>, Vec<String>) {
    let entered = next.iter().filter(|c| !prev.contains(c)).cloned().collect();
    let left = prev.iter().filter(|c| !next.contains(c)).cloned().collect();
    (entered, left)
}

/// Record a buy for every entering code and a sell for every leaving one, at
/// the coin's latest series value. Codes without a priced coin are skipped.
pub fn record_set_change(
    log: &mut TransactionLog,
    coins: &CoinTable,
    entered: &[String],
    left: &[String],
    now_ms: i64,
) {
    for code in entered {
        if let Some(latest) = coins.get(code).and_then(|c| c.series.latest()) {
            tracing::debug!(kind = %TradeKind::Buy, %code, price = latest.value, "recording simulated trade");
            log.record(TradeKind::Buy, code, latest.value, now_ms);
        }
    }
    for code in left {
        if let Some(latest) = coins.get(code).and_then(|c| c.series.latest()) {
            tracing::debug!(kind = %TradeKind::Sell, %code, price = latest.value, "recording simulated trade");
            log.record(TradeKind::Sell, code, latest.value, now_ms);
        }
    }
}

/// The live polling loop: refreshes quotes, recomputes per-coin analytics,
/// and maintains the interesting set and its simulated trade log.
pub struct Watcher {
    client: CryptoCompareClient,
    config: Config,
    coins: CoinTable,
    run_params: RunParams,
    classifier_params: ClassifierParams,
    poll_interval: Duration,
    transactions: TransactionLog,
    interesting: Vec<String>,
}

impl Watcher {
    pub fn new(client: CryptoCompareClient, config: Config, coins: CoinTable) -> Result<Self> {
        let run_params = RunParams {
            threshold_percent: config.runs.threshold_percent,
            step_ms: config.runs.step_ms()?,
            window_ms: config.runs.window_ms()?,
        };
        let classifier_params = ClassifierParams {
            recent_run_max_age_ms: config.classifier.recent_run_max_age_ms()?,
            min_day_gain_percent: config.classifier.min_day_gain_percent,
            max_hour_loss_percent: config.classifier.max_hour_loss_percent,
        };
        let poll_interval = Duration::from_millis(config.watch.poll_interval_ms()? as u64);

        Ok(Self {
            client,
            config,
            coins,
            run_params,
            classifier_params,
            poll_interval,
            transactions: TransactionLog::new(),
            interesting: Vec::new(),
        })
    }

    /// Poll until Ctrl-C. The first cycle prints the ranked week snapshot;
    /// later cycles print a summary whenever the interesting set changes.
    pub async fn run(&mut self) -> Result<()> {
        let mut first_cycle = true;
        loop {
            self.cycle(first_cycle).await?;
            first_cycle = false;

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutting down");
                    return Ok(());
                }
            }
        }
    }

    async fn cycle(&mut self, first_cycle: bool) -> Result<()> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        self.refresh_prices(now_ms).await?;
        self.recompute(now_ms)?;

        if first_cycle {
            print!(
                "{}{}",
                report::CLEAR_SCREEN,
                report::week_snapshot(&self.coins, now_ms)
            );
        }

        let interesting = self.classify(now_ms);
        if interesting != self.interesting {
            let (entered, left) = diff_interesting(&self.interesting, &interesting);
            record_set_change(&mut self.transactions, &self.coins, &entered, &left, now_ms);
            let gain = portfolio::percent_gain(self.transactions.entries(), &self.coins)?;
            tracing::info!(
                owned = interesting.len(),
                bought = entered.len(),
                sold = left.len(),
                gain,
                "interesting set changed"
            );
            print!(
                "{}{}",
                report::CLEAR_SCREEN,
                report::watch_summary(&self.coins, &interesting, &entered, &left, gain, now_ms)
            );
        }
        self.interesting = interesting;
        Ok(())
    }

    /// Fetch the current quote for every coin and append it to the series at
    /// `now_ms`. Coins missing from the response keep their history and are
    /// logged.
    async fn refresh_prices(&mut self, now_ms: i64) -> Result<()> {
        let codes = self.coins.codes();
        let quotes = self
            .client
            .current_prices(&self.config.provider.base_fiat, &codes)
            .await
            .context("current price poll failed")?;

        for coin in self.coins.iter_mut() {
            match quotes.get(&coin.meta.code) {
                Some(&quote) if quote > 0.0 && quote.is_finite() => {
                    coin.series.push_live(PricePoint::new(now_ms, 1.0 / quote));
                }
                _ => tracing::warn!(code = %coin.meta.code, "no usable quote in poll response"),
            }
        }
        Ok(())
    }

    fn recompute(&mut self, now_ms: i64) -> Result<()> {
        let run_params = self.run_params;
        for coin in self.coins.iter_mut() {
            coin.metrics = Some(HorizonMetrics::compute(&coin.series, now_ms)?);
            coin.runs = detect_runs(&coin.series, now_ms, &run_params)?;
        }
        Ok(())
    }

    fn classify(&self, now_ms: i64) -> Vec<String> {
        self.coins
            .coins()
            .iter()
            .filter(|coin| {
                let Some(metrics) = &coin.metrics else {
                    return false;
                };
                is_interesting(
                    &coin.runs,
                    &metrics.hour,
                    &metrics.day,
                    now_ms,
                    &self.classifier_params,
                )
            })
            .map(|coin| coin.meta.code.clone())
            .collect()
    }
}
