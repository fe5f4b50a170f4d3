use anyhow::{bail, Context, Result};
use futures_util::future::try_join_all;

use crate::config::Config;
use crate::cryptocompare::rest::{CryptoCompareClient, Resolution};
use crate::cryptocompare::types::{CoinListEntry, HistoSample};
use crate::model::coin::{Coin, CoinMeta, CoinTable};
use crate::model::series::{PriceSeries, RawSample};

/// Resolve the configured coin codes against the provider coin list, then
/// fetch and merge the full multi-resolution history for every resolved
/// coin. Unknown codes are logged and skipped; a fetch failure aborts the
/// whole bootstrap.
pub async fn bootstrap(client: &CryptoCompareClient, config: &Config) -> Result<CoinTable> {
    tracing::info!("loading provider coin list");
    let listing = client.coin_list().await.context("coin list fetch failed")?;
    tracing::info!(coins = listing.len(), "coin list loaded");

    let mut table = CoinTable::new();
    for code in config.watch.watch_codes() {
        match listing.get(&code) {
            Some(entry) => table.push(Coin::new(coin_meta(entry))),
            None => tracing::error!(%code, "coin is not in the provider list, skipping"),
        }
    }
    if table.is_empty() {
        bail!("none of the configured coins exist at the provider");
    }

    fetch_all_histories(client, config, &mut table).await?;
    Ok(table)
}

fn coin_meta(entry: &CoinListEntry) -> CoinMeta {
    CoinMeta {
        id: entry.id.clone(),
        code: entry.symbol.clone(),
        name: entry.name.clone(),
        title: entry.coin_name.clone(),
        supply: entry.total_coin_supply.filter(|v| *v != 0.0),
    }
}

/// Fetch minute, hour and day history for every coin, a fixed number of
/// coins per batch with all three resolutions of a coin in flight together.
async fn fetch_all_histories(
    client: &CryptoCompareClient,
    config: &Config,
    table: &mut CoinTable,
) -> Result<()> {
    let base_fiat = &config.provider.base_fiat;
    let codes = table.codes();
    let total = codes.len();

    for (batch_index, batch) in codes.chunks(config.provider.max_concurrent_coins).enumerate() {
        tracing::info!(
            done = batch_index * config.provider.max_concurrent_coins,
            total,
            "loading price history"
        );
        let fetched = try_join_all(
            batch
                .iter()
                .map(|code| fetch_coin_history(client, base_fiat, code)),
        )
        .await?;

        for (code, by_resolution) in fetched {
            for (resolution, samples) in Resolution::ALL.iter().zip(by_resolution.iter()) {
                if samples.is_empty() {
                    tracing::warn!(
                        %code,
                        resolution = resolution.label(),
                        "provider returned no history samples"
                    );
                }
            }
            let [minute, hour, day] = by_resolution;
            if let Some(coin) = table.get_mut(&code) {
                coin.series = PriceSeries::merge(&day, &hour, &minute);
                tracing::debug!(%code, points = coin.series.len(), "history merged");
            }
        }
    }
    Ok(())
}

/// All three resolutions for one coin, returned minute first.
async fn fetch_coin_history(
    client: &CryptoCompareClient,
    base_fiat: &str,
    code: &str,
) -> Result<(String, [Vec<RawSample>; 3])> {
    let (minute, hour, day) = tokio::join!(
        client.history(base_fiat, code, Resolution::Minute),
        client.history(base_fiat, code, Resolution::Hour),
        client.history(base_fiat, code, Resolution::Day),
    );
    Ok((
        code.to_string(),
        [raw_samples(minute?), raw_samples(hour?), raw_samples(day?)],
    ))
}

fn raw_samples(samples: Vec<HistoSample>) -> Vec<RawSample> {
    samples
        .iter()
        .map(|s| RawSample::new(s.time, s.close))
        .collect()
}
