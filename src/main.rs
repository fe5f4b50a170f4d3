use anyhow::Result;

use coinwatch::config::Config;
use coinwatch::cryptocompare::rest::CryptoCompareClient;
use coinwatch::ingest;
use coinwatch::watcher::Watcher;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure config/default.toml exists, or point COINWATCH_CONFIG at a config file");
            std::process::exit(1);
        }
    };

    // Log to stderr; stdout belongs to the console report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        base_fiat = %config.provider.base_fiat,
        coins = config.watch.watch_codes().len(),
        poll_interval = %config.watch.poll_interval,
        "starting coinwatch"
    );

    let client = CryptoCompareClient::new(&config.provider);
    let coins = ingest::bootstrap(&client, &config).await?;
    tracing::info!(coins = coins.len(), "bootstrap complete, watching");

    Watcher::new(client, config, coins)?.run().await
}
