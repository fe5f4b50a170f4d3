use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::config::ProviderConfig;
use crate::error::AppError;

use super::types::{CoinListEntry, CoinListResponse, HistoResponse, HistoSample};

/// History resolution, mapped to its endpoint and the fixed sample count
/// requested at bootstrap: a day of minutes, two months of hours, five
/// years of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Minute,
    Hour,
    Day,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::Minute, Resolution::Hour, Resolution::Day];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Resolution::Minute => "histominute",
            Resolution::Hour => "histohour",
            Resolution::Day => "histoday",
        }
    }

    pub fn sample_limit(&self) -> u32 {
        match self {
            Resolution::Minute => 60 * 24,
            Resolution::Hour => 24 * 30 * 2,
            Resolution::Day => 5 * 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Minute => "minute",
            Resolution::Hour => "hour",
            Resolution::Day => "day",
        }
    }
}

/// Thin client over the two CryptoCompare hosts: the site API serves the
/// coin list, the min-api host serves prices and history.
pub struct CryptoCompareClient {
    http: reqwest::Client,
    api_base_url: String,
    min_api_base_url: String,
}

impl CryptoCompareClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            min_api_base_url: config.min_api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET a JSON document, surfacing the provider's in-band error envelope
    /// (HTTP 200 with `{"Response": "Error", "Message": ...}`) as an error.
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        tracing::debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("request to {} was rejected", url))?;

        let value: serde_json::Value = response
            .json()
            .await
            .with_context(|| format!("response from {} is not valid JSON", url))?;

        if value.get("Response").and_then(|v| v.as_str()) == Some("Error") {
            let message = value
                .get("Message")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown provider error")
                .to_string();
            return Err(AppError::Provider { message }.into());
        }

        Ok(value)
    }

    pub async fn coin_list(&self) -> Result<HashMap<String, CoinListEntry>> {
        let url = format!("{}/coinlist", self.api_base_url);
        let value = self.get_json(&url).await?;
        let response: CoinListResponse =
            serde_json::from_value(value).context("failed to decode coin list")?;
        Ok(response.data)
    }

    /// Current price of one base-fiat unit in terms of each listed coin.
    pub async fn current_prices(
        &self,
        base_fiat: &str,
        codes: &[String],
    ) -> Result<HashMap<String, f64>> {
        let url = self.price_url(base_fiat, codes);
        let value = self.get_json(&url).await?;
        serde_json::from_value(value).context("failed to decode current prices")
    }

    pub async fn history(
        &self,
        base_fiat: &str,
        code: &str,
        resolution: Resolution,
    ) -> Result<Vec<HistoSample>> {
        let url = self.history_url(base_fiat, code, resolution);
        let value = self.get_json(&url).await?;
        let response: HistoResponse = serde_json::from_value(value)
            .with_context(|| format!("failed to decode {} history for {}", resolution.label(), code))?;
        Ok(response.data)
    }

    fn price_url(&self, base_fiat: &str, codes: &[String]) -> String {
        format!(
            "{}/price?fsym={}&tsyms={}",
            self.min_api_base_url,
            base_fiat,
            codes.join(",")
        )
    }

    fn history_url(&self, base_fiat: &str, code: &str, resolution: Resolution) -> String {
        format!(
            "{}/{}?fsym={}&tsym={}&limit={}",
            self.min_api_base_url,
            resolution.endpoint(),
            base_fiat,
            code,
            resolution.sample_limit()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CryptoCompareClient {
        CryptoCompareClient::new(&ProviderConfig {
            api_base_url: "https://www.cryptocompare.com/api/data/".to_string(),
            min_api_base_url: "https://min-api.cryptocompare.com/data".to_string(),
            base_fiat: "AUD".to_string(),
            max_concurrent_coins: 5,
        })
    }

    #[test]
    fn price_url_lists_all_codes() {
        let url = client().price_url("AUD", &["BTC".to_string(), "ETH".to_string()]);
        assert_eq!(
            url,
            "https://min-api.cryptocompare.com/data/price?fsym=AUD&tsyms=BTC,ETH"
        );
    }

    #[test]
    fn history_url_carries_resolution_limit() {
        let c = client();
        assert_eq!(
            c.history_url("AUD", "KMD", Resolution::Minute),
            "https://min-api.cryptocompare.com/data/histominute?fsym=AUD&tsym=KMD&limit=1440"
        );
        assert_eq!(
            c.history_url("AUD", "KMD", Resolution::Hour),
            "https://min-api.cryptocompare.com/data/histohour?fsym=AUD&tsym=KMD&limit=1440"
        );
        assert_eq!(
            c.history_url("AUD", "KMD", Resolution::Day),
            "https://min-api.cryptocompare.com/data/histoday?fsym=AUD&tsym=KMD&limit=1825"
        );
    }
}
