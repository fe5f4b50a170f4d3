use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub watch: WatchConfig,
    pub runs: RunsConfig,
    pub classifier: ClassifierConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub api_base_url: String,
    pub min_api_base_url: String,
    pub base_fiat: String,
    pub max_concurrent_coins: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    #[serde(default)]
    pub coins: Vec<String>,
    pub poll_interval: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunsConfig {
    pub threshold_percent: i64,
    pub step: String,
    pub window: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    pub recent_run_max_age: String,
    pub min_day_gain_percent: i64,
    pub max_hour_loss_percent: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Parse a duration string (e.g. "15s", "1m", "1h", "1d", "7d", "1w") into milliseconds.
pub fn parse_duration_ms(s: &str) -> Result<i64> {
    if s.len() < 2 {
        bail!("invalid duration '{}': expected format like '15s' or '1d'", s);
    }

    let (num_str, suffix) = s.split_at(s.len() - 1);
    let n: i64 = num_str.parse().with_context(|| {
        format!(
            "invalid duration '{}': quantity must be a positive integer",
            s
        )
    })?;
    if n <= 0 {
        bail!("invalid duration '{}': quantity must be > 0", s);
    }

    let unit_ms = match suffix {
        "s" => 1_000,
        "m" => 60_000,
        "h" => 3_600_000,
        "d" => 86_400_000,
        "w" => 7 * 86_400_000,
        "M" => 30 * 86_400_000,
        _ => bail!(
            "invalid duration '{}': unsupported suffix '{}', expected one of s/m/h/d/w/M",
            s,
            suffix
        ),
    };

    n.checked_mul(unit_ms)
        .with_context(|| format!("invalid duration '{}': value is too large", s))
}

impl WatchConfig {
    pub fn poll_interval_ms(&self) -> Result<i64> {
        parse_duration_ms(&self.poll_interval)
    }

    /// Configured coin codes, trimmed, uppercased and deduplicated in order.
    pub fn watch_codes(&self) -> Vec<String> {
        let mut out = Vec::new();
        for code in &self.coins {
            let c = code.trim().to_ascii_uppercase();
            if !c.is_empty() && !out.iter().any(|v| v == &c) {
                out.push(c);
            }
        }
        out
    }
}

impl RunsConfig {
    pub fn step_ms(&self) -> Result<i64> {
        parse_duration_ms(&self.step)
    }

    pub fn window_ms(&self) -> Result<i64> {
        parse_duration_ms(&self.window)
    }
}

impl ClassifierConfig {
    pub fn recent_run_max_age_ms(&self) -> Result<i64> {
        parse_duration_ms(&self.recent_run_max_age)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var("COINWATCH_CONFIG")
            .unwrap_or_else(|_| "config/default.toml".to_string());
        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("failed to parse {}", config_path))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.watch.watch_codes().is_empty() {
            bail!("watch.coins must list at least one coin code");
        }
        if self.provider.max_concurrent_coins == 0 {
            bail!("provider.max_concurrent_coins must be > 0");
        }
        self.watch
            .poll_interval_ms()
            .context("watch.poll_interval is invalid")?;
        self.runs.step_ms().context("runs.step is invalid")?;
        self.runs.window_ms().context("runs.window is invalid")?;
        self.classifier
            .recent_run_max_age_ms()
            .context("classifier.recent_run_max_age is invalid")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let toml_str = r#"
[provider]
api_base_url = "https://www.cryptocompare.com/api/data"
min_api_base_url = "https://min-api.cryptocompare.com/data"
base_fiat = "AUD"
max_concurrent_coins = 5

[watch]
coins = ["BTC", "ETH", "KMD"]
poll_interval = "15s"

[runs]
threshold_percent = 15
step = "1d"
window = "7d"

[classifier]
recent_run_max_age = "1d"
min_day_gain_percent = 10
max_hour_loss_percent = -5

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.base_fiat, "AUD");
        assert_eq!(config.provider.max_concurrent_coins, 5);
        assert_eq!(config.watch.coins.len(), 3);
        assert_eq!(config.watch.poll_interval_ms().unwrap(), 15_000);
        assert_eq!(config.runs.threshold_percent, 15);
        assert_eq!(config.runs.step_ms().unwrap(), 86_400_000);
        assert_eq!(config.runs.window_ms().unwrap(), 7 * 86_400_000);
        assert_eq!(config.classifier.recent_run_max_age_ms().unwrap(), 86_400_000);
        assert_eq!(config.classifier.min_day_gain_percent, 10);
        assert_eq!(config.classifier.max_hour_loss_percent, -5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn watch_codes_dedup_and_uppercase() {
        let cfg = WatchConfig {
            coins: vec![
                "btc".to_string(),
                "ETH".to_string(),
                "BTC".to_string(),
                "  ".to_string(),
            ],
            poll_interval: "15s".to_string(),
        };
        assert_eq!(
            cfg.watch_codes(),
            vec!["BTC".to_string(), "ETH".to_string()]
        );
    }

    #[test]
    fn parse_duration_valid() {
        assert_eq!(parse_duration_ms("15s").unwrap(), 15_000);
        assert_eq!(parse_duration_ms("1m").unwrap(), 60_000);
        assert_eq!(parse_duration_ms("2h").unwrap(), 7_200_000);
        assert_eq!(parse_duration_ms("7d").unwrap(), 604_800_000);
        assert_eq!(parse_duration_ms("1w").unwrap(), 604_800_000);
    }

    #[test]
    fn parse_duration_rejects_invalid_inputs() {
        assert!(parse_duration_ms("").is_err());
        assert!(parse_duration_ms("s").is_err());
        assert!(parse_duration_ms("0d").is_err());
        assert!(parse_duration_ms("-1d").is_err());
        assert!(parse_duration_ms("1x").is_err());
    }
}
