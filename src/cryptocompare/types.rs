use std::collections::HashMap;

use serde::Deserialize;

/// Deserialize CryptoCompare's loosely typed numeric fields to an optional
/// f64. The coin list reports supply variously as a number, a numeric
/// string, or placeholder text like "N/A"; anything unparsable becomes None.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// One coin's entry in the provider coin list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoinListEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub coin_name: String,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub total_coin_supply: Option<f64>,
}

/// Envelope around the `/coinlist` endpoint.
#[derive(Debug, Deserialize)]
pub struct CoinListResponse {
    #[serde(rename = "Data", default)]
    pub data: HashMap<String, CoinListEntry>,
}

/// One OHLC sample from the histo endpoints. `time` is epoch seconds; a
/// missing close deserializes to zero and is dropped during the merge.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HistoSample {
    pub time: i64,
    #[serde(default)]
    pub close: f64,
}

/// Envelope around the `/histominute`, `/histohour` and `/histoday`
/// endpoints.
#[derive(Debug, Deserialize)]
pub struct HistoResponse {
    #[serde(rename = "Data", default)]
    pub data: Vec<HistoSample>,
}
