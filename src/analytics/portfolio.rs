use std::collections::HashMap;

use crate::error::AppError;
use crate::model::coin::CoinTable;
use crate::model::transaction::{TradeKind, Transaction};

/// Replay a trade log and return the session gain in percentage points.
///
/// Each sell closes the open buy for its code and realizes
/// `sell / buy - 1`. Positions still open after the replay are marked to
/// market against the coin's latest series value. A sell without a matching
/// buy, or an open position whose coin has no series data, is an error. A
/// repeated buy for the same code replaces the open position.
pub fn percent_gain(transactions: &[Transaction], coins: &CoinTable) -> Result<f64, AppError> {
    let mut open: HashMap<&str, &Transaction> = HashMap::new();
    let mut gain = 0.0;

    for tx in transactions {
        match tx.kind {
            TradeKind::Buy => {
                open.insert(tx.code.as_str(), tx);
            }
            TradeKind::Sell => {
                let buy = open.remove(tx.code.as_str()).ok_or_else(|| {
                    AppError::Portfolio(format!("sell of {} without an open buy", tx.code))
                })?;
                gain += tx.price / buy.price - 1.0;
            }
        }
    }

    for (code, buy) in &open {
        let latest = coins
            .get(code)
            .and_then(|coin| coin.series.latest())
            .ok_or_else(|| {
                AppError::Portfolio(format!("no price data for open position in {}", code))
            })?;
        gain += latest.value / buy.price - 1.0;
    }

    Ok(gain * 100.0)
}
