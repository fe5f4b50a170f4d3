use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeKind {
    Buy,
    Sell,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Buy => write!(f, "BUY"),
            TradeKind::Sell => write!(f, "SELL"),
        }
    }
}

/// One simulated trade recorded when a coin enters or leaves the
/// interesting set. `price` is the series value at the time of the trade.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub kind: TradeKind,
    pub code: String,
    pub price: f64,
    pub time_ms: i64,
}

/// Append-only trade log for the current watch session.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, kind: TradeKind, code: &str, price: f64, time_ms: i64) {
        self.entries.push(Transaction {
            kind,
            code: code.to_string(),
            price,
            time_ms,
        });
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
