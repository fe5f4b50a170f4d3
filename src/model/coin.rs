use crate::analytics::horizon::HorizonMetrics;
use crate::analytics::runs::Run;
use crate::model::series::PriceSeries;

/// Static coin metadata resolved from the provider's coin list.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinMeta {
    pub id: String,
    pub code: String,
    pub name: String,
    pub title: String,
    pub supply: Option<f64>,
}

/// One watched asset: resolved metadata, its merged price series, and the
/// analytics recomputed from that series on the latest poll.
#[derive(Debug, Clone)]
pub struct Coin {
    pub meta: CoinMeta,
    pub series: PriceSeries,
    pub metrics: Option<HorizonMetrics>,
    pub runs: Vec<Run>,
}

impl Coin {
    pub fn new(meta: CoinMeta) -> Self {
        Self {
            meta,
            series: PriceSeries::new(),
            metrics: None,
            runs: Vec::new(),
        }
    }
}

/// All watched coins in configuration order. Built once at bootstrap and
/// passed explicitly to every consumer.
#[derive(Debug, Clone, Default)]
pub struct CoinTable {
    coins: Vec<Coin>,
}

impl CoinTable {
    pub fn new() -> Self {
        Self { coins: Vec::new() }
    }

    pub fn push(&mut self, coin: Coin) {
        self.coins.push(coin);
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Coin> {
        self.coins.iter_mut()
    }

    pub fn get(&self, code: &str) -> Option<&Coin> {
        self.coins.iter().find(|c| c.meta.code == code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut Coin> {
        self.coins.iter_mut().find(|c| c.meta.code == code)
    }

    pub fn codes(&self) -> Vec<String> {
        self.coins.iter().map(|c| c.meta.code.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}
