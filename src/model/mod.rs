pub mod coin;
pub mod price_point;
pub mod series;
pub mod transaction;

pub use coin::{Coin, CoinMeta, CoinTable};
pub use price_point::PricePoint;
pub use series::{PriceSeries, RawSample};
pub use transaction::{TradeKind, Transaction, TransactionLog};
