use coinwatch::analytics::percent_gain;
use coinwatch::error::AppError;
use coinwatch::model::{
    Coin, CoinMeta, CoinTable, PricePoint, PriceSeries, TradeKind, TransactionLog,
};

fn coin_with_latest(code: &str, value: f64) -> Coin {
    let mut coin = Coin::new(CoinMeta {
        id: "1".to_string(),
        code: code.to_string(),
        name: code.to_string(),
        title: format!("{} Coin", code),
        supply: None,
    });
    coin.series = PriceSeries::from_points(vec![PricePoint::new(0, value)]);
    coin
}

fn table(coins: Vec<Coin>) -> CoinTable {
    let mut t = CoinTable::new();
    for coin in coins {
        t.push(coin);
    }
    t
}

#[test]
fn a_round_trip_realizes_its_gain() {
    let mut log = TransactionLog::new();
    log.record(TradeKind::Buy, "AAA", 100.0, 0);
    log.record(TradeKind::Sell, "AAA", 120.0, 1_000);

    let gain = percent_gain(log.entries(), &CoinTable::new()).unwrap();
    assert!((gain - 20.0).abs() < 1e-9);
}

#[test]
fn open_positions_mark_to_the_latest_value() {
    let mut log = TransactionLog::new();
    log.record(TradeKind::Buy, "AAA", 80.0, 0);

    let coins = table(vec![coin_with_latest("AAA", 100.0)]);
    let gain = percent_gain(log.entries(), &coins).unwrap();
    assert!((gain - 25.0).abs() < 1e-9);
}

#[test]
fn realized_and_unrealized_gains_sum() {
    let mut log = TransactionLog::new();
    log.record(TradeKind::Buy, "AAA", 100.0, 0);
    log.record(TradeKind::Sell, "AAA", 120.0, 1_000);
    log.record(TradeKind::Buy, "BBB", 50.0, 2_000);

    let coins = table(vec![coin_with_latest("BBB", 40.0)]);
    let gain = percent_gain(log.entries(), &coins).unwrap();
    assert!(gain.abs() < 1e-9);
}

#[test]
fn losses_come_out_negative() {
    let mut log = TransactionLog::new();
    log.record(TradeKind::Buy, "AAA", 100.0, 0);
    log.record(TradeKind::Sell, "AAA", 75.0, 1_000);

    let gain = percent_gain(log.entries(), &CoinTable::new()).unwrap();
    assert!((gain + 25.0).abs() < 1e-9);
}

#[test]
fn a_repeated_buy_replaces_the_open_position() {
    let mut log = TransactionLog::new();
    log.record(TradeKind::Buy, "AAA", 100.0, 0);
    log.record(TradeKind::Buy, "AAA", 50.0, 1_000);
    log.record(TradeKind::Sell, "AAA", 60.0, 2_000);

    let gain = percent_gain(log.entries(), &CoinTable::new()).unwrap();
    assert!((gain - 20.0).abs() < 1e-9);
}

#[test]
fn an_empty_log_has_zero_gain() {
    let gain = percent_gain(&[], &CoinTable::new()).unwrap();
    assert!(gain.abs() < f64::EPSILON);
}

#[test]
fn a_sell_without_an_open_buy_is_an_error() {
    let mut log = TransactionLog::new();
    log.record(TradeKind::Sell, "AAA", 10.0, 0);

    let err = percent_gain(log.entries(), &CoinTable::new()).unwrap_err();
    assert!(matches!(err, AppError::Portfolio(_)));
}

#[test]
fn an_open_position_without_price_data_is_an_error() {
    let mut log = TransactionLog::new();
    log.record(TradeKind::Buy, "AAA", 10.0, 0);

    // No such coin at all.
    let err = percent_gain(log.entries(), &CoinTable::new()).unwrap_err();
    assert!(matches!(err, AppError::Portfolio(_)));

    // Coin exists but has no points.
    let coins = table(vec![Coin::new(CoinMeta {
        id: "1".to_string(),
        code: "AAA".to_string(),
        name: "AAA".to_string(),
        title: "AAA Coin".to_string(),
        supply: None,
    })]);
    let err = percent_gain(log.entries(), &coins).unwrap_err();
    assert!(matches!(err, AppError::Portfolio(_)));
}
