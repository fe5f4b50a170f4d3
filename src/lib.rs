//! Crypto price watcher.
//!
//! Ingests multi-resolution price history from a CryptoCompare-style API,
//! merges it into one series per coin, and derives range metrics over fixed
//! horizons, sustained-gain runs, an interesting-now screen, and a simulated
//! watch portfolio that the console report tracks across polls.

pub mod analytics;
pub mod config;
pub mod cryptocompare;
pub mod error;
pub mod ingest;
pub mod model;
pub mod report;
pub mod watcher;
