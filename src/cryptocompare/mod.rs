pub mod rest;
pub mod types;

pub use rest::{CryptoCompareClient, Resolution};
