//! OHLCV price bar types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One time-bucketed price record.
///
/// Providers return bars in strictly ascending timestamp order; daily bars
/// are the expected granularity but no fixed frequency is enforced. Price
/// fields are expected to be non-negative, though the indicator engine
/// tolerates violations rather than rejecting the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Create a bar with identical open/high/low/close, mostly useful for
    /// building synthetic series in tests and examples.
    pub fn flat(timestamp: DateTime<Utc>, price: f64, volume: u64) -> Self {
        Self {
            timestamp,
            open: price,
            high: price,
            low: price,
            close: price,
            volume,
        }
    }
}
