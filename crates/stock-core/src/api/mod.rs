//! External market data and news providers
//!
//! The analysis core never fetches anything itself: price history and news
//! arrive through the trait seams below, and the concrete clients here are
//! just the default implementations. Providers return already-ordered data;
//! retry and timeout policy lives with them, not with the analysis code.

pub mod finnhub;
pub mod yahoo;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bar::PriceBar;
use crate::error::{Result, StockError};

pub use finnhub::FinnhubClient;
pub use yahoo::YahooFinanceClient;

/// Supported lookback windows for historical price requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookbackRange {
    OneMonth,
    #[default]
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl LookbackRange {
    /// Range token in provider notation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
        }
    }

    /// Calendar days covered by the window
    pub fn days(&self) -> i64 {
        match self {
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::OneYear => 365,
        }
    }
}

impl FromStr for LookbackRange {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1mo" => Ok(Self::OneMonth),
            "3mo" => Ok(Self::ThreeMonths),
            "6mo" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            other => Err(StockError::InvalidRange(other.to_string())),
        }
    }
}

impl fmt::Display for LookbackRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One news headline with its metadata passed through unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub published: Option<DateTime<Utc>>,
    pub link: String,
}

/// Source of ordered historical price bars
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Fetch bars for the symbol over the lookback window, ascending by
    /// timestamp. An empty result means the symbol has no data for the
    /// window; callers decide whether that is fatal.
    async fn history(&self, symbol: &str, range: LookbackRange) -> Result<Vec<PriceBar>>;
}

/// Source of recent news headlines for a search query
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch up to `limit` recent headlines, most relevant first
    async fn headlines(&self, query: &str, limit: usize) -> Result<Vec<NewsItem>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_tokens_round_trip() {
        for range in [
            LookbackRange::OneMonth,
            LookbackRange::ThreeMonths,
            LookbackRange::SixMonths,
            LookbackRange::OneYear,
        ] {
            assert_eq!(range.as_str().parse::<LookbackRange>().unwrap(), range);
        }
    }

    #[test]
    fn unknown_range_token_is_rejected() {
        let err = "2w".parse::<LookbackRange>().unwrap_err();
        assert!(matches!(err, StockError::InvalidRange(_)));
    }

    #[test]
    fn default_range_is_three_months() {
        assert_eq!(LookbackRange::default(), LookbackRange::ThreeMonths);
        assert_eq!(LookbackRange::default().days(), 90);
    }
}
