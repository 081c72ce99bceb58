//! Stock market analysis core
//!
//! This crate provides the analysis engine behind the stock toolkit:
//!
//! - Technical indicator computation over ordered price history (moving
//!   averages, RSI, MACD, Bollinger position, crossover detection)
//! - Keyword-weighted sentiment scoring for news headlines, with an
//!   aggregator that turns per-headline scores into an overall verdict
//! - Company name to ticker resolution for US and Korean listings
//! - Provider seams for price history (Yahoo Finance) and news (Finnhub)
//! - A TTL cache for provider responses
//!
//! The two analysis components are pure functions over their inputs: no
//! I/O, no shared state, and every call produces a fresh result.
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_core::api::{LookbackRange, PriceHistoryProvider, YahooFinanceClient};
//! use stock_core::indicators::compute_indicators;
//! use stock_core::resolver::resolve_ticker;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = YahooFinanceClient::new();
//!     let ticker = resolve_ticker("Amazon");
//!     let bars = client.history(&ticker, LookbackRange::ThreeMonths).await?;
//!     let snapshot = compute_indicators(&bars)?;
//!     println!("{snapshot:?}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bar;
pub mod cache;
pub mod config;
pub mod error;
pub mod indicators;
pub mod resolver;
pub mod sentiment;

// Re-export main types for convenience
pub use api::{LookbackRange, NewsItem, NewsProvider, PriceHistoryProvider};
pub use bar::PriceBar;
pub use config::StockConfig;
pub use error::{Result, StockError};
pub use indicators::{CrossSignal, IndicatorSnapshot, compute_indicators};
pub use sentiment::{SentimentLabel, SentimentResult, SentimentSummary, aggregate, score_text};
