//! Agent-facing tools for the stock toolkit
//!
//! Each tool wraps one analysis capability behind a JSON-schema'd call
//! contract so an agent front end (or the CLI driver) can invoke it by
//! name. Tools resolve company names, fetch through the provider seams,
//! cache responses, and round values for display; the analysis itself
//! lives in `stock-core`.

pub mod registry;
pub mod tool;
pub mod tools;

pub use registry::ToolRegistry;
pub use tool::Tool;
pub use tools::{NewsSentimentTool, StockPriceTool, TrendAnalysisTool};

#[cfg(test)]
pub(crate) mod testing {
    //! Fixed-response providers for exercising tools without a network

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use stock_core::api::{LookbackRange, NewsItem, NewsProvider, PriceHistoryProvider};
    use stock_core::bar::PriceBar;
    use stock_core::error::Result;

    fn timestamp(day: usize) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap() + Duration::days(day as i64)
    }

    /// Price provider that always returns the same bars
    pub struct FixedHistory {
        bars: Vec<PriceBar>,
    }

    impl FixedHistory {
        pub fn from_closes(closes: &[f64]) -> Self {
            let bars = closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PriceBar {
                    timestamp: timestamp(i),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1000,
                })
                .collect();
            Self { bars }
        }
    }

    #[async_trait]
    impl PriceHistoryProvider for FixedHistory {
        async fn history(&self, _symbol: &str, _range: LookbackRange) -> Result<Vec<PriceBar>> {
            Ok(self.bars.clone())
        }
    }

    /// Price provider with no data for any symbol
    pub struct EmptyHistory;

    #[async_trait]
    impl PriceHistoryProvider for EmptyHistory {
        async fn history(&self, _symbol: &str, _range: LookbackRange) -> Result<Vec<PriceBar>> {
            Ok(Vec::new())
        }
    }

    /// News provider that always returns the same headlines
    pub struct FixedNews {
        items: Vec<NewsItem>,
    }

    impl FixedNews {
        pub fn from_titles(titles: &[&str]) -> Self {
            let items = titles
                .iter()
                .enumerate()
                .map(|(i, title)| NewsItem {
                    title: (*title).to_string(),
                    published: Some(timestamp(i)),
                    link: format!("https://example.com/news/{i}"),
                })
                .collect();
            Self { items }
        }
    }

    #[async_trait]
    impl NewsProvider for FixedNews {
        async fn headlines(&self, _query: &str, limit: usize) -> Result<Vec<NewsItem>> {
            Ok(self.items.iter().take(limit).cloned().collect())
        }
    }
}
