//! Yahoo Finance price history client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

use crate::api::{LookbackRange, PriceHistoryProvider};
use crate::bar::PriceBar;
use crate::error::{Result, StockError};

/// Yahoo Finance API client
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    /// Get historical bars for a symbol between two instants
    pub async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceBar>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| StockError::YahooFinanceError(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| StockError::YahooFinanceError(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        Ok(quotes
            .iter()
            .map(|q| PriceBar {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect())
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooFinanceClient {
    async fn history(&self, symbol: &str, range: LookbackRange) -> Result<Vec<PriceBar>> {
        let end = Utc::now();
        let start = end - chrono::Duration::days(range.days());
        self.get_historical_quotes(symbol, start, end).await
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for YahooFinanceClient {
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_history_three_months() {
        let client = YahooFinanceClient::new();
        let bars = client.history("AAPL", LookbackRange::ThreeMonths).await;
        assert!(bars.is_ok());

        let bars = bars.unwrap();
        assert!(!bars.is_empty());
        assert!(bars[0].close > 0.0);
        // Ascending timestamp order is part of the provider contract
        assert!(bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }
}
