//! Tool for fetching the current price and day-over-day change

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::Tool;
use stock_core::api::{LookbackRange, PriceHistoryProvider};
use stock_core::cache::{CacheKey, StockCache};
use stock_core::config::StockConfig;
use stock_core::error::{Result, StockError};
use stock_core::resolver;

use super::round2;

/// Tool for fetching the latest quote for a company
pub struct StockPriceTool {
    provider: Arc<dyn PriceHistoryProvider>,
    cache: StockCache,
    _config: Arc<StockConfig>,
}

#[derive(Debug, Deserialize)]
struct StockPriceParams {
    company: String,
}

impl StockPriceTool {
    /// Create a new stock price tool
    pub fn new(
        provider: Arc<dyn PriceHistoryProvider>,
        config: Arc<StockConfig>,
        cache: StockCache,
    ) -> Self {
        Self {
            provider,
            cache,
            _config: config,
        }
    }

    /// Fetch the latest close and the change against the previous close
    async fn fetch_price(&self, params: StockPriceParams) -> Result<Value> {
        let ticker = resolver::resolve_ticker(&params.company);

        let cache_key = CacheKey::new(&ticker, "price", json!({}));
        let result = self
            .cache
            .get_or_fetch(cache_key, || async {
                // A short window is enough for current and previous close
                let bars = self
                    .provider
                    .history(&ticker, LookbackRange::OneMonth)
                    .await?;

                let Some(last) = bars.last() else {
                    return Err(StockError::DataUnavailable {
                        symbol: ticker.clone(),
                        reason: "No price data available".to_string(),
                    });
                };

                let current_price = last.close;
                let previous_price = if bars.len() > 1 {
                    bars[bars.len() - 2].close
                } else {
                    current_price
                };

                let change_percent = if previous_price > 0.0 {
                    (current_price - previous_price) / previous_price * 100.0
                } else {
                    0.0
                };

                Ok::<_, StockError>(json!({
                    "company": params.company,
                    "ticker": ticker,
                    "current_price": round2(current_price),
                    "previous_price": round2(previous_price),
                    "change_percent": round2(change_percent),
                }))
            })
            .await?;

        Ok(result)
    }
}

#[async_trait]
impl Tool for StockPriceTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: StockPriceParams = serde_json::from_value(params)?;
        self.fetch_price(params).await
    }

    fn name(&self) -> &str {
        "stock_price"
    }

    fn description(&self) -> &str {
        "Fetch the current stock price for a company. \
         Returns the latest close, the previous close, and the percent change."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company": {
                    "type": "string",
                    "description": "Company name or ticker symbol, passed through as typed"
                }
            },
            "required": ["company"]
        })
    }
}
