//! Tool for technical trend analysis over historical prices

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::Tool;
use stock_core::api::{LookbackRange, PriceHistoryProvider};
use stock_core::cache::{CacheKey, StockCache};
use stock_core::config::StockConfig;
use stock_core::error::{Result, StockError};
use stock_core::indicators::compute_indicators;
use stock_core::resolver;

use super::round2;

/// Tool for computing the technical indicator snapshot of a stock
pub struct TrendAnalysisTool {
    provider: Arc<dyn PriceHistoryProvider>,
    cache: StockCache,
    config: Arc<StockConfig>,
}

#[derive(Debug, Deserialize)]
struct TrendParams {
    company: String,
    #[serde(default)]
    range: Option<String>,
}

impl TrendAnalysisTool {
    /// Create a new trend analysis tool
    pub fn new(
        provider: Arc<dyn PriceHistoryProvider>,
        config: Arc<StockConfig>,
        cache: StockCache,
    ) -> Self {
        Self {
            provider,
            cache,
            config,
        }
    }

    /// Fetch history and compute the indicator snapshot
    async fn analyze_trend(&self, params: TrendParams) -> Result<Value> {
        let ticker = resolver::resolve_ticker(&params.company);
        let range = match &params.range {
            Some(token) => token.parse::<LookbackRange>()?,
            None => self.config.default_range,
        };

        let cache_key = CacheKey::new(&ticker, "trend", json!({"range": range.as_str()}));
        let result = self
            .cache
            .get_or_fetch(cache_key, || async {
                let bars = self.provider.history(&ticker, range).await?;

                if bars.is_empty() {
                    return Err(StockError::DataUnavailable {
                        symbol: ticker.clone(),
                        reason: "No historical data available".to_string(),
                    });
                }

                let snapshot = compute_indicators(&bars)?;

                // Rounding happens here; the engine returns full precision
                Ok::<_, StockError>(json!({
                    "company": params.company,
                    "ticker": ticker,
                    "period": range.as_str(),
                    "data_points": bars.len(),
                    "current_price": round2(snapshot.current_price),
                    "period_return": round2(snapshot.period_return),
                    "ma5": snapshot.ma5.map(round2),
                    "ma20": snapshot.ma20.map(round2),
                    "ma60": snapshot.ma60.map(round2),
                    "rsi": snapshot.rsi.map(round2),
                    "macd": snapshot.macd.map(round2),
                    "macd_signal": snapshot.macd_signal.map(round2),
                    "macd_histogram": snapshot.macd_histogram.map(round2),
                    "bb_position": snapshot.bb_position.map(round2),
                    "cross_signal": snapshot.cross_signal,
                    "volatility": round2(snapshot.volatility),
                    "volume_ratio": round2(snapshot.volume_ratio),
                    "highest": round2(snapshot.highest),
                    "lowest": round2(snapshot.lowest),
                }))
            })
            .await?;

        Ok(result)
    }
}

#[async_trait]
impl Tool for TrendAnalysisTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: TrendParams = serde_json::from_value(params)?;
        self.analyze_trend(params).await
    }

    fn name(&self) -> &str {
        "trend_analysis"
    }

    fn description(&self) -> &str {
        "Analyze the price trend of a stock with technical indicators: \
         moving averages (5/20/60), RSI, MACD, Bollinger band position, \
         golden/dead cross detection, volatility, and volume ratio."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company": {
                    "type": "string",
                    "description": "Company name or ticker symbol, passed through as typed"
                },
                "range": {
                    "type": "string",
                    "description": "Lookback window for historical data",
                    "enum": ["1mo", "3mo", "6mo", "1y"],
                    "default": "3mo"
                }
            },
            "required": ["company"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EmptyHistory, FixedHistory};
    use std::time::Duration;

    fn tool_with(provider: Arc<dyn PriceHistoryProvider>) -> TrendAnalysisTool {
        TrendAnalysisTool::new(
            provider,
            Arc::new(StockConfig::default()),
            StockCache::new(Duration::from_secs(60)),
        )
    }

    #[test]
    fn test_tool_metadata() {
        let tool = tool_with(Arc::new(EmptyHistory));
        assert_eq!(tool.name(), "trend_analysis");

        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["range"]["default"], "3mo");
    }

    #[tokio::test]
    async fn short_series_reports_absent_windows_as_null() {
        let closes: Vec<f64> = (1..=10).map(f64::from).collect();
        let tool = tool_with(Arc::new(FixedHistory::from_closes(&closes)));

        let data = tool.execute(json!({"company": "Amazon"})).await.unwrap();

        assert_eq!(data["ticker"], "AMZN");
        assert_eq!(data["period"], "3mo");
        assert_eq!(data["data_points"], 10);
        assert_eq!(data["current_price"], 10.0);
        assert_eq!(data["ma5"], 8.0);
        assert!(data["ma20"].is_null());
        assert!(data["ma60"].is_null());
        assert!(data["rsi"].is_null());
        assert!(data["macd"].is_null());
        assert!(data["bb_position"].is_null());
        assert!(data["cross_signal"].is_null());
    }

    #[tokio::test]
    async fn long_series_fills_every_indicator() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + f64::from(i % 7)).collect();
        let tool = tool_with(Arc::new(FixedHistory::from_closes(&closes)));

        let data = tool
            .execute(json!({"company": "msft", "range": "6mo"}))
            .await
            .unwrap();

        assert_eq!(data["period"], "6mo");
        assert!(data["ma5"].is_number());
        assert!(data["ma20"].is_number());
        assert!(data["ma60"].is_number());
        assert!(data["rsi"].is_number());
        assert!(data["macd"].is_number());
        assert!(data["macd_signal"].is_number());
        assert!(data["bb_position"].is_number());

        let rsi = data["rsi"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&rsi));
    }

    #[tokio::test]
    async fn golden_cross_appears_in_the_payload() {
        let mut closes = vec![100.0; 16];
        closes.extend([80.0, 80.0, 80.0, 80.0, 200.0]);
        let tool = tool_with(Arc::new(FixedHistory::from_closes(&closes)));

        let data = tool.execute(json!({"company": "X"})).await.unwrap();
        assert_eq!(data["cross_signal"], "golden_cross");
    }

    #[tokio::test]
    async fn invalid_range_is_rejected() {
        let tool = tool_with(Arc::new(FixedHistory::from_closes(&[100.0])));
        let err = tool
            .execute(json!({"company": "X", "range": "2w"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StockError::InvalidRange(_)));
    }

    #[tokio::test]
    async fn empty_history_is_data_unavailable() {
        let tool = tool_with(Arc::new(EmptyHistory));
        let err = tool.execute(json!({"company": "ghost"})).await.unwrap_err();
        assert!(matches!(err, StockError::DataUnavailable { .. }));
    }
}
