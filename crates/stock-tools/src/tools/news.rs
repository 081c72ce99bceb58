//! Tool for news headline sentiment analysis

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::Tool;
use stock_core::api::NewsProvider;
use stock_core::cache::{CacheKey, StockCache};
use stock_core::config::StockConfig;
use stock_core::error::{Result, StockError};
use stock_core::resolver;
use stock_core::sentiment::{self, SentimentResult};

use super::round1;

/// Tool for fetching recent headlines and scoring their sentiment
pub struct NewsSentimentTool {
    provider: Arc<dyn NewsProvider>,
    cache: StockCache,
    config: Arc<StockConfig>,
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    company: String,
}

impl NewsSentimentTool {
    /// Create a new news sentiment tool
    pub fn new(
        provider: Arc<dyn NewsProvider>,
        config: Arc<StockConfig>,
        cache: StockCache,
    ) -> Self {
        Self {
            provider,
            cache,
            config,
        }
    }

    /// Fetch headlines, score each title, and aggregate the results
    async fn analyze_news(&self, params: NewsParams) -> Result<Value> {
        let ticker = resolver::resolve_ticker(&params.company);
        let search_name = resolver::news_search_name(&params.company);
        let limit = self.config.news_limit;

        let cache_key = CacheKey::new(&ticker, "news", json!({"limit": limit}));
        let result = self
            .cache
            .get_or_fetch(cache_key, || async {
                let items = self.provider.headlines(&ticker, limit).await?;

                // Items without a usable title are dropped rather than
                // failing the whole aggregate
                let items: Vec<_> = items
                    .into_iter()
                    .filter(|item| !item.title.trim().is_empty())
                    .collect();

                if items.is_empty() {
                    return Ok::<_, StockError>(json!({
                        "company": params.company,
                        "search_name": search_name,
                        "news_count": 0,
                        "news": [],
                        "overall_sentiment": {
                            "score": 0.0,
                            "label": "neutral",
                            "positive_count": 0,
                            "negative_count": 0,
                            "neutral_count": 0,
                        },
                    }));
                }

                let results: Vec<SentimentResult> =
                    items.iter().map(|item| sentiment::score_text(&item.title)).collect();

                let news: Vec<Value> = items
                    .iter()
                    .zip(&results)
                    .map(|(item, scored)| {
                        json!({
                            "title": item.title,
                            "published": item.published.map(|t| t.to_rfc3339()),
                            "link": item.link,
                            "sentiment_score": scored.score,
                            "sentiment_label": scored.label,
                            "positive_keywords": scored.matched_positive,
                            "negative_keywords": scored.matched_negative,
                        })
                    })
                    .collect();

                let summary = sentiment::aggregate(&results, limit);

                Ok::<_, StockError>(json!({
                    "company": params.company,
                    "search_name": search_name,
                    "news_count": news.len(),
                    "news": news,
                    "overall_sentiment": {
                        "score": round1(summary.average_score),
                        "label": summary.label,
                        "positive_count": summary.positive_count,
                        "negative_count": summary.negative_count,
                        "neutral_count": summary.neutral_count,
                    },
                }))
            })
            .await?;

        Ok(result)
    }
}

#[async_trait]
impl Tool for NewsSentimentTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: NewsParams = serde_json::from_value(params)?;
        self.analyze_news(params).await
    }

    fn name(&self) -> &str {
        "news_sentiment"
    }

    fn description(&self) -> &str {
        "Fetch recent news headlines for a company and score their sentiment. \
         Returns per-headline scores with matched keywords and an overall verdict."
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
