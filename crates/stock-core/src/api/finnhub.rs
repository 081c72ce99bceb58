//! Finnhub news client

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::{NewsItem, NewsProvider};
use crate::error::{Result, StockError};

const COMPANY_NEWS_URL: &str = "https://finnhub.io/api/v1/company-news";

/// How far back the company-news window reaches
const NEWS_WINDOW_DAYS: i64 = 7;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Finnhub news article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinnhubNewsArticle {
    /// Publish time (UNIX timestamp)
    pub datetime: i64,
    /// News headline
    pub headline: String,
    /// News source
    pub source: String,
    /// Article URL
    pub url: String,
}

/// Finnhub client for the company-news API
pub struct FinnhubClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl FinnhubClient {
    /// Create a new Finnhub client with rate limiting
    ///
    /// # Arguments
    /// * `api_key` - Finnhub API key
    /// * `rate_limit` - Requests per minute (free tier: 60, premium: 300+)
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Self {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(60).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            rate_limiter,
        }
    }

    /// Get company news for a specific symbol
    ///
    /// # Arguments
    /// * `symbol` - Stock symbol (e.g., "AAPL")
    /// * `from` - Start date (YYYY-MM-DD)
    /// * `to` - End date (YYYY-MM-DD)
    pub async fn get_company_news(
        &self,
        symbol: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<FinnhubNewsArticle>> {
        self.rate_limiter.until_ready().await;

        let url = Url::parse_with_params(
            COMPANY_NEWS_URL,
            &[
                ("symbol", symbol),
                ("from", from),
                ("to", to),
                ("token", self.api_key.as_str()),
            ],
        )
        .map_err(|e| StockError::ApiError(format!("Invalid Finnhub URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StockError::ApiError(format!("Finnhub request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::ApiError(format!(
                "Finnhub API error {status}: {body}"
            )));
        }

        response
            .json::<Vec<FinnhubNewsArticle>>()
            .await
            .map_err(|e| StockError::ApiError(format!("Failed to parse Finnhub response: {e}")))
    }
}

#[async_trait]
impl NewsProvider for FinnhubClient {
    async fn headlines(&self, query: &str, limit: usize) -> Result<Vec<NewsItem>> {
        let to = Utc::now();
        let from = to - Duration::days(NEWS_WINDOW_DAYS);

        let articles = self
            .get_company_news(
                query,
                &from.format("%Y-%m-%d").to_string(),
                &to.format("%Y-%m-%d").to_string(),
            )
            .await?;

        Ok(articles
            .into_iter()
            .take(limit)
            .map(|article| NewsItem {
                published: DateTime::from_timestamp(article.datetime, 0),
                title: article.headline,
                link: article.url,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finnhub_client_creation() {
        let client = FinnhubClient::new("test_key", 60);
        assert_eq!(client.api_key, "test_key");
    }

    #[tokio::test]
    #[ignore] // Requires network access and FINNHUB_API_KEY
    async fn test_headlines() {
        let key = std::env::var("FINNHUB_API_KEY").unwrap_or_default();
        let client = FinnhubClient::new(key, 60);
        let items = client.headlines("AAPL", 5).await.unwrap();
        assert!(items.len() <= 5);
    }
}
