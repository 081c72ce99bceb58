//! Configuration for stock analysis operations

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::LookbackRange;
use crate::error::{Result, StockError};
use crate::sentiment::DEFAULT_AGGREGATE_CAP;

/// Configuration for stock analysis operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Lookback window used when a request does not specify one
    pub default_range: LookbackRange,

    /// Cache TTL for price data
    pub cache_ttl_realtime: Duration,

    /// Cache TTL for news data
    pub cache_ttl_news: Duration,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Number of headlines scored and aggregated per news request
    pub news_limit: usize,

    /// Finnhub API key (optional)
    pub finnhub_api_key: Option<String>,

    /// Finnhub requests per minute
    pub finnhub_rate_limit: u32,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            default_range: LookbackRange::ThreeMonths,
            cache_ttl_realtime: Duration::from_secs(60), // 1 minute
            cache_ttl_news: Duration::from_secs(300),    // 5 minutes
            request_timeout: Duration::from_secs(30),
            news_limit: DEFAULT_AGGREGATE_CAP,
            finnhub_api_key: None,
            finnhub_rate_limit: 60, // free tier
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Load the Finnhub API key from the environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var("FINNHUB_API_KEY") {
            self.finnhub_api_key = Some(key);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.news_limit == 0 {
            return Err(StockError::ConfigError(
                "news_limit must be greater than 0".to_string(),
            ));
        }

        if self.finnhub_rate_limit == 0 {
            return Err(StockError::ConfigError(
                "finnhub_rate_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    default_range: Option<LookbackRange>,
    cache_ttl_realtime: Option<Duration>,
    cache_ttl_news: Option<Duration>,
    request_timeout: Option<Duration>,
    news_limit: Option<usize>,
    finnhub_api_key: Option<String>,
    finnhub_rate_limit: Option<u32>,
}

impl StockConfigBuilder {
    /// Set the default lookback range
    pub fn default_range(mut self, range: LookbackRange) -> Self {
        self.default_range = Some(range);
        self
    }

    /// Set cache TTL for price data
    pub fn cache_ttl_realtime(mut self, duration: Duration) -> Self {
        self.cache_ttl_realtime = Some(duration);
        self
    }

    /// Set cache TTL for news data
    pub fn cache_ttl_news(mut self, duration: Duration) -> Self {
        self.cache_ttl_news = Some(duration);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the number of headlines scored per news request
    pub fn news_limit(mut self, limit: usize) -> Self {
        self.news_limit = Some(limit);
        self
    }

    /// Set the Finnhub API key
    pub fn finnhub_api_key(mut self, key: impl Into<String>) -> Self {
        self.finnhub_api_key = Some(key.into());
        self
    }

    /// Set the Finnhub request rate limit
    pub fn finnhub_rate_limit(mut self, per_minute: u32) -> Self {
        self.finnhub_rate_limit = Some(per_minute);
        self
    }

    /// Load the Finnhub API key from the environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var("FINNHUB_API_KEY") {
            self.finnhub_api_key = Some(key);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            default_range: self.default_range.unwrap_or(defaults.default_range),
            cache_ttl_realtime: self
                .cache_ttl_realtime
                .unwrap_or(defaults.cache_ttl_realtime),
            cache_ttl_news: self.cache_ttl_news.unwrap_or(defaults.cache_ttl_news),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
            finnhub_api_key: self.finnhub_api_key,
            finnhub_rate_limit: self
                .finnhub_rate_limit
                .unwrap_or(defaults.finnhub_rate_limit),
        };

        config.validate()?;
        Ok(config)
    }
}
