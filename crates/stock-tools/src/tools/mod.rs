//! Stock analysis tools

pub mod news;
pub mod price;
pub mod trend;

pub use news::NewsSentimentTool;
pub use price::StockPriceTool;
pub use trend::TrendAnalysisTool;

/// Round to two decimals for display payloads.
/// Analysis values stay unrounded until they reach a tool response.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal (aggregate sentiment scores)
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
