//! Rendering of tool payloads into terminal reports

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use serde_json::Value;

/// RSI bands from the classic overbought/oversold reading
const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;
/// Bollinger position bands treated as notable
const BB_NEAR_LOWER: f64 = 20.0;
const BB_NEAR_UPPER: f64 = 80.0;

/// Render the current price block
pub fn render_price(data: &Value) -> String {
    let company = data["company"].as_str().unwrap_or("?");
    let ticker = data["ticker"].as_str().unwrap_or("?");
    let current = data["current_price"].as_f64().unwrap_or(0.0);
    let previous = data["previous_price"].as_f64().unwrap_or(0.0);
    let change = data["change_percent"].as_f64().unwrap_or(0.0);

    format!(
        "{company} ({ticker})\n  current {current:.2}   previous close {previous:.2}   change {change:+.2}%"
    )
}

/// Render the indicator table plus the derived signal checklist
pub fn render_trend(data: &Value) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Indicator", "Value"]);

    table.add_row(vec!["Current price".to_string(), number(data, "current_price")]);
    table.add_row(vec![
        format!("Period return ({})", data["period"].as_str().unwrap_or("?")),
        percent(data, "period_return"),
    ]);
    table.add_row(vec!["MA5".to_string(), number(data, "ma5")]);
    table.add_row(vec!["MA20".to_string(), number(data, "ma20")]);
    table.add_row(vec!["MA60".to_string(), number(data, "ma60")]);
    table.add_row(vec!["RSI (14)".to_string(), number(data, "rsi")]);
    table.add_row(vec!["MACD".to_string(), number(data, "macd")]);
    table.add_row(vec!["MACD signal".to_string(), number(data, "macd_signal")]);
    table.add_row(vec!["MACD histogram".to_string(), number(data, "macd_histogram")]);
    table.add_row(vec!["Bollinger position".to_string(), percent(data, "bb_position")]);
    table.add_row(vec!["Volatility (30d range)".to_string(), percent(data, "volatility")]);
    table.add_row(vec!["Volume vs 20d avg".to_string(), percent(data, "volume_ratio")]);
    table.add_row(vec!["Period high".to_string(), number(data, "highest")]);
    table.add_row(vec!["Period low".to_string(), number(data, "lowest")]);

    let mut output = format!("{table}");
    let signals = signal_lines(data);
    if !signals.is_empty() {
        output.push_str("\nSignals:\n");
        for line in signals {
            output.push_str("  - ");
            output.push_str(&line);
            output.push('\n');
        }
    }
    output
}

/// Render scored headlines and the overall sentiment verdict
pub fn render_news(data: &Value) -> String {
    let count = data["news_count"].as_u64().unwrap_or(0);
    if count == 0 {
        return "No recent headlines found.".to_string();
    }

    let overall = &data["overall_sentiment"];
    let mut output = format!(
        "Overall sentiment: {} (avg {:+.1}; {} positive / {} negative / {} neutral)\n",
        overall["label"].as_str().unwrap_or("neutral"),
        overall["score"].as_f64().unwrap_or(0.0),
        overall["positive_count"].as_u64().unwrap_or(0),
        overall["negative_count"].as_u64().unwrap_or(0),
        overall["neutral_count"].as_u64().unwrap_or(0),
    );

    if let Some(items) = data["news"].as_array() {
        for item in items {
            let score = item["sentiment_score"].as_i64().unwrap_or(0);
            let label = item["sentiment_label"].as_str().unwrap_or("neutral");
            let title = item["title"].as_str().unwrap_or("");
            output.push_str(&format!("  [{score:+4} {label}] {title}\n"));
        }
    }
    output
}

/// Human-readable buy/sell observations derived from the snapshot
fn signal_lines(data: &Value) -> Vec<String> {
    let mut lines = Vec::new();

    match data["cross_signal"].as_str() {
        Some("golden_cross") => {
            lines.push("Golden cross: MA5 broke above MA20 (bullish)".to_string());
        }
        Some("dead_cross") => {
            lines.push("Dead cross: MA5 broke below MA20 (bearish)".to_string());
        }
        _ => {}
    }

    if let Some(rsi) = data["rsi"].as_f64() {
        if rsi > RSI_OVERBOUGHT {
            lines.push(format!("RSI {rsi:.1}: overbought - potential sell signal"));
        } else if rsi < RSI_OVERSOLD {
            lines.push(format!("RSI {rsi:.1}: oversold - potential buy signal"));
        }
    }

    if let (Some(macd), Some(signal)) =
        (data["macd"].as_f64(), data["macd_signal"].as_f64())
    {
        if macd > signal {
            lines.push("MACD above its signal line (upward momentum)".to_string());
        } else if macd < signal {
            lines.push("MACD below its signal line (downward momentum)".to_string());
        }
    }

    if let Some(position) = data["bb_position"].as_f64() {
        if position <= BB_NEAR_LOWER {
            lines.push(format!(
                "Price near the lower Bollinger band ({position:.0}%)"
            ));
        } else if position >= BB_NEAR_UPPER {
            lines.push(format!(
                "Price near the upper Bollinger band ({position:.0}%)"
            ));
        }
    }

    if let (Some(price), Some(ma20)) =
        (data["current_price"].as_f64(), data["ma20"].as_f64())
    {
        if price > ma20 {
            lines.push("Price above MA20 (uptrend)".to_string());
        } else if price < ma20 {
            lines.push("Price below MA20 (downtrend)".to_string());
        }
    }

    lines
}

/// Format a numeric field, "—" when the window was too short
fn number(data: &Value, key: &str) -> String {
    data[key]
        .as_f64()
        .map_or_else(|| "—".to_string(), |v| format!("{v:.2}"))
}

/// Format a percent field, "—" when absent
fn percent(data: &Value, key: &str) -> String {
    data[key]
        .as_f64()
        .map_or_else(|| "—".to_string(), |v| format!("{v:.2}%"))
}
