//! Interactive stock analysis CLI
//!
//! Runs the three analysis tools (price, trend, news sentiment) for a
//! company and renders a combined report. With a company argument it runs
//! once; without one it drops into a read-loop.
//!
//! # Usage
//!
//! ```bash
//! # One-shot analysis
//! cargo run -p stock-cli -- "Amazon" --range 6mo
//!
//! # Interactive mode (optional news sentiment needs a key)
//! export FINNHUB_API_KEY="..."
//! cargo run -p stock-cli
//! ```

mod report;

use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;
use serde_json::{Value, json};
use tracing::info;

use stock_core::api::{
    FinnhubClient, LookbackRange, NewsProvider, PriceHistoryProvider, YahooFinanceClient,
};
use stock_core::cache::CacheManager;
use stock_core::config::StockConfig;
use stock_core::error::StockError;
use stock_tools::{NewsSentimentTool, StockPriceTool, ToolRegistry, TrendAnalysisTool};

#[derive(Parser, Debug)]
#[command(name = "stock-cli")]
#[command(about = "Stock analysis toolkit: price, trend, and news sentiment", long_about = None)]
struct Args {
    /// Company name or ticker to analyze once (omit to start the read-loop)
    company: Option<String>,

    /// Lookback window for trend analysis
    #[arg(short, long, default_value = "3mo")]
    range: String,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,stock_core=info".to_string()),
        )
        .init();
}

fn print_banner() {
    println!(
        r"
=== Stock Analysis Toolkit ===
Enter a company name or ticker (e.g. Amazon, 아마존, 삼성전자, 005930).
Type 'quit' or 'exit' to leave.
"
    );
}

/// Wire providers, caches, and tools into a registry
fn build_registry(config: &Arc<StockConfig>) -> ToolRegistry {
    let caches = CacheManager::new(config.cache_ttl_realtime, config.cache_ttl_news);

    let price_provider: Arc<dyn PriceHistoryProvider> = Arc::new(YahooFinanceClient::new());
    let news_provider: Arc<dyn NewsProvider> = Arc::new(FinnhubClient::new(
        config.finnhub_api_key.clone().unwrap_or_default(),
        config.finnhub_rate_limit,
    ));

    let registry = ToolRegistry::new();
    registry.register(Arc::new(StockPriceTool::new(
        Arc::clone(&price_provider),
        Arc::clone(config),
        caches.realtime.clone(),
    )));
    registry.register(Arc::new(TrendAnalysisTool::new(
        price_provider,
        Arc::clone(config),
        caches.realtime.clone(),
    )));
    registry.register(Arc::new(NewsSentimentTool::new(
        news_provider,
        Arc::clone(config),
        caches.news.clone(),
    )));
    registry
}

async fn call_tool(
    registry: &ToolRegistry,
    name: &str,
    params: Value,
) -> stock_core::Result<Value> {
    let tool = registry
        .get(name)
        .ok_or_else(|| StockError::Other(format!("unknown tool: {name}")))?;
    tool.execute(params).await
}

/// Run all three tools for one company and print the combined report.
/// A failing section is reported and the others still print.
async fn run_analysis(registry: &ToolRegistry, company: &str, range: LookbackRange) {
    info!("Analyzing {company}");

    let (price, trend, news) = tokio::join!(
        call_tool(registry, "stock_price", json!({ "company": company })),
        call_tool(
            registry,
            "trend_analysis",
            json!({ "company": company, "range": range.as_str() })
        ),
        call_tool(registry, "news_sentiment", json!({ "company": company })),
    );

    match price {
        Ok(data) => println!("\n{}\n", report::render_price(&data)),
        Err(e) => eprintln!("\n❌ Price lookup failed: {e}\n"),
    }
    match trend {
        Ok(data) => println!("{}", report::render_trend(&data)),
        Err(e) => eprintln!("❌ Trend analysis failed: {e}"),
    }
    match news {
        Ok(data) => println!("\n{}", report::render_news(&data)),
        Err(e) => eprintln!("\n❌ News sentiment failed: {e}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let range: LookbackRange = args.range.parse()?;

    let config = Arc::new(
        StockConfig::builder()
            .default_range(range)
            .with_env_api_key()
            .build()?,
    );

    if config.finnhub_api_key.is_none() {
        eprintln!("Warning: FINNHUB_API_KEY not set; news sentiment will be unavailable");
    }

    let registry = build_registry(&config);

    // One-shot mode
    if let Some(company) = args.company {
        run_analysis(&registry, &company, range).await;
        return Ok(());
    }

    print_banner();

    // Read-loop
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("company> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit") {
            println!("Goodbye!");
            break;
        }

        run_analysis(&registry, input, range).await;
    }

    Ok(())
}
