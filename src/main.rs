mod analyzer;
mod config;
mod generator;
mod model;
mod report;

use analyzer::sentiment::FearGreedSignals;
use analyzer::{SentimentAnalyzer, TechnicalAnalyzer};
use config::{load_config, AppConfig, SymbolConfig};
use generator::{NarrativeGenerator, OllamaGenerator};
use model::{AnalysisInput, AnalysisResponse, InputError};
use report::AnalysisRequest;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use futures::future::join_all;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file
    let config: Arc<AppConfig> = match load_config("config.json") {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let generator = match OllamaGenerator::new(config.ollama_url.clone(), config.ollama_model.clone())
    {
        Ok(g) => Arc::new(g),
        Err(e) => {
            error!("Failed to initialize narrative generator: {}", e);
            return;
        }
    };

    info!("stockpulse started, symbols to analyze: {}", config.symbols.len());

    // Every symbol's pipeline is independent; run them concurrently.
    let tasks: Vec<_> = config
        .symbols
        .iter()
        .map(|symbol_cfg| process_symbol(symbol_cfg, &config, generator.as_ref()))
        .collect();
    join_all(tasks).await;

    info!("All symbols processed.");
}

/// Runs the full analysis pipeline for a single configured symbol and writes
/// the report envelope to disk.
async fn process_symbol(
    symbol_cfg: &SymbolConfig,
    config: &AppConfig,
    generator: &dyn NarrativeGenerator,
) {
    info!("Processing symbol: {}", symbol_cfg.symbol);
    let started = Instant::now();

    // A failed input load still produces a structured error report.
    let input = match load_input(&config.data_dir, &symbol_cfg.symbol) {
        Ok(input) => input,
        Err(e) => {
            warn!("Input load error for {}: {}", symbol_cfg.symbol, e);
            let response = report::failed_report(e, started);
            save_report(&config.reports_dir, &symbol_cfg.symbol, &response);
            return;
        }
    };

    // Standalone Fear/Greed reading, logged alongside the report.
    let indicators = TechnicalAnalyzer::get_comprehensive_analysis(&input.prices, &input.volumes);
    let fear_greed = SentimentAnalyzer::calculate_fear_greed_index(&FearGreedSignals {
        change_percent: input.fundamentals.change_percent,
        volume_trend: Some(indicators.volume_trend),
        rsi: indicators.rsi,
    });
    info!(
        "{}: Fear/Greed {} ({}). {}",
        symbol_cfg.symbol, fear_greed.score, fear_greed.sentiment, fear_greed.interpretation
    );

    let request = AnalysisRequest {
        symbol: symbol_cfg.symbol.clone(),
        analysis_type: symbol_cfg.analysis_type.clone(),
        include_technical: symbol_cfg.include_technical,
        include_sentiment: symbol_cfg.include_sentiment,
    };

    let response = report::build_report(generator, &request, &input).await;

    match &response.data {
        Some(analysis) => info!(
            "{}: {} (confidence {:.0}%), {} key points, took {:.2}s",
            symbol_cfg.symbol,
            analysis.recommendation,
            analysis.confidence_score * 100.0,
            analysis.key_points.len(),
            response.processing_time
        ),
        None => warn!(
            "{}: analysis failed after {:.2}s: {}",
            symbol_cfg.symbol,
            response.processing_time,
            response.error.as_deref().unwrap_or("unknown error")
        ),
    }

    save_report(&config.reports_dir, &symbol_cfg.symbol, &response);
}

/// Loads the per-symbol input bundle (prices, volumes, articles,
/// fundamentals) from the data directory.
fn load_input(data_dir: &str, symbol: &str) -> Result<AnalysisInput, InputError> {
    let path = Path::new(data_dir).join(format!("{symbol}.json"));
    let content = fs::read_to_string(path)?;
    let input = serde_json::from_str(&content)?;
    Ok(input)
}

/// Writes the report envelope as pretty JSON for downstream consumers.
fn save_report(reports_dir: &str, symbol: &str, response: &AnalysisResponse) {
    let folder = Path::new(reports_dir);
    if let Err(e) = fs::create_dir_all(folder) {
        warn!("Failed to create reports folder: {}", e);
        return;
    }
    let filename = folder.join(format!("{symbol}.json"));
    match serde_json::to_string_pretty(response) {
        Ok(json) => {
            if let Err(e) = fs::write(&filename, json) {
                warn!("Failed to write report: {}", e);
            } else {
                info!("Saved report: {}", filename.display());
            }
        }
        Err(e) => warn!("Failed to serialize report: {}", e),
    }
}
