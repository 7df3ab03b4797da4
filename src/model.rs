// Core structs shared across the analysis pipeline.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// MACD triple. The signal line is a 0.9 * MACD approximation rather than a
/// 9-period EMA of the MACD series; downstream consumers rely on that shape.
#[derive(Debug, Clone, Serialize)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

/// Technical indicator bundle. Every field except `volume_trend` is absent
/// when the price history is shorter than the indicator's minimum window.
#[derive(Debug, Clone, Serialize)]
pub struct TechnicalIndicators {
    pub rsi: Option<f64>,
    pub macd: Option<Macd>,
    pub moving_averages: Option<HashMap<String, f64>>,
    pub bollinger_bands: Option<BollingerBands>,
    pub volume_trend: VolumeTrend,
}

/// News article as delivered by the news provider. Only title, description
/// and source name feed the sentiment scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub published_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize)]
pub struct Headline {
    pub title: String,
    pub source: String,
    pub url: String,
    pub published_at: String,
}

/// Aggregated news sentiment. Confidence is the share of articles agreeing
/// with the majority class, 0.0 when no articles were supplied.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    pub overall_sentiment: Sentiment,
    pub confidence: f64,
    pub article_count: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub sources: Vec<String>,
    pub recent_headlines: Vec<Headline>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FearGreedIndex {
    pub score: f64,
    pub sentiment: String,
    pub interpretation: String,
}

/// Fundamental metrics for one symbol. Every field is optional; a missing
/// field contributes zero to any scoring rule that reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalSnapshot {
    pub price: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub book_value: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub profit_margin: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub beta: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub analyst_target: Option<f64>,
}

/// Full analysis for one stock, assembled from the indicator, sentiment,
/// suitability and recommendation components.
#[derive(Debug, Clone, Serialize)]
pub struct StockAnalysis {
    pub stock_symbol: String,
    pub analysis_type: String,
    pub summary: String,
    pub recommendation: String,
    pub confidence_score: f64,
    pub key_points: Vec<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    pub technical_indicators: Option<TechnicalIndicators>,
    pub sentiment: Option<SentimentReport>,
    pub timestamp: DateTime<Utc>,
}

/// Success/error envelope around a [`StockAnalysis`]. `success == false`
/// implies `data` is absent and `error` is populated; the processing time is
/// reported either way.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub data: Option<StockAnalysis>,
    pub error: Option<String>,
    pub processing_time: f64,
}

/// Raw per-symbol inputs handed to the pipeline by the data layer.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisInput {
    pub prices: Vec<f64>,
    pub volumes: Vec<u64>,
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
    #[serde(default)]
    pub fundamentals: FundamentalSnapshot,
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generation request failed: {0}")]
    Http(String),
    #[error("generation backend returned status {0}")]
    BadStatus(u16),
    #[error("invalid generation response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse input file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("narrative generation failed: {0}")]
    Generator(#[from] GeneratorError),
}
