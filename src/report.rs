use crate::analyzer::{
    RecommendationExtractor, SentimentAnalyzer, SuitabilityScorer, TechnicalAnalyzer,
};
use crate::generator::prompt::{ANALYST_SYSTEM_PROMPT, build_stock_prompt};
use crate::generator::NarrativeGenerator;
use crate::model::{
    AnalysisError, AnalysisInput, AnalysisResponse, StockAnalysis, TechnicalIndicators, VolumeTrend,
};
use chrono::Utc;
use std::time::Instant;

/// Per-symbol analysis request parameters.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub analysis_type: String,
    pub include_technical: bool,
    pub include_sentiment: bool,
}

impl AnalysisRequest {
    pub fn comprehensive(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            analysis_type: "comprehensive".to_string(),
            include_technical: true,
            include_sentiment: true,
        }
    }
}

/// Runs the full pipeline for one symbol and wraps the outcome in the
/// success/error envelope. Any fault surfaces as `success == false` with a
/// stringified error; the elapsed time is reported either way. No retries,
/// no partial-result merging.
pub async fn build_report(
    generator: &dyn NarrativeGenerator,
    request: &AnalysisRequest,
    input: &AnalysisInput,
) -> AnalysisResponse {
    let started = Instant::now();

    match run_pipeline(generator, request, input).await {
        Ok(analysis) => AnalysisResponse {
            success: true,
            data: Some(analysis),
            error: None,
            processing_time: started.elapsed().as_secs_f64(),
        },
        Err(e) => failed_report(e, started),
    }
}

/// Envelope for a request that failed before or during the pipeline, for
/// example when the input bundle never arrived. The elapsed time since
/// `started` is reported alongside the stringified error.
pub fn failed_report(error: impl std::fmt::Display, started: Instant) -> AnalysisResponse {
    AnalysisResponse {
        success: false,
        data: None,
        error: Some(error.to_string()),
        processing_time: started.elapsed().as_secs_f64(),
    }
}

async fn run_pipeline(
    generator: &dyn NarrativeGenerator,
    request: &AnalysisRequest,
    input: &AnalysisInput,
) -> Result<StockAnalysis, AnalysisError> {
    let technical = request
        .include_technical
        .then(|| TechnicalAnalyzer::get_comprehensive_analysis(&input.prices, &input.volumes));

    let sentiment = request
        .include_sentiment
        .then(|| SentimentAnalyzer::analyze_news_sentiment(&request.symbol, &input.articles));

    // With the technical section disabled the scorer sees only neutral
    // signals, never fabricated ones.
    let neutral = neutral_indicators();
    let scoring_view = technical.as_ref().unwrap_or(&neutral);
    let scores = SuitabilityScorer::score_styles(&input.fundamentals, scoring_view);

    let prompt = build_stock_prompt(&request.symbol, &input.fundamentals, technical.as_ref());
    let narrative = generator.generate(&prompt, Some(ANALYST_SYSTEM_PROMPT)).await?;

    let recommendation = RecommendationExtractor::extract(
        &narrative,
        &input.fundamentals,
        technical.as_ref(),
        &scores,
    );

    Ok(StockAnalysis {
        stock_symbol: request.symbol.clone(),
        analysis_type: request.analysis_type.clone(),
        summary: recommendation.summary,
        recommendation: recommendation.label.to_string(),
        confidence_score: recommendation.confidence,
        key_points: recommendation.key_points,
        risks: recommendation.risks,
        opportunities: recommendation.opportunities,
        technical_indicators: technical,
        sentiment,
        timestamp: Utc::now(),
    })
}

fn neutral_indicators() -> TechnicalIndicators {
    TechnicalIndicators {
        rsi: None,
        macd: None,
        moving_averages: None,
        bollinger_bands: None,
        volume_trend: VolumeTrend::InsufficientData,
    }
}
