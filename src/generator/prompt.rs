use crate::model::{FundamentalSnapshot, TechnicalIndicators};

pub const ANALYST_SYSTEM_PROMPT: &str = "You are a professional financial analyst with expertise in stock market analysis.\n\
Provide clear, concise, and actionable insights based on the data provided.\n\
Focus on key metrics, trends, and potential risks/opportunities.";

/// Builds the stock-analysis prompt handed to the narrative generator.
pub fn build_stock_prompt(
    symbol: &str,
    fundamentals: &FundamentalSnapshot,
    indicators: Option<&TechnicalIndicators>,
) -> String {
    let indicators_json = indicators
        .and_then(|i| serde_json::to_string_pretty(i).ok())
        .unwrap_or_else(|| "{}".to_string());

    format!(
        "Analyze the following stock: {symbol}\n\n\
Current Data:\n\
- Price: ${}\n\
- Change: {}%\n\
- Volume: {}\n\
- Market Cap: ${}\n\n\
Technical Indicators:\n\
{indicators_json}\n\n\
Please provide:\n\
1. Overall assessment (2-3 sentences)\n\
2. Key strengths (bullet points)\n\
3. Key risks (bullet points)\n\
4. Recommendation (Buy/Hold/Sell with reasoning)\n\n\
Keep your response concise and actionable.",
        fmt_opt(fundamentals.price),
        fmt_opt(fundamentals.change_percent),
        fmt_opt(fundamentals.volume),
        fmt_opt(fundamentals.market_cap),
    )
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => "N/A".to_string(),
    }
}
