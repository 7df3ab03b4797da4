use crate::analyzer::suitability::InvestmentScores;
use crate::model::{FundamentalSnapshot, TechnicalIndicators};

/// Discrete recommendation extracted from a generated narrative, together
/// with the derived confidence and itemized report sections.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub label: &'static str,
    pub confidence: f64,
    pub summary: String,
    pub key_points: Vec<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

pub struct RecommendationExtractor;

impl RecommendationExtractor {
    /// Deterministic phrase rules over the narrative plus the numeric inputs.
    /// The narrative is matched lowercased; the summary keeps original case.
    pub fn extract(
        narrative: &str,
        fundamentals: &FundamentalSnapshot,
        indicators: Option<&TechnicalIndicators>,
        scores: &InvestmentScores,
    ) -> Recommendation {
        let lower = narrative.to_lowercase();
        let rsi = indicators.and_then(|i| i.rsi);

        Recommendation {
            label: Self::extract_label(&lower),
            confidence: Self::derive_confidence(fundamentals, rsi),
            summary: narrative.chars().take(500).collect(),
            key_points: Self::build_key_points(fundamentals, rsi, scores),
            risks: Self::build_risks(&lower, fundamentals, rsi),
            opportunities: Self::build_opportunities(fundamentals, rsi),
        }
    }

    /// Phrase precedence: Strong Buy, Buy, Strong Sell/Sell, Hold.
    fn extract_label(lower: &str) -> &'static str {
        if lower.contains("strong buy") || lower.contains("buy recommendation") {
            "Strong Buy"
        } else if lower.contains("buy")
            && !lower.contains("don't buy")
            && !lower.contains("not a buy")
        {
            "Buy"
        } else if lower.contains("sell") && !lower.contains("don't sell") {
            if lower.contains("strong sell") {
                "Strong Sell"
            } else {
                "Sell"
            }
        } else {
            "Hold"
        }
    }

    /// Base 0.5 plus non-negative bonuses, capped at 1.0.
    fn derive_confidence(f: &FundamentalSnapshot, rsi: Option<f64>) -> f64 {
        let mut confidence: f64 = 0.5;

        if let Some(rsi) = rsi {
            if (30.0..=70.0).contains(&rsi) {
                confidence += 0.2;
            }
        }
        let pe = num(f.pe_ratio);
        if pe > 0.0 && pe < 30.0 {
            confidence += 0.1;
        }
        if num(f.debt_to_equity) < 1.0 {
            confidence += 0.1;
        }
        if num(f.profit_margin) > 0.1 {
            confidence += 0.1;
        }

        confidence.min(1.0)
    }

    fn build_key_points(
        f: &FundamentalSnapshot,
        rsi: Option<f64>,
        scores: &InvestmentScores,
    ) -> Vec<String> {
        let mut points = Vec::new();

        points.push(format!(
            "Current price: ${:.2} ({:+.2}%)",
            num(f.price),
            num(f.change_percent)
        ));
        points.push(format!("Market cap: ${:.1}B", num(f.market_cap) / 1e9));
        points.push(match f.pe_ratio {
            Some(pe) => format!("P/E ratio: {:.1}", pe),
            None => "P/E ratio: N/A".to_string(),
        });

        if let Some(dividend_yield) = f.dividend_yield {
            if dividend_yield > 0.0 {
                points.push(format!("Dividend yield: {:.2}%", dividend_yield * 100.0));
            }
        }
        if let Some(growth) = f.revenue_growth {
            points.push(format!("Revenue growth: {:.1}%", growth * 100.0));
        }
        if let Some(rsi) = rsi {
            points.push(format!("RSI: {:.1} ({})", rsi, rsi_signal(rsi)));
        }
        if let Some(target) = f.analyst_target {
            let price = num(f.price);
            if price > 0.0 {
                let upside = (target - price) / price * 100.0;
                points.push(format!("Analyst target: ${:.2} ({:+.1}% upside)", target, upside));
            }
        }

        if let Some((style, score)) = scores.best_fit() {
            if score > 50.0 {
                points.push(format!("Best suited for: {} ({:.0}/100)", style, score));
            }
        }

        points
    }

    fn build_risks(lower: &str, f: &FundamentalSnapshot, rsi: Option<f64>) -> Vec<String> {
        let mut risks = Vec::new();

        let debt_to_equity = num(f.debt_to_equity);
        if debt_to_equity > 2.0 {
            risks.push(format!("High debt-to-equity ratio ({:.2})", debt_to_equity));
        }
        if num(f.payout_ratio) > 0.8 {
            risks.push("Dividend payout ratio above 80% may be unsustainable".to_string());
        }
        if matches!(rsi, Some(r) if r > 70.0) {
            risks.push("RSI signals overbought conditions".to_string());
        }
        if let (Some(price), Some(high)) = (f.price, f.fifty_two_week_high) {
            if high > 0.0 && price >= high * 0.95 {
                risks.push("Trading within 5% of 52-week high".to_string());
            }
        }
        if lower.contains("risk") || lower.contains("concern") {
            risks.push("AI analysis identified potential risks".to_string());
        }

        risks
    }

    fn build_opportunities(f: &FundamentalSnapshot, rsi: Option<f64>) -> Vec<String> {
        let mut opportunities = Vec::new();

        let revenue_growth = num(f.revenue_growth);
        if revenue_growth > 0.15 {
            opportunities.push(format!(
                "Strong revenue growth of {:.1}%",
                revenue_growth * 100.0
            ));
        }
        if num(f.dividend_yield) > 0.03 && num(f.payout_ratio) < 0.6 {
            opportunities.push("Sustainable dividend with a conservative payout ratio".to_string());
        }
        if matches!(rsi, Some(r) if r < 30.0) {
            opportunities.push("Oversold RSI may offer an entry point".to_string());
        }
        // Dimensionally odd on purpose: the reference compares P/E against
        // PEG directly.
        let peg = num(f.peg_ratio);
        if peg > 0.0 && num(f.pe_ratio) < peg {
            opportunities.push("P/E below PEG suggests an attractive valuation".to_string());
        }
        if let (Some(price), Some(target)) = (f.price, f.analyst_target) {
            if price > 0.0 && price < target {
                let upside = (target - price) / price * 100.0;
                opportunities.push(format!("Trading {:.1}% below analyst target", upside));
            }
        }

        opportunities
    }
}

fn rsi_signal(rsi: f64) -> &'static str {
    if rsi < 30.0 {
        "Oversold"
    } else if rsi > 70.0 {
        "Overbought"
    } else {
        "Neutral"
    }
}

fn num(field: Option<f64>) -> f64 {
    field.unwrap_or(0.0)
}
