use crate::model::{FundamentalSnapshot, TechnicalIndicators, VolumeTrend};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The seven supported investment styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStyle {
    DividendIncome,
    DividendGrowth,
    DayTrading,
    OptionsTrading,
    LongTermGrowth,
    ValueInvesting,
    SwingTrading,
}

impl InvestmentStyle {
    pub const ALL: [InvestmentStyle; 7] = [
        InvestmentStyle::DividendIncome,
        InvestmentStyle::DividendGrowth,
        InvestmentStyle::DayTrading,
        InvestmentStyle::OptionsTrading,
        InvestmentStyle::LongTermGrowth,
        InvestmentStyle::ValueInvesting,
        InvestmentStyle::SwingTrading,
    ];
}

impl fmt::Display for InvestmentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvestmentStyle::DividendIncome => "Dividend Income",
            InvestmentStyle::DividendGrowth => "Dividend Growth",
            InvestmentStyle::DayTrading => "Day Trading",
            InvestmentStyle::OptionsTrading => "Options Trading",
            InvestmentStyle::LongTermGrowth => "Long-term Growth",
            InvestmentStyle::ValueInvesting => "Value Investing",
            InvestmentStyle::SwingTrading => "Swing Trading",
        };
        f.write_str(label)
    }
}

/// Per-style suitability scores. Sums of the additive rules are deliberately
/// left unclamped.
#[derive(Debug, Clone, Serialize)]
pub struct InvestmentScores(pub BTreeMap<InvestmentStyle, f64>);

impl InvestmentScores {
    pub fn get(&self, style: InvestmentStyle) -> f64 {
        self.0.get(&style).copied().unwrap_or(0.0)
    }

    /// Arg-max over the score mapping. The first style encountered wins on
    /// exactly equal scores.
    pub fn best_fit(&self) -> Option<(InvestmentStyle, f64)> {
        let mut best: Option<(InvestmentStyle, f64)> = None;
        for (&style, &score) in &self.0 {
            match best {
                Some((_, current)) if score <= current => {}
                _ => best = Some((style, score)),
            }
        }
        best
    }
}

pub struct SuitabilityScorer;

impl SuitabilityScorer {
    /// Scores every style independently from the snapshot and the technical
    /// indicators. Missing fundamentals contribute 0.0 to each rule.
    pub fn score_styles(
        fundamentals: &FundamentalSnapshot,
        indicators: &TechnicalIndicators,
    ) -> InvestmentScores {
        let mut scores = BTreeMap::new();
        scores.insert(
            InvestmentStyle::DividendIncome,
            Self::score_dividend_income(fundamentals),
        );
        scores.insert(
            InvestmentStyle::DividendGrowth,
            Self::score_dividend_growth(fundamentals),
        );
        scores.insert(
            InvestmentStyle::DayTrading,
            Self::score_day_trading(fundamentals, indicators),
        );
        scores.insert(
            InvestmentStyle::OptionsTrading,
            Self::score_options_trading(fundamentals),
        );
        scores.insert(
            InvestmentStyle::LongTermGrowth,
            Self::score_long_term_growth(fundamentals),
        );
        scores.insert(
            InvestmentStyle::ValueInvesting,
            Self::score_value_investing(fundamentals),
        );
        // Swing trading is a known inert strategy: listed, never scored.
        scores.insert(InvestmentStyle::SwingTrading, 0.0);

        InvestmentScores(scores)
    }

    fn score_dividend_income(f: &FundamentalSnapshot) -> f64 {
        let mut score = 0.0;

        let dividend_yield = num(f.dividend_yield);
        score += (dividend_yield * 1000.0).min(40.0);

        let payout = num(f.payout_ratio);
        if payout > 0.0 && payout < 0.7 {
            score += 20.0;
        }
        if num(f.debt_to_equity) < 1.0 {
            score += 20.0;
        }
        if num(f.profit_margin) > 0.1 {
            score += 20.0;
        }

        score
    }

    fn score_dividend_growth(f: &FundamentalSnapshot) -> f64 {
        let mut score = 0.0;

        if num(f.dividend_yield) > 0.01 {
            score += 20.0;
        }
        if num(f.earnings_growth) > 0.0 {
            score += 30.0;
        }
        if num(f.revenue_growth) > 0.0 {
            score += 20.0;
        }
        if num(f.payout_ratio) < 0.6 {
            score += 30.0;
        }

        score
    }

    fn score_day_trading(f: &FundamentalSnapshot, indicators: &TechnicalIndicators) -> f64 {
        let mut score = 0.0;

        if let Some(rsi) = indicators.rsi {
            if rsi > 30.0 && rsi < 70.0 {
                score += 30.0;
            }
        }
        if indicators.volume_trend == VolumeTrend::Increasing {
            score += 30.0;
        }
        score += (num(f.change_percent).abs() * 10.0).min(40.0);

        score
    }

    fn score_options_trading(f: &FundamentalSnapshot) -> f64 {
        let mut score = 0.0;

        if num(f.beta) > 1.0 {
            score += 30.0;
        }
        if num(f.volume) > 1_000_000.0 {
            score += 40.0;
        }
        if num(f.change_percent).abs() > 2.0 {
            score += 30.0;
        }

        score
    }

    fn score_long_term_growth(f: &FundamentalSnapshot) -> f64 {
        let mut score = 0.0;

        if num(f.revenue_growth) > 0.10 {
            score += 30.0;
        }
        if num(f.earnings_growth) > 0.10 {
            score += 30.0;
        }
        if num(f.return_on_equity) > 0.15 {
            score += 20.0;
        }
        if num(f.debt_to_equity) < 1.0 {
            score += 20.0;
        }

        score
    }

    fn score_value_investing(f: &FundamentalSnapshot) -> f64 {
        let mut score = 0.0;

        let pe = num(f.pe_ratio);
        if pe > 0.0 && pe < 20.0 {
            score += 30.0;
        }
        if num(f.price_to_book) < 2.0 {
            score += 30.0;
        }
        if num(f.price) < num(f.book_value) {
            score += 20.0;
        }
        if num(f.dividend_yield) > 0.02 {
            score += 20.0;
        }

        score
    }
}

/// Missing fundamentals read as 0.0, matching the neutral-default policy.
fn num(field: Option<f64>) -> f64 {
    field.unwrap_or(0.0)
}
