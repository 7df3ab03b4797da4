use crate::model::{FearGreedIndex, Headline, NewsArticle, Sentiment, SentimentReport, VolumeTrend};
use tracing::debug;

/// Lexicon terms are matched by plain substring containment, one hit per
/// term. Partial-word matches ("high" in "higher") are intended behavior.
const POSITIVE_TERMS: [&str; 18] = [
    "growth",
    "profit",
    "gain",
    "success",
    "strong",
    "bullish",
    "upgrade",
    "beat",
    "outperform",
    "positive",
    "surge",
    "rally",
    "breakthrough",
    "innovation",
    "record",
    "high",
    "boom",
    "rise",
];

const NEGATIVE_TERMS: [&str; 18] = [
    "loss",
    "decline",
    "fall",
    "weak",
    "bearish",
    "downgrade",
    "miss",
    "underperform",
    "negative",
    "crash",
    "drop",
    "concern",
    "risk",
    "warning",
    "low",
    "crisis",
    "debt",
    "struggle",
];

/// Per-snippet classification result.
#[derive(Debug, Clone, Copy)]
pub struct TextSentiment {
    pub sentiment: Sentiment,
    pub score: f64,
    pub positive_count: usize,
    pub negative_count: usize,
}

/// Market signals feeding the Fear/Greed composite. Absent signals leave the
/// corresponding adjustment at zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct FearGreedSignals {
    pub change_percent: Option<f64>,
    pub volume_trend: Option<VolumeTrend>,
    pub rsi: Option<f64>,
}

pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    /// Rule-based lexicon classification of a short text snippet.
    pub fn analyze_text_sentiment(text: &str) -> TextSentiment {
        let text_lower = text.to_lowercase();

        let positive_count = POSITIVE_TERMS.iter().filter(|t| text_lower.contains(**t)).count();
        let negative_count = NEGATIVE_TERMS.iter().filter(|t| text_lower.contains(**t)).count();

        let total = positive_count + negative_count;
        if total == 0 {
            return TextSentiment {
                sentiment: Sentiment::Neutral,
                score: 0.0,
                positive_count: 0,
                negative_count: 0,
            };
        }

        let score = (positive_count as f64 - negative_count as f64) / total as f64;
        let sentiment = if score > 0.2 {
            Sentiment::Positive
        } else if score < -0.2 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        TextSentiment {
            sentiment,
            score,
            positive_count,
            negative_count,
        }
    }

    /// Classifies each article's title + description and aggregates into an
    /// overall verdict. The overall class must hold a strict majority over
    /// both others; ties resolve to neutral.
    pub fn analyze_news_sentiment(symbol: &str, articles: &[NewsArticle]) -> SentimentReport {
        if articles.is_empty() {
            return SentimentReport {
                overall_sentiment: Sentiment::Neutral,
                confidence: 0.0,
                article_count: 0,
                positive_count: 0,
                negative_count: 0,
                neutral_count: 0,
                sources: Vec::new(),
                recent_headlines: Vec::new(),
                summary: "No recent news available for analysis".to_string(),
            };
        }

        debug!("Scoring {} articles for {}", articles.len(), symbol);

        let mut positive_count = 0;
        let mut negative_count = 0;
        let mut neutral_count = 0;
        let mut sources: Vec<String> = Vec::new();

        for article in articles {
            let content = format!("{} {}", article.title, article.description);
            match Self::analyze_text_sentiment(&content).sentiment {
                Sentiment::Positive => positive_count += 1,
                Sentiment::Negative => negative_count += 1,
                Sentiment::Neutral => neutral_count += 1,
            }

            if !sources.contains(&article.source) {
                sources.push(article.source.clone());
            }
        }

        let total = articles.len();
        let (overall_sentiment, confidence) =
            if positive_count > negative_count && positive_count > neutral_count {
                (Sentiment::Positive, positive_count as f64 / total as f64)
            } else if negative_count > positive_count && negative_count > neutral_count {
                (Sentiment::Negative, negative_count as f64 / total as f64)
            } else {
                (Sentiment::Neutral, neutral_count as f64 / total as f64)
            };

        let summary = format!(
            "Analyzed {} articles. {} positive, {} negative, {} neutral. Overall sentiment is {}.",
            total,
            positive_count,
            negative_count,
            neutral_count,
            match overall_sentiment {
                Sentiment::Positive => "positive",
                Sentiment::Negative => "negative",
                Sentiment::Neutral => "neutral",
            }
        );

        sources.truncate(5);
        let recent_headlines = articles
            .iter()
            .take(5)
            .map(|a| Headline {
                title: a.title.clone(),
                source: a.source.clone(),
                url: a.url.clone(),
                published_at: a.published_at.clone(),
            })
            .collect();

        SentimentReport {
            overall_sentiment,
            confidence: round2(confidence),
            article_count: total,
            positive_count,
            negative_count,
            neutral_count,
            sources,
            recent_headlines,
            summary,
        }
    }

    /// Simplified Fear/Greed composite: neutral base 50 plus clamped
    /// momentum, volume-trend and RSI adjustments, final value in [0, 100].
    pub fn calculate_fear_greed_index(signals: &FearGreedSignals) -> FearGreedIndex {
        let mut score: f64 = 50.0;

        if let Some(change) = signals.change_percent {
            score += (change * 2.0).clamp(-20.0, 20.0);
        }

        match signals.volume_trend {
            Some(VolumeTrend::Increasing) => score += 10.0,
            Some(VolumeTrend::Decreasing) => score -= 10.0,
            _ => {}
        }

        if let Some(rsi) = signals.rsi {
            if rsi > 70.0 {
                score += 15.0; // overbought reads as greed
            } else if rsi < 30.0 {
                score -= 15.0; // oversold reads as fear
            }
        }

        let score = score.clamp(0.0, 100.0);

        FearGreedIndex {
            score: round1(score),
            sentiment: fear_greed_label(score).to_string(),
            interpretation: fear_greed_interpretation(score).to_string(),
        }
    }
}

fn fear_greed_label(score: f64) -> &'static str {
    if score >= 75.0 {
        "Extreme Greed"
    } else if score >= 60.0 {
        "Greed"
    } else if score >= 45.0 {
        "Neutral"
    } else if score >= 25.0 {
        "Fear"
    } else {
        "Extreme Fear"
    }
}

fn fear_greed_interpretation(score: f64) -> &'static str {
    if score >= 75.0 {
        "Market showing extreme greed. Consider taking profits or being cautious with new positions."
    } else if score >= 60.0 {
        "Market is greedy. Good time to review positions and consider risk management."
    } else if score >= 45.0 {
        "Market sentiment is neutral. Look for opportunities based on fundamentals."
    } else if score >= 25.0 {
        "Market shows fear. Could be buying opportunity for quality stocks."
    } else {
        "Extreme fear in the market. Historically good time for long-term investors to buy."
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            description: description.to_string(),
            source: "Newswire".to_string(),
            url: String::new(),
            published_at: String::new(),
        }
    }

    #[test]
    fn positive_text_classifies_positive() {
        let result = SentimentAnalyzer::analyze_text_sentiment("strong growth and profit");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.negative_count, 0);
    }

    #[test]
    fn negative_text_classifies_negative() {
        let result = SentimentAnalyzer::analyze_text_sentiment("market crash and debt crisis");
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.score, -1.0);
        assert_eq!(result.positive_count, 0);
    }

    #[test]
    fn no_lexicon_hits_is_neutral_zero() {
        let result = SentimentAnalyzer::analyze_text_sentiment("quarterly filing published today");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn partial_word_matches_count() {
        // "higher" contains the term "high".
        let result = SentimentAnalyzer::analyze_text_sentiment("shares trade higher");
        assert_eq!(result.positive_count, 1);
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn balanced_hits_stay_neutral() {
        // One positive ("gain") and one negative ("loss") term: score 0.0.
        let result = SentimentAnalyzer::analyze_text_sentiment("gain offset by loss");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn empty_article_list_degrades_gracefully() {
        let report = SentimentAnalyzer::analyze_news_sentiment("AAPL", &[]);
        assert_eq!(report.overall_sentiment, Sentiment::Neutral);
        assert_eq!(report.confidence, 0.0);
        assert_eq!(report.article_count, 0);
        assert_eq!(report.summary, "No recent news available for analysis");
    }

    #[test]
    fn strict_majority_wins_with_fractional_confidence() {
        let articles = vec![
            article("Record profit surge", "earnings beat expectations"),
            article("Strong growth continues", "bullish rally"),
            article("Shares fall on weak outlook", "decline and loss widen"),
        ];
        let report = SentimentAnalyzer::analyze_news_sentiment("AAPL", &articles);
        assert_eq!(report.overall_sentiment, Sentiment::Positive);
        assert_eq!(report.positive_count, 2);
        assert_eq!(report.negative_count, 1);
        assert_eq!(report.confidence, 0.67);
        assert_eq!(
            report.summary,
            "Analyzed 3 articles. 2 positive, 1 negative, 0 neutral. Overall sentiment is positive."
        );
    }

    #[test]
    fn class_tie_defaults_to_neutral() {
        let articles = vec![
            article("Record profit surge", "strong gain"),
            article("Crash fears grow", "debt crisis and loss"),
        ];
        let report = SentimentAnalyzer::analyze_news_sentiment("TSLA", &articles);
        assert_eq!(report.overall_sentiment, Sentiment::Neutral);
        // Confidence is the neutral share, which is zero here.
        assert_eq!(report.confidence, 0.0);
    }

    #[test]
    fn sources_are_deduplicated_and_capped() {
        let mut articles = Vec::new();
        for i in 0..8 {
            let mut a = article("Strong growth", "profit");
            a.source = format!("Source {}", i % 6);
            articles.push(a);
        }
        let report = SentimentAnalyzer::analyze_news_sentiment("MSFT", &articles);
        assert_eq!(report.sources.len(), 5);
        assert_eq!(report.recent_headlines.len(), 5);
    }

    #[test]
    fn fear_greed_extreme_greed_case() {
        let signals = FearGreedSignals {
            change_percent: Some(10.0),
            volume_trend: Some(VolumeTrend::Increasing),
            rsi: Some(80.0),
        };
        let index = SentimentAnalyzer::calculate_fear_greed_index(&signals);
        assert_eq!(index.score, 95.0);
        assert_eq!(index.sentiment, "Extreme Greed");
        assert!(index.interpretation.contains("extreme greed"));
    }

    #[test]
    fn fear_greed_extreme_fear_clamps_at_zero() {
        let signals = FearGreedSignals {
            change_percent: Some(-30.0),
            volume_trend: Some(VolumeTrend::Decreasing),
            rsi: Some(20.0),
        };
        let index = SentimentAnalyzer::calculate_fear_greed_index(&signals);
        assert_eq!(index.score, 5.0);
        assert_eq!(index.sentiment, "Extreme Fear");
    }

    #[test]
    fn fear_greed_buckets_have_inclusive_lower_bounds() {
        // (change_percent, volume_trend) pairs chosen to land exactly on or
        // just under each bucket boundary.
        let cases: [(f64, Option<VolumeTrend>, f64, &str); 8] = [
            (7.5, Some(VolumeTrend::Increasing), 75.0, "Extreme Greed"),
            (7.0, Some(VolumeTrend::Increasing), 74.0, "Greed"),
            (5.0, None, 60.0, "Greed"),
            (4.5, None, 59.0, "Neutral"),
            (-2.5, None, 45.0, "Neutral"),
            (-3.0, None, 44.0, "Fear"),
            (-7.5, Some(VolumeTrend::Decreasing), 25.0, "Fear"),
            (-8.0, Some(VolumeTrend::Decreasing), 24.0, "Extreme Fear"),
        ];

        for (change, volume_trend, expected_score, expected_label) in cases {
            let index = SentimentAnalyzer::calculate_fear_greed_index(&FearGreedSignals {
                change_percent: Some(change),
                volume_trend,
                rsi: None,
            });
            assert_eq!(index.score, expected_score, "change {change}");
            assert_eq!(index.sentiment, expected_label, "change {change}");
        }
    }

    #[test]
    fn fear_greed_interpretation_tracks_bucket() {
        let greed = SentimentAnalyzer::calculate_fear_greed_index(&FearGreedSignals {
            change_percent: Some(5.0),
            volume_trend: None,
            rsi: None,
        });
        assert_eq!(greed.sentiment, "Greed");
        assert!(greed.interpretation.contains("Market is greedy"));

        let fear = SentimentAnalyzer::calculate_fear_greed_index(&FearGreedSignals {
            change_percent: Some(-7.5),
            volume_trend: None,
            rsi: None,
        });
        assert_eq!(fear.sentiment, "Fear");
        assert!(fear.interpretation.contains("buying opportunity"));
    }

    #[test]
    fn fear_greed_missing_signals_stay_neutral() {
        let index = SentimentAnalyzer::calculate_fear_greed_index(&FearGreedSignals::default());
        assert_eq!(index.score, 50.0);
        assert_eq!(index.sentiment, "Neutral");
    }
}
