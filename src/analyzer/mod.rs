// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod recommendation;
pub mod sentiment;
pub mod suitability;
pub mod technical;

pub use recommendation::RecommendationExtractor;
pub use sentiment::SentimentAnalyzer;
pub use suitability::SuitabilityScorer;
pub use technical::TechnicalAnalyzer;
