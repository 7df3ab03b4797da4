pub mod ollama;
pub mod prompt;

pub use ollama::OllamaGenerator;

use crate::model::GeneratorError;

/// Black-box narrative text provider. The analysis core makes no assumption
/// about latency, determinism or output format beyond best-effort natural
/// language.
#[async_trait::async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, GeneratorError>;
}
