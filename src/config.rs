use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct SymbolConfig {
    pub symbol: String,
    #[serde(default = "default_analysis_type")]
    pub analysis_type: String,
    #[serde(default = "default_true")]
    pub include_technical: bool,
    #[serde(default = "default_true")]
    pub include_sentiment: bool,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub ollama_url: String,
    pub ollama_model: String,
    /// Directory holding per-symbol input files ({SYMBOL}.json).
    pub data_dir: String,
    /// Directory the finished report envelopes are written to.
    pub reports_dir: String,
    pub symbols: Vec<SymbolConfig>,
}

fn default_analysis_type() -> String {
    "comprehensive".to_string()
}

fn default_true() -> bool {
    true
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
