use crate::generator::NarrativeGenerator;
use crate::model::GeneratorError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Narrative generator backed by a local Ollama instance.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaGenerator {
    pub fn new(base_url: String, model: String) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| GeneratorError::Http(e.to_string()))?;

        Ok(Self {
            base_url,
            model,
            client,
        })
    }
}

#[async_trait::async_trait]
impl NarrativeGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, GeneratorError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));

        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            system,
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GeneratorError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeneratorError::BadStatus(response.status().as_u16()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        Ok(body.response)
    }
}
