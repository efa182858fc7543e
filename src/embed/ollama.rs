//! Embeddings served by a local Ollama runtime.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{check_batch, l2_normalize, Embedder};
use crate::error::{Error, Result};

/// Default Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default embedding model.
pub const DEFAULT_MODEL: &str = "all-minilm";

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Embedder calling Ollama's `/api/embed` endpoint.
///
/// The whole batch goes out in one request; vectors are L2-normalized on
/// receipt.
pub struct OllamaEmbedder {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

impl OllamaEmbedder {
    /// Create an embedder for the given endpoint and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, model, Duration::from_secs(120))
    }

    /// Create an embedder with an explicit request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Embedding(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// Model identifier sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Embedder for OllamaEmbedder {
    fn name(&self) -> &str {
        "ollama"
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        log::debug!(
            "Requesting {} embeddings from {} (model {})",
            texts.len(),
            url,
            self.model
        );

        let response = self
            .client
            .post(&url)
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .map_err(|e| Error::Embedding(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let payload: EmbedResponse = response
            .json()
            .map_err(|e| Error::Embedding(format!("malformed response: {}", e)))?;

        let mut embeddings = payload.embeddings;
        check_batch(texts.len(), &embeddings)?;
        for vector in &mut embeddings {
            l2_normalize(vector);
        }
        Ok(embeddings)
    }
}
