//! OpenAI embedding provider using the OpenAI embeddings API.
//!
//! This module is only available when the `openai` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{EmbeddingErrorKind, RagError, Result};

/// The default OpenAI embeddings API endpoint.
const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// The default model for OpenAI embeddings.
const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// The default dimensionality for `text-embedding-3-small`.
const DEFAULT_DIMENSIONS: usize = 1536;

/// An [`EmbeddingProvider`] backed by the OpenAI embeddings API.
///
/// Uses `reqwest` to call the `/v1/embeddings` endpoint directly.
/// Failures are classified so callers can distinguish a bad key from a
/// transient network problem from a rejected input.
///
/// # Configuration
///
/// - `model` – defaults to `text-embedding-3-small`.
/// - `dimensions` – optional Matryoshka dimension override.
/// - `api_key` – from the constructor or the `OPENAI_API_KEY` environment variable.
///
/// # Example
///
/// ```rust,ignore
/// use ragcore::openai::OpenAiEmbedder;
///
/// let embedder = OpenAiEmbedder::new("sk-...")?;
/// let embedding = embedder.embed("hello world").await?;
/// ```
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    api_key: String,
    model: String,
    dimensions: usize,
    /// If set, passed to the API for Matryoshka dimension truncation.
    request_dimensions: Option<usize>,
}

impl OpenAiEmbedder {
    /// Create a new embedder with the given API key.
    ///
    /// Uses the default model (`text-embedding-3-small`) and dimensions (1536).
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(embedding_error(
                EmbeddingErrorKind::Authentication,
                "API key must not be empty",
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
            request_dimensions: None,
        })
    }

    /// Create a new embedder using the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            embedding_error(
                EmbeddingErrorKind::Authentication,
                "OPENAI_API_KEY environment variable not set",
            )
        })?;
        Self::new(api_key)
    }

    /// Set the model name (e.g. `text-embedding-3-large`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the output dimensions (Matryoshka support).
    ///
    /// When set, the API returns embeddings truncated to this size.
    /// This also updates the value returned by [`dimensions()`](EmbeddingProvider::dimensions).
    pub fn with_dimensions(mut self, dims: usize) -> Self {
        self.dimensions = dims;
        self.request_dimensions = Some(dims);
        self
    }
}

fn embedding_error(kind: EmbeddingErrorKind, message: impl Into<String>) -> RagError {
    RagError::Embedding { provider: "OpenAI".into(), kind, message: message.into() }
}

/// Classify an HTTP status from the embeddings endpoint.
fn kind_for_status(status: u16) -> EmbeddingErrorKind {
    match status {
        401 | 403 => EmbeddingErrorKind::Authentication,
        400 | 404 | 422 => EmbeddingErrorKind::InvalidInput,
        _ => EmbeddingErrorKind::Network,
    }
}

// ── OpenAI API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "OpenAI", text_len = text.len(), "embedding single text");

        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| {
            embedding_error(EmbeddingErrorKind::Network, "API returned empty response")
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            provider = "OpenAI",
            batch_size = texts.len(),
            model = %self.model,
            "embedding batch"
        );

        let request_body = EmbeddingRequest {
            model: &self.model,
            input: texts.to_vec(),
            dimensions: self.request_dimensions,
        };

        let response = self
            .client
            .post(OPENAI_EMBEDDINGS_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "OpenAI", error = %e, "request failed");
                embedding_error(EmbeddingErrorKind::Network, format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = "OpenAI", %status, "API error");
            return Err(embedding_error(
                kind_for_status(status.as_u16()),
                format!("API returned {status}: {detail}"),
            ));
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(provider = "OpenAI", error = %e, "failed to parse response");
            embedding_error(EmbeddingErrorKind::Network, format!("failed to parse response: {e}"))
        })?;

        Ok(embedding_response.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_failure_kinds() {
        assert_eq!(kind_for_status(401), EmbeddingErrorKind::Authentication);
        assert_eq!(kind_for_status(403), EmbeddingErrorKind::Authentication);
        assert_eq!(kind_for_status(400), EmbeddingErrorKind::InvalidInput);
        assert_eq!(kind_for_status(422), EmbeddingErrorKind::InvalidInput);
        assert_eq!(kind_for_status(429), EmbeddingErrorKind::Network);
        assert_eq!(kind_for_status(500), EmbeddingErrorKind::Network);
    }

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(matches!(
            OpenAiEmbedder::new(""),
            Err(RagError::Embedding { kind: EmbeddingErrorKind::Authentication, .. })
        ));
    }

    #[test]
    fn request_omits_dimensions_unless_overridden() {
        let body = EmbeddingRequest { model: DEFAULT_MODEL, input: vec!["hi"], dimensions: None };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("dimensions").is_none());

        let body =
            EmbeddingRequest { model: DEFAULT_MODEL, input: vec!["hi"], dimensions: Some(256) };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["dimensions"], 256);
    }
}
