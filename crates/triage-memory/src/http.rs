use crate::embedding::EmbeddingProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use triage_core::{TriageError, TriageResult};

/// Model served by default; produces 384-dimensional sentence embeddings.
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";
/// Dimension of [`DEFAULT_MODEL`].
pub const DEFAULT_DIMENSION: usize = 384;

/// Embedding backend speaking the OpenAI-compatible embeddings API.
///
/// Works with OpenAI, Ollama, text-embeddings-inference, and any other
/// server exposing `POST /v1/embeddings`.
pub struct HttpEmbedding {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    dimension: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl HttpEmbedding {
    /// Creates a client for `base_url` (without the `/v1/embeddings` suffix).
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
        api_key: Option<String>,
        timeout: Duration,
    ) -> TriageResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TriageError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            dimension,
        })
    }

    async fn request(&self, input: serde_json::Value) -> TriageResult<Vec<Vec<f32>>> {
        let url = format!("{}/v1/embeddings", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "input": input,
        });

        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| TriageError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(TriageError::Http(format!(
                "Embeddings API returned {status}: {text}"
            )));
        }

        let mut parsed: EmbeddingsResponse = resp
            .json()
            .await
            .map_err(|e| TriageError::Embedding(format!("Malformed embeddings response: {e}")))?;
        parsed.data.sort_by_key(|d| d.index);

        debug!(url = %url, count = parsed.data.len(), "Embeddings received");
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbedding {
    async fn embed(&self, text: &str) -> TriageResult<Vec<f32>> {
        let mut vectors = self.request(serde_json::json!(wire_input(text))).await?;
        if vectors.len() != 1 {
            return Err(TriageError::Embedding(format!(
                "Expected 1 embedding, got {}",
                vectors.len()
            )));
        }
        Ok(vectors.remove(0))
    }

    async fn embed_all(&self, texts: &[&str]) -> TriageResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let inputs: Vec<&str> = texts.iter().map(|t| wire_input(t)).collect();
        let vectors = self.request(serde_json::json!(inputs)).await?;
        if vectors.len() != texts.len() {
            return Err(TriageError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Embeddings servers reject empty input, so blank text is sent as one
/// space and still gets a vector.
fn wire_input(text: &str) -> &str {
    if text.trim().is_empty() {
        " "
    } else {
        text
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_input_blank_becomes_space() {
        assert_eq!(wire_input(""), " ");
        assert_eq!(wire_input("\n\t "), " ");
        assert_eq!(wire_input("choking"), "choking");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let emb = HttpEmbedding::new(
            "http://localhost:8080/",
            DEFAULT_MODEL,
            DEFAULT_DIMENSION,
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(emb.base_url, "http://localhost:8080");
        assert_eq!(emb.dimension(), 384);
    }

    #[test]
    fn test_response_parsing_without_index() {
        let json = r#"{"data": [{"embedding": [0.1, 0.2]}]}"#;
        let parsed: EmbeddingsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data[0].index, 0);
        assert_eq!(parsed.data[0].embedding, vec![0.1, 0.2]);
    }
}
