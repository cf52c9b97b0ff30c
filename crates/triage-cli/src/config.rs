use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use triage_core::{
    default_responses, validate_responses, TriageError, TriageResult, TriggerResponse,
    DEFAULT_FALLBACK_RESPONSE,
};
use triage_gateway::{BotSettings, EtaRange};
use triage_memory::{EmbeddingProvider, LocalEmbedding};

/// Environment variable consulted when `embedding.api_key` is not set.
pub const API_KEY_ENV: &str = "TRIAGE_EMBEDDING_API_KEY";

#[derive(Debug, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default = "default_responses")]
    pub responses: Vec<TriggerResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_doctor")]
    pub doctor_name: String,
    #[serde(default = "default_fallback")]
    pub fallback_response: String,
    #[serde(default = "default_eta_min")]
    pub eta_min_minutes: u32,
    #[serde(default = "default_eta_max")]
    pub eta_max_minutes: u32,
    #[serde(default = "default_max_input")]
    pub max_input_length: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            doctor_name: default_doctor(),
            fallback_response: default_fallback(),
            eta_min_minutes: default_eta_min(),
            eta_max_minutes: default_eta_max(),
            max_input_length: default_max_input(),
        }
    }
}

impl BotConfig {
    /// Convert into gateway settings, validating the ETA range.
    pub fn settings(&self) -> TriageResult<BotSettings> {
        if self.max_input_length == 0 {
            return Err(TriageError::Config(
                "bot.max_input_length must be greater than zero".to_string(),
            ));
        }
        Ok(BotSettings {
            doctor_name: self.doctor_name.clone(),
            eta: EtaRange::new(self.eta_min_minutes, self.eta_max_minutes)?,
            max_input_length: self.max_input_length,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    #[default]
    Local,
    Http,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingBackend,
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingBackend::default(),
            dimension: default_dimension(),
            model: default_model(),
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmbeddingConfig {
    /// Instantiate the configured backend.
    pub fn provider(&self) -> TriageResult<Arc<dyn EmbeddingProvider>> {
        if self.dimension == 0 {
            return Err(TriageError::Config(
                "embedding.dimension must be greater than zero".to_string(),
            ));
        }
        match self.provider {
            EmbeddingBackend::Local => Ok(Arc::new(LocalEmbedding::new(self.dimension))),
            EmbeddingBackend::Http => self.http_provider(),
        }
    }

    #[cfg(feature = "http-embeddings")]
    fn http_provider(&self) -> TriageResult<Arc<dyn EmbeddingProvider>> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok());
        let provider = triage_memory::HttpEmbedding::new(
            self.base_url.clone(),
            self.model.clone(),
            self.dimension,
            api_key,
            std::time::Duration::from_secs(self.timeout_secs),
        )?;
        Ok(Arc::new(provider))
    }

    #[cfg(not(feature = "http-embeddings"))]
    fn http_provider(&self) -> TriageResult<Arc<dyn EmbeddingProvider>> {
        Err(TriageError::Config(
            "embedding.provider = \"http\" requires the http-embeddings feature".to_string(),
        ))
    }
}

impl TriageConfig {
    /// Read and validate a config file; a missing file yields the defaults.
    pub async fn load(path: &Path) -> TriageResult<Self> {
        let config = match tokio::fs::read_to_string(path).await {
            Ok(text) => Self::parse(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Config file not found, using defaults");
                Self::parse("")?
            }
            Err(e) => {
                return Err(TriageError::Config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                )))
            }
        };
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn parse(text: &str) -> TriageResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| TriageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> TriageResult<()> {
        validate_responses(&self.responses)?;
        self.bot.settings()?;
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_doctor() -> String {
    "Dr. Adrin".to_string()
}
fn default_fallback() -> String {
    DEFAULT_FALLBACK_RESPONSE.to_string()
}
fn default_eta_min() -> u32 {
    10
}
fn default_eta_max() -> u32 {
    30
}
fn default_max_input() -> usize {
    2000
}
fn default_dimension() -> usize {
    384
}
fn default_model() -> String {
    "all-MiniLM-L6-v2".to_string()
}
fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
