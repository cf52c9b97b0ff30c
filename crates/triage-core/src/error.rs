use thiserror::Error;

/// A convenience `Result` alias using [`TriageError`].
pub type TriageResult<T> = Result<T, TriageError>;

/// Top-level error type for the triage bot.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Error, Debug)]
pub enum TriageError {
    /// Invalid or inconsistent configuration. Fatal at startup.
    #[error("Config error: {0}")]
    Config(String),

    /// The embedding backend could not produce a vector.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// An outbound HTTP request failed (remote embedding backend).
    #[error("HTTP error: {0}")]
    Http(String),

    /// An error from the web layer.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
