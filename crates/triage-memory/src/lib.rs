//! Embedding providers and the nearest-response index.
//!
//! The index is built once from the trigger → response table and is
//! read-only afterwards; lookups embed the query with the same provider and
//! return the response of the nearest trigger by Euclidean distance.
//!
//! # Main types
//!
//! - [`EmbeddingProvider`] — Trait for turning text into fixed-length vectors.
//! - [`LocalEmbedding`] — Local hashed character-trigram embedding.
//! - [`HttpEmbedding`] — OpenAI-compatible remote embedding backend
//!   (feature `http-embeddings`).
//! - [`ResponseIndex`] — Immutable k=1 nearest-neighbour index over triggers.

/// Embedding provider trait and local implementation.
pub mod embedding;
/// Remote embedding backend.
#[cfg(feature = "http-embeddings")]
pub mod http;
/// Nearest-response index.
pub mod index;

pub use embedding::{EmbeddingProvider, LocalEmbedding};
#[cfg(feature = "http-embeddings")]
pub use http::HttpEmbedding;
pub use index::{LookupHit, Match, ResponseIndex};
