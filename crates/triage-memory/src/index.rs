use crate::embedding::EmbeddingProvider;
use std::sync::Arc;
use tracing::{debug, info, warn};
use triage_core::{
    validate_responses, TriageError, TriageResult, TriggerResponse, DEFAULT_FALLBACK_RESPONSE,
};

/// The nearest stored entry for a query vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Insertion position of the entry.
    pub index: usize,
    /// Squared Euclidean distance between the query and the entry.
    pub distance: f32,
}

/// A resolved lookup: the matched entry and how far it was from the query.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupHit<'a> {
    /// Insertion position of the entry.
    pub index: usize,
    /// The trigger phrase that seeded the entry.
    pub trigger: &'a str,
    /// The canned response text.
    pub response: &'a str,
    /// Squared Euclidean distance between the query and the entry.
    pub distance: f32,
}

/// Immutable nearest-neighbour index over trigger embeddings.
///
/// Built once from an ordered trigger → response table. The i-th vector
/// always belongs to the i-th trigger and response. The index owns the
/// provider that built it, so queries are always embedded by the same
/// function with the same dimension.
pub struct ResponseIndex {
    vectors: Vec<Vec<f32>>,
    triggers: Vec<String>,
    responses: Vec<String>,
    provider: Arc<dyn EmbeddingProvider>,
    dimension: usize,
    fallback: String,
}

impl ResponseIndex {
    /// Embed every trigger in order and build the index.
    ///
    /// Fails on duplicate or blank triggers, on any embedding failure and on
    /// any vector whose length differs from `provider.dimension()`. A partial
    /// index is never returned.
    pub async fn build(
        entries: &[TriggerResponse],
        provider: Arc<dyn EmbeddingProvider>,
    ) -> TriageResult<Self> {
        validate_responses(entries)?;

        let dimension = provider.dimension();
        if dimension == 0 && !entries.is_empty() {
            return Err(TriageError::Config(
                "Embedding dimension must be greater than zero".to_string(),
            ));
        }

        let triggers: Vec<&str> = entries.iter().map(|e| e.trigger.as_str()).collect();
        let vectors = provider.embed_all(&triggers).await?;
        if vectors.len() != entries.len() {
            return Err(TriageError::Embedding(format!(
                "Provider returned {} vectors for {} triggers",
                vectors.len(),
                entries.len()
            )));
        }

        for (entry, vector) in entries.iter().zip(vectors.iter()) {
            if vector.len() != dimension {
                return Err(TriageError::Config(format!(
                    "Embedding dimension mismatch for trigger '{}': expected {}, got {}",
                    entry.trigger,
                    dimension,
                    vector.len()
                )));
            }
        }

        info!(entries = entries.len(), dimension, "Response index built");

        Ok(Self {
            vectors,
            triggers: entries.iter().map(|e| e.trigger.clone()).collect(),
            responses: entries.iter().map(|e| e.response.clone()).collect(),
            provider,
            dimension,
            fallback: DEFAULT_FALLBACK_RESPONSE.to_string(),
        })
    }

    /// Replace the response returned when no entry can be matched.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimension of every stored vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Stored trigger phrases, in insertion order.
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Stored responses, in insertion order.
    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// The response used when nothing matches.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Exhaustive k=1 search by squared Euclidean distance.
    ///
    /// Equidistant entries resolve to the lowest insertion index. Entries
    /// whose distance is NaN are never selected. Returns `None` for an empty
    /// index or a query of the wrong dimension.
    pub fn nearest(&self, query: &[f32]) -> Option<Match> {
        if query.len() != self.dimension {
            return None;
        }

        let mut best: Option<Match> = None;
        for (index, vector) in self.vectors.iter().enumerate() {
            let distance = squared_euclidean(query, vector);
            if distance.is_nan() {
                continue;
            }
            // Strict comparison keeps the earliest of equal distances
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(Match { index, distance });
            }
        }
        best
    }

    /// Embed `query` and resolve it to the nearest stored entry.
    ///
    /// Returns `None` when the index is empty, the query cannot be embedded,
    /// or no candidate exists. Never applies a distance threshold.
    pub async fn search(&self, query: &str) -> Option<LookupHit<'_>> {
        if self.is_empty() {
            debug!("Lookup against empty index");
            return None;
        }

        let vector = match self.provider.embed(query).await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Failed to embed query");
                return None;
            }
        };
        if vector.len() != self.dimension {
            warn!(
                expected = self.dimension,
                got = vector.len(),
                "Query embedding dimension mismatch"
            );
            return None;
        }

        let m = self.nearest(&vector)?;
        debug!(index = m.index, distance = m.distance, "Nearest response");
        Some(LookupHit {
            index: m.index,
            trigger: &self.triggers[m.index],
            response: &self.responses[m.index],
            distance: m.distance,
        })
    }

    /// Map free text to the best-matching canned response, or the fallback.
    pub async fn lookup(&self, query: &str) -> String {
        match self.search(query).await {
            Some(hit) => hit.response.to_string(),
            None => self.fallback.clone(),
        }
    }
}

impl std::fmt::Debug for ResponseIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseIndex")
            .field("entries", &self.vectors.len())
            .field("dimension", &self.dimension)
            .field("triggers", &self.triggers)
            .finish()
    }
}

/// Squared Euclidean distance between two equal-length vectors.
fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
