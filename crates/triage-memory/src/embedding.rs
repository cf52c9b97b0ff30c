use async_trait::async_trait;
use triage_core::TriageResult;

/// Turns text into a fixed-length `f32` vector.
///
/// The index treats a provider as a black box with two promises: identical
/// text yields an identical vector, and every vector is
/// [`dimension`](Self::dimension) long.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text.
    async fn embed(&self, text: &str) -> TriageResult<Vec<f32>>;

    /// Embed several texts; the output is in input order.
    ///
    /// Backends that can batch a request should override this.
    async fn embed_all(&self, texts: &[&str]) -> TriageResult<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Length of every vector this provider returns.
    fn dimension(&self) -> usize;
}

/// Weight of a whole-word feature relative to one of its trigrams.
const WORD_WEIGHT: f32 = 2.0;

/// In-process embedding from hashed character trigrams.
///
/// Each word of two or more characters is wrapped as `<word>` and split into
/// character trigrams, so `"bleding"` still shares most of its features with
/// `"bleeding"`. The whole word is added as one extra, heavier feature.
/// Features are hashed into `dimension` buckets with a hash-derived sign
/// (collisions cancel rather than pile up) and the vector is L2-normalised.
/// Text without any such word maps to the zero vector.
pub struct LocalEmbedding {
    dimension: usize,
}

impl LocalEmbedding {
    /// Creates a provider producing vectors of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let hash = fnv1a64(feature.as_bytes());
        let bucket = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

impl Default for LocalEmbedding {
    fn default() -> Self {
        Self::new(384)
    }
}

#[async_trait]
impl EmbeddingProvider for LocalEmbedding {
    async fn embed(&self, text: &str) -> TriageResult<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimension];
        if self.dimension == 0 {
            return Ok(vector);
        }

        let lowered = text.to_lowercase();
        for word in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= 2)
        {
            self.add_feature(&mut vector, &format!("w:{word}"), WORD_WEIGHT);

            let padded: Vec<char> = std::iter::once('<')
                .chain(word.chars())
                .chain(std::iter::once('>'))
                .collect();
            for gram in padded.windows(3) {
                let gram: String = gram.iter().collect();
                self.add_feature(&mut vector, &gram, 1.0);
            }
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// FNV-1a, 64 bit.
fn fnv1a64(data: &[u8]) -> u64 {
    data.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
    }

    #[tokio::test]
    async fn test_local_embedding_dimension() {
        let emb = LocalEmbedding::new(128);
        assert_eq!(emb.dimension(), 128);
        assert_eq!(emb.embed("not breathing").await.unwrap().len(), 128);
    }

    #[tokio::test]
    async fn test_local_embedding_normalized() {
        let emb = LocalEmbedding::default();
        let vec = emb.embed("the patient is bleeding heavily").await.unwrap();
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_local_embedding_shared_words_are_closer() {
        let emb = LocalEmbedding::default();
        let v1 = emb.embed("he is not breathing").await.unwrap();
        let v2 = emb.embed("not breathing").await.unwrap();
        let v3 = emb.embed("bleeding").await.unwrap();

        let d12 = squared_distance(&v1, &v2);
        let d13 = squared_distance(&v1, &v3);
        assert!(d12 < d13, "d(query, match)={d12} should be < d(query, other)={d13}");
    }

    #[tokio::test]
    async fn test_misspelling_lands_near_trigger() {
        let emb = LocalEmbedding::default();
        let triggers = ["not breathing", "bleeding", "choking"];
        let mut vectors = Vec::new();
        for t in triggers {
            vectors.push(emb.embed(t).await.unwrap());
        }

        for (typo, expected) in [("bleding", 1), ("chokng", 2), ("not breething", 0)] {
            let q = emb.embed(typo).await.unwrap();
            let nearest = vectors
                .iter()
                .enumerate()
                .min_by(|a, b| {
                    squared_distance(&q, a.1).total_cmp(&squared_distance(&q, b.1))
                })
                .map(|(i, _)| i)
                .unwrap();
            assert_eq!(nearest, expected, "{typo} matched {}", triggers[nearest]);
        }
    }

    #[tokio::test]
    async fn test_local_embedding_empty_is_zero_vector() {
        let emb = LocalEmbedding::new(16);
        assert_eq!(emb.embed("").await.unwrap(), vec![0.0; 16]);

        // Single-character words are ignored too
        let vec = emb.embed("a ? !").await.unwrap();
        assert!(vec.iter().all(|x| *x == 0.0));
    }

    #[tokio::test]
    async fn test_single_multibyte_char_is_ignored() {
        let emb = LocalEmbedding::new(16);
        assert!(emb.embed("é").await.unwrap().iter().all(|x| *x == 0.0));
        assert!(emb.embed("é ü").await.unwrap().iter().all(|x| *x == 0.0));
        // Two characters count as a word
        assert!(emb.embed("éé").await.unwrap().iter().any(|x| *x != 0.0));
    }

    #[tokio::test]
    async fn test_local_embedding_deterministic() {
        let emb = LocalEmbedding::default();
        let v1 = emb.embed("choking").await.unwrap();
        let v2 = emb.embed("choking").await.unwrap();
        assert_eq!(v1, v2);
    }

    #[tokio::test]
    async fn test_local_embedding_case_insensitive() {
        let emb = LocalEmbedding::default();
        let v1 = emb.embed("Not Breathing").await.unwrap();
        let v2 = emb.embed("not breathing").await.unwrap();
        assert_eq!(v1, v2);
    }

    #[tokio::test]
    async fn test_embed_all_preserves_order() {
        let emb = LocalEmbedding::default();
        let vecs = emb.embed_all(&["bleeding", "choking"]).await.unwrap();
        assert_eq!(vecs.len(), 2);
        assert_eq!(vecs[0], emb.embed("bleeding").await.unwrap());
        assert_eq!(vecs[1], emb.embed("choking").await.unwrap());
    }

    #[test]
    fn test_fnv1a64_known_values() {
        assert_eq!(fnv1a64(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a64(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
