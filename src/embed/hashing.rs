//! Deterministic local embedder based on feature hashing.

use super::{l2_normalize, Embedder};
use crate::error::{Error, Result};

/// Default vector dimension.
pub const DEFAULT_DIMENSION: usize = 384;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Weight of a character trigram relative to a whole word.
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Embeds text by hashing lower-cased words and character trigrams into a
/// fixed number of signed buckets.
///
/// Word features capture vocabulary overlap for space-delimited scripts;
/// trigrams keep scripts without word spacing comparable.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    /// Create an embedder with the default dimension.
    pub fn new() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }

    /// Set the vector dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Vector dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0_f32; self.dimension];
        let lowered = text.to_lowercase();

        for word in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            self.add_feature(&mut embedding, word.as_bytes(), 1.0);
        }

        let chars: Vec<char> = lowered.chars().filter(|c| !c.is_whitespace()).collect();
        let mut buf = String::new();
        for window in chars.windows(3) {
            buf.clear();
            buf.extend(window);
            self.add_feature(&mut embedding, buf.as_bytes(), TRIGRAM_WEIGHT);
        }

        l2_normalize(&mut embedding);
        embedding
    }

    fn add_feature(&self, embedding: &mut [f32], feature: &[u8], weight: f32) {
        let hash = fnv1a(feature);
        let bucket = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        embedding[bucket] += sign * weight;
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.dimension == 0 {
            return Err(Error::Embedding(
                "embedding dimension must be greater than zero".into(),
            ));
        }

        log::debug!(
            "Hashing {} texts into {} dimensions",
            texts.len(),
            self.dimension
        );

        Ok(texts.iter().map(|t| self.encode(t)).collect())
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::cosine_similarity;

    fn embed_one(embedder: &HashingEmbedder, text: &str) -> Vec<f32> {
        embedder.embed(&[text.to_string()]).unwrap().remove(0)
    }

    #[test]
    fn test_deterministic_and_normalized() {
        let embedder = HashingEmbedder::new();
        let texts = vec!["Mountain Hiking Trails".to_string(), "東京の観光".to_string()];
        let first = embedder.embed(&texts).unwrap();
        let second = embedder.embed(&texts).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        for v in &first {
            assert_eq!(v.len(), DEFAULT_DIMENSION);
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_shared_vocabulary_scores_higher() {
        let embedder = HashingEmbedder::new();
        let query = embed_one(&embedder, "Plan a hiking trip in the mountains");
        let close = embed_one(&embedder, "Mountain hiking trip planning");
        let far = embed_one(&embedder, "Quarterly revenue accounting summary");

        assert!(cosine_similarity(&query, &close) > cosine_similarity(&query, &far));
    }

    #[test]
    fn test_zero_dimension_fails() {
        let embedder = HashingEmbedder::new().with_dimension(0);
        assert!(matches!(
            embedder.embed(&["text".to_string()]),
            Err(Error::Embedding(_))
        ));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new().with_dimension(8);
        assert_eq!(embed_one(&embedder, ""), vec![0.0; 8]);
    }
}
