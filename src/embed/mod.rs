//! Embedding backends.
//!
//! The ranker receives an [`Embedder`] at construction time and calls it once
//! per request with the query and every candidate text in a single batch.

mod hashing;
#[cfg(feature = "ollama")]
mod ollama;

pub use hashing::{HashingEmbedder, DEFAULT_DIMENSION};
#[cfg(feature = "ollama")]
pub use ollama::{OllamaEmbedder, DEFAULT_BASE_URL, DEFAULT_MODEL};

use crate::error::{Error, Result};

/// Interface implemented by embedding backends.
pub trait Embedder: Send + Sync {
    /// Name of the backend, used in log output.
    fn name(&self) -> &str;

    /// Produce one unit-normalized vector per input text, in input order.
    ///
    /// Identical input must yield identical output.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Scale a vector to unit length in place. Zero vectors are left unchanged.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

/// Cosine similarity of two vectors. Returns 0 when either has zero length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Check that a batch response has one vector per input, a single non-zero
/// dimension, and only finite components.
pub fn check_batch(expected: usize, vectors: &[Vec<f32>]) -> Result<()> {
    if vectors.len() != expected {
        return Err(Error::Embedding(format!(
            "expected {} vectors, got {}",
            expected,
            vectors.len()
        )));
    }
    let Some(first) = vectors.first() else {
        return Ok(());
    };
    let dimension = first.len();
    if dimension == 0 {
        return Err(Error::Embedding("embedding dimension is zero".into()));
    }
    if let Some(bad) = vectors.iter().position(|v| v.len() != dimension) {
        return Err(Error::Embedding(format!(
            "vector {} has dimension {}, expected {}",
            bad,
            vectors[bad].len(),
            dimension
        )));
    }
    if let Some(bad) = vectors
        .iter()
        .position(|v| v.iter().any(|x| !x.is_finite()))
    {
        return Err(Error::Embedding(format!(
            "vector {} has non-finite components",
            bad
        )));
    }
    Ok(())
}
