use crate::errors::EngramResult;

/// Similarity-vector encoder used by near-duplicate detection.
pub trait IEncoder: Send + Sync {
    /// Encode a batch of texts in a single call.
    ///
    /// One batch call per request is the contract: callers must never
    /// re-encode per pair inside a comparison loop.
    fn encode_batch(&self, texts: &[String]) -> EngramResult<Vec<Vec<f32>>>;

    /// Dimensionality of the produced vectors.
    fn dimensions(&self) -> usize;

    /// Human-readable encoder name.
    fn name(&self) -> &str;

    /// Whether the encoder is currently usable. An unavailable encoder
    /// downgrades dedup to the exact pass only.
    fn is_available(&self) -> bool;
}
