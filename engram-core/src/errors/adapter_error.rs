/// Errors surfaced by the external adapters (tiers, encoder, reranker).
///
/// The recall fan-out converts tier errors into empty result lists; the
/// dedup and rerank stages degrade to their no-encoder / no-rerank paths.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("tier {tier} query failed: {reason}")]
    TierFailed { tier: &'static str, reason: String },

    #[error("batch encode failed: {reason}")]
    EncoderFailed { reason: String },

    #[error("rerank failed: {reason}")]
    RerankFailed { reason: String },

    #[error("malformed adapter response: {reason}")]
    MalformedResponse { reason: String },
}
