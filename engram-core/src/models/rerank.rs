use serde::{Deserialize, Serialize};

/// Result of one reranker adapter call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankOutcome {
    /// One precision score in [0.0, 1.0] per input text, input order.
    pub scores: Vec<f64>,
    pub stats: RerankStats,
}

/// Adapter-side statistics for a rerank call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankStats {
    /// Model identifier reported by the adapter.
    pub model: String,
    /// Latency of the adapter call in milliseconds.
    pub latency_ms: u64,
}
