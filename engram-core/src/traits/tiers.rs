use async_trait::async_trait;

use crate::candidate::Candidate;
use crate::errors::EngramResult;

/// Vector-similarity index backend.
#[async_trait]
pub trait IVectorIndex: Send + Sync {
    /// Search the index with a pre-computed query embedding.
    async fn search(&self, query_embedding: &[f32], top_k: usize)
        -> EngramResult<Vec<Candidate>>;
}

/// Multi-hop graph reasoning backend.
#[async_trait]
pub trait IGraphReasoner: Send + Sync {
    /// Retrieve candidates reachable within `max_hops` of the query's
    /// entities, scored by the backend's own traversal model.
    async fn retrieve_multi_hop(
        &self,
        query: &str,
        top_k: usize,
        max_hops: u8,
    ) -> EngramResult<Vec<Candidate>>;
}

/// Probabilistic (Bayesian) inference backend.
#[async_trait]
pub trait IProbabilisticEngine: Send + Sync {
    /// Query conditional beliefs over `variables` given `evidence`.
    ///
    /// `Ok(None)` signals a deliberate skip (for example, the backend
    /// excludes itself for this interaction mode) and is distinct from
    /// `Ok(Some(vec![]))`, a query that matched nothing.
    async fn query_conditional(
        &self,
        variables: &[String],
        evidence: &serde_json::Value,
    ) -> EngramResult<Option<Vec<Candidate>>>;
}
