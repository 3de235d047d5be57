use async_trait::async_trait;

use crate::errors::EngramResult;
use crate::models::RerankOutcome;

/// Precision reranking model applied to the head of the ranked list.
#[async_trait]
pub trait IReranker: Send + Sync {
    /// Score `texts` against `query`. Returns one precision score in
    /// [0.0, 1.0] per input text, in input order.
    async fn rerank(
        &self,
        query: &str,
        texts: &[String],
        top_k: usize,
    ) -> EngramResult<RerankOutcome>;
}
