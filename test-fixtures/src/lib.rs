//! Shared test builders and mock adapters for the engram workspace.
//!
//! Mock tier backends, encoders, and rerankers with scriptable behavior
//! (fixed results, failures, deliberate skips, artificial latency) so
//! pipeline tests can exercise every recall outcome.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use engram_core::candidate::Candidate;
use engram_core::errors::{AdapterError, EngramResult};
use engram_core::models::{RerankOutcome, RerankStats};
use engram_core::tier::Tier;
use engram_core::traits::{
    IEncoder, IGraphReasoner, IProbabilisticEngine, IReranker, IVectorIndex,
};

/// Build a candidate with an explicit id.
pub fn candidate(id: &str, text: &str, score: f64, tier: Tier) -> Candidate {
    Candidate {
        id: Some(id.to_string()),
        text: text.to_string(),
        score,
        tier,
        metadata: serde_json::Value::Null,
    }
}

/// Build a candidate without an id; the key falls back to metadata or text.
pub fn anonymous_candidate(text: &str, score: f64, tier: Tier) -> Candidate {
    Candidate {
        id: None,
        text: text.to_string(),
        score,
        tier,
        metadata: serde_json::Value::Null,
    }
}

/// Build a candidate keyed by chunk provenance metadata.
pub fn chunk_candidate(
    file_path: &str,
    chunk_index: u64,
    text: &str,
    score: f64,
    tier: Tier,
) -> Candidate {
    Candidate {
        id: None,
        text: text.to_string(),
        score,
        tier,
        metadata: serde_json::json!({ "file_path": file_path, "chunk_index": chunk_index }),
    }
}

/// Scripted behavior for a mock tier backend.
pub enum TierScript {
    /// Respond with these candidates.
    Respond(Vec<Candidate>),
    /// Fail with an adapter error.
    Fail,
    /// Sleep, then respond (for timeout tests).
    Delay(Duration, Vec<Candidate>),
    /// Deliberate skip (probabilistic tier only).
    Skip,
}

async fn run_script(
    script: &TierScript,
    tier: Tier,
    top_k: usize,
) -> EngramResult<Option<Vec<Candidate>>> {
    match script {
        TierScript::Respond(candidates) => Ok(Some(truncated(candidates, top_k))),
        TierScript::Fail => Err(AdapterError::TierFailed {
            tier: tier.as_str(),
            reason: "scripted failure".to_string(),
        }
        .into()),
        TierScript::Delay(duration, candidates) => {
            tokio::time::sleep(*duration).await;
            Ok(Some(truncated(candidates, top_k)))
        }
        TierScript::Skip => Ok(None),
    }
}

fn truncated(candidates: &[Candidate], top_k: usize) -> Vec<Candidate> {
    candidates.iter().take(top_k).cloned().collect()
}

/// Mock vector index.
pub struct MockVectorIndex(pub TierScript);

#[async_trait]
impl IVectorIndex for MockVectorIndex {
    async fn search(
        &self,
        _query_embedding: &[f32],
        top_k: usize,
    ) -> EngramResult<Vec<Candidate>> {
        run_script(&self.0, Tier::Vector, top_k)
            .await
            .map(Option::unwrap_or_default)
    }
}

/// Mock graph reasoner.
pub struct MockGraphReasoner(pub TierScript);

#[async_trait]
impl IGraphReasoner for MockGraphReasoner {
    async fn retrieve_multi_hop(
        &self,
        _query: &str,
        top_k: usize,
        _max_hops: u8,
    ) -> EngramResult<Vec<Candidate>> {
        run_script(&self.0, Tier::Graph, top_k)
            .await
            .map(Option::unwrap_or_default)
    }
}

/// Mock probabilistic engine. `TierScript::Skip` exercises the
/// deliberate-skip contract.
pub struct MockProbabilisticEngine(pub TierScript);

#[async_trait]
impl IProbabilisticEngine for MockProbabilisticEngine {
    async fn query_conditional(
        &self,
        _variables: &[String],
        _evidence: &serde_json::Value,
    ) -> EngramResult<Option<Vec<Candidate>>> {
        run_script(&self.0, Tier::Probabilistic, usize::MAX).await
    }
}

/// Encoder returning pre-baked vectors keyed by text.
pub struct MockEncoder {
    vectors: HashMap<String, Vec<f32>>,
    dimensions: usize,
    available: bool,
}

impl MockEncoder {
    pub fn new(entries: &[(&str, &[f32])]) -> Self {
        let dimensions = entries.first().map(|(_, v)| v.len()).unwrap_or(0);
        Self {
            vectors: entries
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.to_vec()))
                .collect(),
            dimensions,
            available: true,
        }
    }

    /// An encoder that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            vectors: HashMap::new(),
            dimensions: 0,
            available: false,
        }
    }
}

impl IEncoder for MockEncoder {
    fn encode_batch(&self, texts: &[String]) -> EngramResult<Vec<Vec<f32>>> {
        texts
            .iter()
            .map(|text| {
                self.vectors.get(text).cloned().ok_or_else(|| {
                    AdapterError::EncoderFailed {
                        reason: format!("no vector scripted for {text:?}"),
                    }
                    .into()
                })
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "mock-encoder"
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// Reranker returning pre-baked precision scores keyed by text.
/// Unknown texts score 0.0.
pub struct MockReranker {
    scores: HashMap<String, f64>,
    fail: bool,
}

impl MockReranker {
    pub fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            scores: entries
                .iter()
                .map(|(text, score)| (text.to_string(), *score))
                .collect(),
            fail: false,
        }
    }

    /// A reranker whose every call fails.
    pub fn failing() -> Self {
        Self {
            scores: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl IReranker for MockReranker {
    async fn rerank(
        &self,
        _query: &str,
        texts: &[String],
        _top_k: usize,
    ) -> EngramResult<RerankOutcome> {
        if self.fail {
            return Err(AdapterError::RerankFailed {
                reason: "scripted failure".to_string(),
            }
            .into());
        }
        let scores = texts
            .iter()
            .map(|text| self.scores.get(text).copied().unwrap_or(0.0))
            .collect();
        Ok(RerankOutcome {
            scores,
            stats: RerankStats {
                model: "mock-reranker".to_string(),
                latency_ms: 0,
            },
        })
    }
}
