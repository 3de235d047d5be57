//! RetrievalEngine: orchestrates the full fusion pipeline.
//!
//! recall fan-out → fusion → confidence filter → dedup → rank →
//! optional rerank → budget compression, with per-stage timings and
//! counts recorded into the result's stats.

use std::sync::Arc;
use std::time::Duration;

use engram_core::config::FusionConfig;
use engram_core::errors::EngramResult;
use engram_core::mode::Mode;
use engram_core::models::{PipelineResult, PipelineStats};
use engram_core::traits::{IEncoder, IReranker};
use engram_tokens::TokenEstimator;
use tracing::{debug, info};

use crate::compression;
use crate::dedup;
use crate::filter;
use crate::fusion;
use crate::ranking::{reranker, scorer};
use crate::recall::{self, RecallQuery, TierAdapters};
use crate::stats::StageClock;

/// One fusion request.
#[derive(Debug, Clone, Default)]
pub struct RetrievalRequest {
    /// Natural-language query, forwarded to the graph tier and reranker.
    pub query: String,
    /// Pre-computed query embedding for the vector tier. Without one the
    /// vector tier is skipped; embedding computation is out of scope.
    pub query_embedding: Option<Vec<f32>>,
    /// Interaction mode selecting the sizing profile.
    pub mode: Mode,
    /// Per-tier recall depth.
    pub top_k: usize,
    /// Overrides the mode profile's token budget when set.
    pub token_budget: Option<usize>,
    /// Variables queried on the probabilistic tier.
    pub evidence_variables: Vec<String>,
    /// Evidence forwarded to the probabilistic tier.
    pub evidence: serde_json::Value,
}

impl RetrievalRequest {
    pub fn new(query: impl Into<String>, mode: Mode, top_k: usize) -> Self {
        Self {
            query: query.into(),
            mode,
            top_k,
            ..Self::default()
        }
    }
}

/// The fusion engine.
///
/// Holds only immutable configuration and adapter handles; a single
/// instance is safe to share across concurrent requests.
pub struct RetrievalEngine {
    adapters: TierAdapters,
    encoder: Option<Arc<dyn IEncoder>>,
    reranker: Option<Arc<dyn IReranker>>,
    config: FusionConfig,
    estimator: TokenEstimator,
}

impl RetrievalEngine {
    /// Build an engine from deployment configuration.
    ///
    /// Invalid configuration (weights not summing to 1.0, out-of-range
    /// thresholds, non-positive budgets) is fatal here, never clamped.
    pub fn new(config: FusionConfig, adapters: TierAdapters) -> EngramResult<Self> {
        config.validate()?;
        Ok(Self {
            adapters,
            encoder: None,
            reranker: None,
            config,
            estimator: TokenEstimator::default(),
        })
    }

    /// Attach a similarity encoder, enabling the near-duplicate pass.
    pub fn with_encoder(mut self, encoder: Arc<dyn IEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Attach a precision reranker, enabling the rerank stage.
    pub fn with_reranker(mut self, reranker: Arc<dyn IReranker>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    /// Run the full pipeline for one request.
    ///
    /// Dropping the returned future cancels any in-flight tier calls; no
    /// partial result is ever observable because the result is only
    /// assembled after fan-in.
    pub async fn process(&self, request: &RetrievalRequest) -> EngramResult<PipelineResult> {
        let mut stats = PipelineStats::new();
        let mut clock = StageClock::start();

        let profile = self.config.modes.profile(request.mode);
        let token_budget = request.token_budget.unwrap_or(profile.token_budget);
        // Tier recall may not consume more than the mode's whole-request
        // latency target.
        let tier_timeout =
            Duration::from_millis(self.config.tier_timeout_ms.min(profile.latency_budget_ms));

        // Stage 1: recall fan-out over the tiers.
        let recall_query = RecallQuery {
            query: &request.query,
            query_embedding: request.query_embedding.as_deref(),
            top_k: request.top_k,
            max_hops: self.config.graph_max_hops,
            evidence_variables: &request.evidence_variables,
            evidence: &request.evidence,
        };
        let outcome = recall::recall_all(&self.adapters, &recall_query, tier_timeout).await;
        stats.tier_reports = outcome.reports;
        stats.counts.recalled = outcome.candidates.len();
        stats.timings.recall_ms = clock.lap();

        if outcome.candidates.is_empty() {
            // Total recall failure is terminal, not an error.
            debug!(request_id = %stats.request_id, "all tiers empty, returning empty result");
            stats.timings.total_ms = clock.total();
            return Ok(PipelineResult::empty(request.mode, stats));
        }

        // Stage 2: fuse same-key candidates across tiers.
        let fused = fusion::fuse(&outcome.candidates);
        stats.counts.fused = fused.len();
        stats.timings.fusion_ms = clock.lap();

        // Stage 3: confidence floor.
        let filtered = filter::filter_by_confidence(fused, self.config.confidence_threshold);
        stats.counts.filtered = filtered.len();
        stats.timings.filter_ms = clock.lap();

        // Stage 4: exact then near-duplicate elimination.
        let deduped = dedup::dedup_exact(filtered);
        let deduped = dedup::dedup_near(
            deduped,
            self.encoder.as_deref(),
            self.config.dedup_similarity_threshold,
        );
        stats.counts.deduped = deduped.len();
        stats.timings.dedup_ms = clock.lap();

        // Stage 5: weighted hybrid ranking.
        let ranked = scorer::rank(deduped, &self.config.tier_weights);
        stats.timings.rank_ms = clock.lap();

        // Stage 6: optional precision rerank of the head.
        let (ranked, reranked) = reranker::rerank(
            ranked,
            self.reranker.as_deref(),
            &request.query,
            self.config.rerank_top_k,
            self.config.rerank_blend,
        )
        .await;
        if reranked {
            stats.counts.reranked = self.config.rerank_top_k.min(ranked.len());
        }
        stats.timings.rerank_ms = clock.lap();

        // Stage 7: budget compression with context-ordering mitigation.
        let compressed = compression::compress(
            ranked,
            &profile,
            token_budget,
            self.config.mitigation,
            &self.estimator,
        );
        stats.timings.compress_ms = clock.lap();
        stats.timings.total_ms = clock.total();

        info!(
            request_id = %stats.request_id,
            mode = %request.mode,
            core = compressed.core.len(),
            extended = compressed.extended.len(),
            tokens = compressed.token_count,
            budget = token_budget,
            total_ms = stats.timings.total_ms,
            "fusion pipeline complete"
        );

        Ok(PipelineResult {
            core: compressed.core,
            extended: compressed.extended,
            token_count: compressed.token_count,
            compression_ratio: compressed.compression_ratio,
            mode: request.mode,
            stats,
        })
    }

    /// Position-weight curve over `n` context slots using the configured
    /// edge boost. Instrumentation helper, independent of the reordering.
    pub fn position_curve(&self, n: usize) -> Vec<f64> {
        compression::position_weights(n, self.config.position_edge_boost)
    }

    /// The validated configuration this engine runs with.
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }
}
