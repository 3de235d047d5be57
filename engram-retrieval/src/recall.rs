//! Concurrent recall fan-out over the three tier backends.
//!
//! The tier queries are independent reads with no ordering dependency,
//! so they run concurrently and fan in before fusion. Each call is
//! wrapped in a timeout and error capture: a slow, failing, or absent
//! backend contributes an empty candidate list and a warning, never a
//! request abort. Dropping the fan-out future cancels all pending calls.

use std::sync::Arc;
use std::time::{Duration, Instant};

use engram_core::candidate::Candidate;
use engram_core::models::{TierReport, TierStatus};
use engram_core::tier::Tier;
use engram_core::traits::{IGraphReasoner, IProbabilisticEngine, IVectorIndex};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Handles to the tier backends. Any adapter may be absent; an absent
/// tier is reported as skipped.
#[derive(Clone, Default)]
pub struct TierAdapters {
    pub vector: Option<Arc<dyn IVectorIndex>>,
    pub graph: Option<Arc<dyn IGraphReasoner>>,
    pub probabilistic: Option<Arc<dyn IProbabilisticEngine>>,
}

/// Inputs forwarded to the tier backends for one request.
pub struct RecallQuery<'a> {
    pub query: &'a str,
    pub query_embedding: Option<&'a [f32]>,
    pub top_k: usize,
    pub max_hops: u8,
    pub evidence_variables: &'a [String],
    pub evidence: &'a serde_json::Value,
}

/// Candidates and per-tier reports for one request.
pub struct RecallOutcome {
    pub candidates: Vec<Candidate>,
    pub reports: Vec<TierReport>,
}

/// Query all configured tiers concurrently with a per-tier timeout.
pub async fn recall_all(
    adapters: &TierAdapters,
    query: &RecallQuery<'_>,
    tier_timeout: Duration,
) -> RecallOutcome {
    let (vector, graph, probabilistic) = tokio::join!(
        recall_vector(adapters, query, tier_timeout),
        recall_graph(adapters, query, tier_timeout),
        recall_probabilistic(adapters, query, tier_timeout),
    );

    let mut candidates = Vec::new();
    let mut reports = Vec::with_capacity(3);
    for (list, report) in [vector, graph, probabilistic] {
        debug!(
            tier = %report.tier,
            status = ?report.status,
            candidates = report.candidates,
            elapsed_ms = report.elapsed_ms,
            "tier recall finished"
        );
        candidates.extend(list);
        reports.push(report);
    }

    RecallOutcome {
        candidates,
        reports,
    }
}

async fn recall_vector(
    adapters: &TierAdapters,
    query: &RecallQuery<'_>,
    limit: Duration,
) -> (Vec<Candidate>, TierReport) {
    let started = Instant::now();
    let Some(index) = adapters.vector.as_ref() else {
        return skipped(Tier::Vector, started);
    };
    // Embedding computation is out of scope here; without a query
    // embedding the vector tier cannot be asked anything.
    let Some(embedding) = query.query_embedding else {
        return skipped(Tier::Vector, started);
    };
    settle(
        Tier::Vector,
        started,
        limit,
        timeout(limit, index.search(embedding, query.top_k))
            .await
            .map(|r| r.map(Some)),
    )
}

async fn recall_graph(
    adapters: &TierAdapters,
    query: &RecallQuery<'_>,
    limit: Duration,
) -> (Vec<Candidate>, TierReport) {
    let started = Instant::now();
    let Some(reasoner) = adapters.graph.as_ref() else {
        return skipped(Tier::Graph, started);
    };
    settle(
        Tier::Graph,
        started,
        limit,
        timeout(
            limit,
            reasoner.retrieve_multi_hop(query.query, query.top_k, query.max_hops),
        )
        .await
        .map(|r| r.map(Some)),
    )
}

async fn recall_probabilistic(
    adapters: &TierAdapters,
    query: &RecallQuery<'_>,
    limit: Duration,
) -> (Vec<Candidate>, TierReport) {
    let started = Instant::now();
    let Some(engine) = adapters.probabilistic.as_ref() else {
        return skipped(Tier::Probabilistic, started);
    };
    settle(
        Tier::Probabilistic,
        started,
        limit,
        timeout(
            limit,
            engine.query_conditional(query.evidence_variables, query.evidence),
        )
        .await,
    )
}

type TierCall = Result<engram_core::errors::EngramResult<Option<Vec<Candidate>>>, tokio::time::error::Elapsed>;

/// Convert a timed tier call into candidates plus a report. `Ok(None)`
/// from the backend is a deliberate skip, distinct from an empty list.
fn settle(tier: Tier, started: Instant, limit: Duration, call: TierCall) -> (Vec<Candidate>, TierReport) {
    match call {
        Ok(Ok(Some(mut candidates))) => {
            // Tier attribution belongs to the fan-out, not the adapter.
            for candidate in &mut candidates {
                candidate.tier = tier;
            }
            let status = if candidates.is_empty() {
                TierStatus::Empty
            } else {
                TierStatus::Ok
            };
            let report = report(tier, status, candidates.len(), started);
            (candidates, report)
        }
        Ok(Ok(None)) => {
            debug!(tier = %tier, "backend declined the query");
            (Vec::new(), report(tier, TierStatus::Skipped, 0, started))
        }
        Ok(Err(e)) => {
            warn!(tier = %tier, error = %e, "tier query failed");
            (Vec::new(), report(tier, TierStatus::Failed, 0, started))
        }
        Err(_) => {
            warn!(
                tier = %tier,
                timeout_ms = limit.as_millis() as u64,
                "tier query timed out"
            );
            (Vec::new(), report(tier, TierStatus::TimedOut, 0, started))
        }
    }
}

fn skipped(tier: Tier, started: Instant) -> (Vec<Candidate>, TierReport) {
    (Vec::new(), report(tier, TierStatus::Skipped, 0, started))
}

fn report(tier: Tier, status: TierStatus, candidates: usize, started: Instant) -> TierReport {
    TierReport {
        tier,
        status,
        candidates,
        elapsed_ms: started.elapsed().as_millis() as u64,
    }
}
