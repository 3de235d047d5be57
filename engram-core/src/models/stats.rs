use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tier::Tier;

/// Outcome of one tier query during recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierStatus {
    /// The tier responded with at least one candidate.
    Ok,
    /// The tier responded with an empty list.
    Empty,
    /// The tier was not queried: no adapter configured, required inputs
    /// missing, or the backend signalled a deliberate skip.
    Skipped,
    /// The tier errored and contributed nothing.
    Failed,
    /// The tier exceeded the recall timeout and contributed nothing.
    TimedOut,
}

/// Per-tier recall outcome, kept so skip, empty, and failure remain
/// distinguishable to observability consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierReport {
    pub tier: Tier,
    pub status: TierStatus,
    pub candidates: usize,
    pub elapsed_ms: u64,
}

/// Wall-clock milliseconds spent in each pipeline stage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StageTimings {
    pub recall_ms: u64,
    pub fusion_ms: u64,
    pub filter_ms: u64,
    pub dedup_ms: u64,
    pub rank_ms: u64,
    pub rerank_ms: u64,
    pub compress_ms: u64,
    pub total_ms: u64,
}

/// Candidate counts surviving each stage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StageCounts {
    pub recalled: usize,
    pub fused: usize,
    pub filtered: usize,
    pub deduped: usize,
    pub reranked: usize,
}

/// Per-request statistics attached to every [`crate::models::PipelineResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStats {
    pub request_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub timings: StageTimings,
    pub counts: StageCounts,
    pub tier_reports: Vec<TierReport>,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            started_at: Utc::now(),
            timings: StageTimings::default(),
            counts: StageCounts::default(),
            tier_reports: Vec::new(),
        }
    }
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}
