use serde::{Deserialize, Serialize};

use crate::candidate::HybridCandidate;
use crate::mode::Mode;
use crate::models::stats::PipelineStats;

/// Terminal artifact of one fusion request.
///
/// `core` is never truncated for budget reasons; when core alone exceeds
/// the token budget it is kept whole and `extended` is emptied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Highest-confidence results, always included.
    pub core: Vec<HybridCandidate>,
    /// Supplementary results that fit the remaining token budget.
    pub extended: Vec<HybridCandidate>,
    /// Estimated tokens across core and extended.
    pub token_count: usize,
    /// Final tokens / pre-compression tokens; 1.0 when nothing dropped.
    pub compression_ratio: f64,
    pub mode: Mode,
    pub stats: PipelineStats,
}

impl PipelineResult {
    /// Well-formed empty result, the terminal state for total recall
    /// failure or cancellation. Not an error.
    pub fn empty(mode: Mode, stats: PipelineStats) -> Self {
        Self {
            core: Vec::new(),
            extended: Vec::new(),
            token_count: 0,
            compression_ratio: 1.0,
            mode,
            stats,
        }
    }
}
