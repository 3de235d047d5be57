//! Confidence floor applied before dedup and ranking, so low-confidence
//! noise never pays the dedup or ranking cost.

use engram_core::candidate::HybridCandidate;
use tracing::debug;

/// Drop hybrid candidates whose best per-tier component is below
/// `threshold`.
pub fn filter_by_confidence(
    candidates: Vec<HybridCandidate>,
    threshold: f64,
) -> Vec<HybridCandidate> {
    let before = candidates.len();
    let kept: Vec<HybridCandidate> = candidates
        .into_iter()
        .filter(|c| c.best_component() >= threshold)
        .collect();
    if kept.len() < before {
        debug!(
            dropped = before - kept.len(),
            threshold, "confidence filter dropped candidates"
        );
    }
    kept
}
