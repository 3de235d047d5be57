//! Tier-score fusion: group same-key candidates into hybrid records.
//!
//! Combines result lists from heterogeneous backends without requiring
//! score normalization across them; each tier keeps its own score slot
//! and weighting happens later, in ranking.

use std::collections::HashMap;

use engram_core::candidate::{Candidate, HybridCandidate};

/// Fuse the concatenated tier result lists into one hybrid record per
/// unique candidate key.
///
/// When the same tier reports the same unit more than once, the maximum
/// score wins. First-seen key order is preserved so downstream stable
/// sorting stays deterministic. Backend scores are clamped to [0.0, 1.0]
/// here, at the boundary between adapter data and the fusion core.
/// Empty input produces empty output, a terminal state rather than an
/// error.
pub fn fuse(candidates: &[Candidate]) -> Vec<HybridCandidate> {
    let mut fused: Vec<HybridCandidate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::with_capacity(candidates.len());

    for candidate in candidates {
        let key = candidate.key();
        let slot = match index.get(key.as_str()) {
            Some(&slot) => slot,
            None => {
                index.insert(key.as_str().to_string(), fused.len());
                fused.push(HybridCandidate::new(key, candidate));
                fused.len() - 1
            }
        };
        fused[slot].observe(candidate.tier, candidate.score.clamp(0.0, 1.0));
    }

    fused
}
