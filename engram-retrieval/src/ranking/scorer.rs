//! Weighted hybrid scoring over per-tier components.

use engram_core::candidate::HybridCandidate;
use engram_core::config::TierWeights;
use engram_core::tier::Tier;

/// Compute `hybrid_score = Σ weight[tier] · score[tier]` for every
/// candidate, then sort descending.
///
/// The sort is stable: equal scores keep their pre-sort relative order,
/// which makes the ranking deterministic and testable.
pub fn rank(mut candidates: Vec<HybridCandidate>, weights: &TierWeights) -> Vec<HybridCandidate> {
    for candidate in &mut candidates {
        candidate.hybrid_score = hybrid_score(candidate, weights);
    }
    candidates.sort_by(|a, b| {
        b.hybrid_score
            .partial_cmp(&a.hybrid_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// Weighted sum of the populated tier components. A tier that never
/// scored the candidate contributes nothing.
pub fn hybrid_score(candidate: &HybridCandidate, weights: &TierWeights) -> f64 {
    Tier::ALL
        .into_iter()
        .map(|tier| weights.weight(tier) * candidate.tier_score(tier).unwrap_or(0.0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use engram_core::candidate::{Candidate, CandidateKey};

    fn hybrid(id: &str, tier: Tier, score: f64) -> HybridCandidate {
        let base = Candidate {
            id: Some(id.to_string()),
            text: id.to_string(),
            score,
            tier,
            metadata: serde_json::Value::Null,
        };
        let mut h = HybridCandidate::new(CandidateKey::derive(&base), &base);
        h.observe(tier, score);
        h
    }

    #[test]
    fn default_weights_rank_by_weighted_component() {
        let ranked = rank(
            vec![
                hybrid("v", Tier::Vector, 0.8),
                hybrid("g", Tier::Graph, 0.9),
                hybrid("p", Tier::Probabilistic, 0.5),
            ],
            &TierWeights::default(),
        );
        let keys: Vec<&str> = ranked.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["g", "v", "p"]);
        assert!((ranked[0].hybrid_score - 0.36).abs() < 1e-9);
        assert!((ranked[1].hybrid_score - 0.32).abs() < 1e-9);
        assert!((ranked[2].hybrid_score - 0.10).abs() < 1e-9);
    }

    #[test]
    fn equal_scores_preserve_input_order() {
        let ranked = rank(
            vec![
                hybrid("first", Tier::Vector, 0.5),
                hybrid("second", Tier::Vector, 0.5),
                hybrid("third", Tier::Vector, 0.5),
            ],
            &TierWeights::default(),
        );
        let keys: Vec<&str> = ranked.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn multi_tier_candidates_sum_components() {
        let mut c = hybrid("both", Tier::Vector, 1.0);
        c.observe(Tier::Graph, 1.0);
        c.observe(Tier::Probabilistic, 1.0);
        assert!((hybrid_score(&c, &TierWeights::default()) - 1.0).abs() < 1e-9);
    }
}
