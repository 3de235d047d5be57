//! Property tests for the fusion pipeline's algebraic contracts.

use engram_core::candidate::{Candidate, CandidateKey, HybridCandidate};
use engram_core::config::{MitigationStrategy, TierWeights};
use engram_core::mode::ModeProfile;
use engram_core::tier::Tier;
use engram_retrieval::compression::compress;
use engram_retrieval::dedup::dedup_exact;
use engram_retrieval::ranking::scorer;
use engram_tokens::TokenEstimator;
use proptest::prelude::*;

fn hybrid(id: &str, text: &str) -> HybridCandidate {
    let base = Candidate {
        id: Some(id.to_string()),
        text: text.to_string(),
        score: 0.5,
        tier: Tier::Vector,
        metadata: serde_json::Value::Null,
    };
    HybridCandidate::new(CandidateKey::derive(&base), &base)
}

fn scored_hybrid(id: &str, v: f64, g: f64, p: f64) -> HybridCandidate {
    let mut h = hybrid(id, id);
    h.observe(Tier::Vector, v);
    h.observe(Tier::Graph, g);
    h.observe(Tier::Probabilistic, p);
    h
}

proptest! {
    #[test]
    fn hybrid_score_stays_in_unit_range(
        v in 0.0f64..=1.0,
        g in 0.0f64..=1.0,
        p in 0.0f64..=1.0,
    ) {
        let candidate = scored_hybrid("c", v, g, p);
        let score = scorer::hybrid_score(&candidate, &TierWeights::default());
        // Allow one ulp of float accumulation noise at the top end.
        prop_assert!(score >= 0.0);
        prop_assert!(score <= 1.0 + 1e-12);
    }

    #[test]
    fn hybrid_score_is_monotone_in_each_component(
        v in 0.0f64..=1.0,
        g in 0.0f64..=1.0,
        p in 0.0f64..=1.0,
        delta in 0.0f64..=1.0,
    ) {
        let weights = TierWeights::default();
        let base = scorer::hybrid_score(&scored_hybrid("c", v, g, p), &weights);
        let bumped_v = scorer::hybrid_score(
            &scored_hybrid("c", (v + delta).min(1.0), g, p),
            &weights,
        );
        let bumped_g = scorer::hybrid_score(
            &scored_hybrid("c", v, (g + delta).min(1.0), p),
            &weights,
        );
        let bumped_p = scorer::hybrid_score(
            &scored_hybrid("c", v, g, (p + delta).min(1.0)),
            &weights,
        );
        prop_assert!(bumped_v >= base - 1e-12);
        prop_assert!(bumped_g >= base - 1e-12);
        prop_assert!(bumped_p >= base - 1e-12);
    }

    #[test]
    fn exact_dedup_is_idempotent(texts in proptest::collection::vec("[a-d]{1,3}", 0..40)) {
        let candidates: Vec<HybridCandidate> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| hybrid(&format!("id-{i}"), text))
            .collect();
        let once = dedup_exact(candidates);
        let once_keys: Vec<String> = once.iter().map(|c| c.key.as_str().to_string()).collect();
        let twice = dedup_exact(once);
        let twice_keys: Vec<String> = twice.iter().map(|c| c.key.as_str().to_string()).collect();
        prop_assert_eq!(once_keys, twice_keys);
    }

    #[test]
    fn identical_texts_collapse_to_the_first(n in 1usize..50) {
        let candidates: Vec<HybridCandidate> = (0..n)
            .map(|i| hybrid(&format!("id-{i}"), "the same text every time"))
            .collect();
        let deduped = dedup_exact(candidates);
        prop_assert_eq!(deduped.len(), 1);
        prop_assert_eq!(deduped[0].key.as_str(), "id-0");
    }

    #[test]
    fn ranking_is_a_stable_total_order(
        scores in proptest::collection::vec(0..5u8, 0..40),
    ) {
        // Draw scores from a tiny discrete set so ties are common.
        let candidates: Vec<HybridCandidate> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mut h = hybrid(&format!("{i}"), &format!("text {i}"));
                h.observe(Tier::Vector, f64::from(*s) / 5.0);
                h
            })
            .collect();
        let ranked = scorer::rank(candidates, &TierWeights::default());

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].hybrid_score >= pair[1].hybrid_score);
            if pair[0].hybrid_score == pair[1].hybrid_score {
                // Equal scores must preserve input order; keys are the
                // original indices.
                let a: usize = pair[0].key.as_str().parse().unwrap();
                let b: usize = pair[1].key.as_str().parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }

    #[test]
    fn compression_ratio_is_in_unit_range(
        word_counts in proptest::collection::vec(0usize..30, 0..40),
        core_size in 1usize..10,
        extended_size in 0usize..20,
        token_budget in 1usize..400,
    ) {
        let candidates: Vec<HybridCandidate> = word_counts
            .iter()
            .enumerate()
            .map(|(i, words)| {
                let text = vec!["word"; *words].join(" ");
                hybrid(&format!("id-{i}"), &text)
            })
            .collect();
        let len = candidates.len();
        let profile = ModeProfile {
            core_size,
            extended_size,
            token_budget,
            latency_budget_ms: 100,
        };
        let estimator = TokenEstimator::default();
        let out = compress(
            candidates,
            &profile,
            token_budget,
            MitigationStrategy::Edges,
            &estimator,
        );

        prop_assert!(out.compression_ratio >= 0.0);
        prop_assert!(out.compression_ratio <= 1.0);
        prop_assert_eq!(out.core.len(), core_size.min(len));
        // Extended is only dropped wholesale when core alone overflows.
        let core_tokens: usize = out.core.iter().map(|c| estimator.estimate(&c.text)).sum();
        if core_tokens > token_budget {
            prop_assert!(out.extended.is_empty());
        } else {
            prop_assert!(out.token_count <= token_budget);
        }
    }
}
