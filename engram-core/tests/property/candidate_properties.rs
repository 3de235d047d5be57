use engram_core::candidate::Candidate;
use engram_core::tier::Tier;
use proptest::prelude::*;

proptest! {
    #[test]
    fn key_derivation_is_total_and_non_empty(
        id in proptest::option::of(".{0,32}"),
        text in ".{0,400}",
    ) {
        let candidate = Candidate {
            id,
            text,
            score: 0.5,
            tier: Tier::Vector,
            metadata: serde_json::Value::Null,
        };
        let key = candidate.key();
        prop_assert!(!key.as_str().is_empty());
    }

    #[test]
    fn key_is_deterministic(text in ".{0,400}") {
        let candidate = Candidate {
            id: None,
            text,
            score: 0.5,
            tier: Tier::Graph,
            metadata: serde_json::Value::Null,
        };
        prop_assert_eq!(candidate.key(), candidate.key());
    }

    #[test]
    fn text_fallback_key_never_exceeds_200_chars(text in ".{1,400}") {
        let candidate = Candidate {
            id: None,
            text,
            score: 0.5,
            tier: Tier::Probabilistic,
            metadata: serde_json::Value::Null,
        };
        prop_assert!(candidate.key().as_str().chars().count() <= 200);
    }
}
