use engram_tokens::TokenEstimator;
use proptest::prelude::*;

proptest! {
    #[test]
    fn estimate_never_exceeds_input_length(s in ".*") {
        let estimator = TokenEstimator::default();
        prop_assert!(estimator.estimate(&s) <= s.len());
    }

    #[test]
    fn cached_equals_uncached(s in ".{0,200}") {
        let estimator = TokenEstimator::default();
        let uncached = estimator.estimate(&s);
        let cached = estimator.estimate_cached(&s);
        prop_assert_eq!(uncached, cached);
    }

    #[test]
    fn concatenation_is_subadditive(a in ".{0,100}", b in ".{0,100}") {
        // Joining two texts can merge the boundary words but never
        // create new ones.
        let estimator = TokenEstimator::default();
        let combined = format!("{a}{b}");
        prop_assert!(
            estimator.estimate(&combined) <= estimator.estimate(&a) + estimator.estimate(&b)
        );
    }

    #[test]
    fn whitespace_only_counts_zero(s in "[ \\t\\n]{0,40}") {
        let estimator = TokenEstimator::default();
        prop_assert_eq!(estimator.estimate(&s), 0);
    }
}
