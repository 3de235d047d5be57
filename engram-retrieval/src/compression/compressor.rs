//! Token-budget enforcement over the core/extended split.

use engram_core::candidate::HybridCandidate;
use engram_core::config::MitigationStrategy;
use engram_core::mode::ModeProfile;
use engram_tokens::TokenEstimator;
use tracing::{debug, warn};

use super::mitigation;

/// Output of the compression stage.
#[derive(Debug)]
pub struct CompressedContext {
    pub core: Vec<HybridCandidate>,
    pub extended: Vec<HybridCandidate>,
    pub token_count: usize,
    /// Final tokens / pre-compression tokens, 1.0 when nothing dropped.
    pub compression_ratio: f64,
}

/// Split the ranked list into core and extended sets, reorder the
/// extended set for context placement, and enforce the token budget.
///
/// Core stays in strict rank order and is always included whole: when
/// core alone exceeds the budget the overrun is logged and extended is
/// emptied, but core is never truncated. Extended candidates are
/// admitted in placement order until one would overflow the remaining
/// budget; candidates are never partially included.
pub fn compress(
    ranked: Vec<HybridCandidate>,
    profile: &ModeProfile,
    token_budget: usize,
    strategy: MitigationStrategy,
    estimator: &TokenEstimator,
) -> CompressedContext {
    let original_tokens: usize = ranked
        .iter()
        .map(|c| estimator.estimate_cached(&c.text))
        .sum();

    let mut core = ranked;
    let mut rest = core.split_off(profile.core_size.min(core.len()));
    rest.truncate(profile.extended_size);
    let extended = mitigation::reorder(rest, strategy);

    let core_tokens: usize = core
        .iter()
        .map(|c| estimator.estimate_cached(&c.text))
        .sum();

    if core_tokens > token_budget {
        warn!(
            core_tokens,
            token_budget, "core alone exceeds the token budget; dropping the extended set"
        );
        let compression_ratio = ratio(core_tokens, original_tokens);
        return CompressedContext {
            core,
            extended: Vec::new(),
            token_count: core_tokens,
            compression_ratio,
        };
    }

    let mut remaining = token_budget - core_tokens;
    let mut kept = Vec::with_capacity(extended.len());
    for candidate in extended {
        let tokens = estimator.estimate_cached(&candidate.text);
        if tokens > remaining {
            break;
        }
        remaining -= tokens;
        kept.push(candidate);
    }

    let token_count = core_tokens + kept.iter().map(|c| estimator.estimate_cached(&c.text)).sum::<usize>();
    let compression_ratio = ratio(token_count, original_tokens);
    debug!(
        core = core.len(),
        extended = kept.len(),
        token_count,
        compression_ratio,
        "compression complete"
    );

    CompressedContext {
        core,
        extended: kept,
        token_count,
        compression_ratio,
    }
}

fn ratio(final_tokens: usize, original_tokens: usize) -> f64 {
    if original_tokens == 0 {
        1.0
    } else {
        final_tokens as f64 / original_tokens as f64
    }
}
