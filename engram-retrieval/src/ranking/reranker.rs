//! Optional precision reranking of the ranked head.
//!
//! Only the top `top_k` candidates are sent to the precision model; the
//! tail is appended unchanged after the reranked head. Reranking refines
//! the head, it never promotes a tail candidate above it. Any adapter
//! failure falls back to the pre-rerank hybrid ordering.

use engram_core::candidate::HybridCandidate;
use engram_core::traits::IReranker;
use tracing::{debug, warn};

/// Rerank the head of `ranked` with the precision model.
///
/// The precision score is blended into `hybrid_score` as
/// `blend · precision + (1 − blend) · hybrid` and the head is re-sorted
/// by the blended score. Returns the list plus whether reranking was
/// actually applied.
pub async fn rerank(
    ranked: Vec<HybridCandidate>,
    reranker: Option<&dyn IReranker>,
    query: &str,
    top_k: usize,
    blend: f64,
) -> (Vec<HybridCandidate>, bool) {
    let Some(reranker) = reranker else {
        return (ranked, false);
    };
    if ranked.is_empty() || top_k == 0 {
        return (ranked, false);
    }

    let head_len = top_k.min(ranked.len());
    let texts: Vec<String> = ranked[..head_len].iter().map(|c| c.text.clone()).collect();

    let outcome = match reranker.rerank(query, &texts, head_len).await {
        Ok(outcome) if outcome.scores.len() == head_len => outcome,
        Ok(outcome) => {
            warn!(
                expected = head_len,
                got = outcome.scores.len(),
                "reranker returned a mismatched score count, keeping hybrid order"
            );
            return (ranked, false);
        }
        Err(e) => {
            warn!(error = %e, "rerank failed, keeping hybrid order");
            return (ranked, false);
        }
    };

    let mut head = ranked;
    let tail = head.split_off(head_len);

    for (candidate, precision) in head.iter_mut().zip(outcome.scores.iter()) {
        let precision = precision.clamp(0.0, 1.0);
        candidate.hybrid_score = blend * precision + (1.0 - blend) * candidate.hybrid_score;
    }
    head.sort_by(|a, b| {
        b.hybrid_score
            .partial_cmp(&a.hybrid_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        model = %outcome.stats.model,
        latency_ms = outcome.stats.latency_ms,
        reranked = head_len,
        "precision rerank complete"
    );

    head.extend(tail);
    (head, true)
}
