//! Exact and near-duplicate elimination.
//!
//! The exact pass hashes candidate text and keeps the first occurrence,
//! O(n). The near pass encodes all surviving texts in one batch call,
//! then walks candidates in their current (rank-stable) order and drops
//! any whose similarity to an already-accepted vector reaches the
//! threshold. The single batch encode is the performance contract:
//! re-encoding per pair would turn an O(n²) compare into O(n²) inference
//! calls and must never be reintroduced.

use std::collections::HashSet;

use engram_core::candidate::HybridCandidate;
use engram_core::traits::IEncoder;
use tracing::{debug, warn};

/// Remove exact duplicates by text content. First occurrence wins.
pub fn dedup_exact(candidates: Vec<HybridCandidate>) -> Vec<HybridCandidate> {
    let mut seen: HashSet<[u8; 32]> = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|c| seen.insert(*blake3::hash(c.text.as_bytes()).as_bytes()))
        .collect()
}

/// Remove near-duplicates using a single batch encode plus cosine
/// comparison against the already-accepted set.
///
/// Degrades gracefully: without a usable encoder, or when the encode
/// call fails, the input is returned unchanged.
pub fn dedup_near(
    candidates: Vec<HybridCandidate>,
    encoder: Option<&dyn IEncoder>,
    threshold: f64,
) -> Vec<HybridCandidate> {
    let encoder = match encoder {
        Some(encoder) if encoder.is_available() => encoder,
        _ => return candidates,
    };
    if candidates.len() < 2 {
        return candidates;
    }

    let texts: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
    let vectors = match encoder.encode_batch(&texts) {
        Ok(vectors) if vectors.len() == texts.len() => vectors,
        Ok(vectors) => {
            warn!(
                expected = texts.len(),
                got = vectors.len(),
                encoder = encoder.name(),
                "encoder returned a mismatched batch, skipping near-duplicate pass"
            );
            return candidates;
        }
        Err(e) => {
            warn!(
                error = %e,
                encoder = encoder.name(),
                "batch encode failed, skipping near-duplicate pass"
            );
            return candidates;
        }
    };

    let before = candidates.len();
    let mut accepted: Vec<HybridCandidate> = Vec::with_capacity(before);
    let mut accepted_vectors: Vec<&[f32]> = Vec::with_capacity(before);

    for (candidate, vector) in candidates.into_iter().zip(vectors.iter()) {
        let duplicate = accepted_vectors
            .iter()
            .any(|kept| cosine_similarity(kept, vector) >= threshold);
        if duplicate {
            continue;
        }
        accepted.push(candidate);
        accepted_vectors.push(vector.as_slice());
    }

    if accepted.len() < before {
        debug!(
            dropped = before - accepted.len(),
            threshold, "near-duplicate pass dropped candidates"
        );
    }
    accepted
}

/// Cosine similarity between two vectors. Returns 0.0 when either norm
/// is zero or the dimensions disagree.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
