use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{KEY_TEXT_PREFIX_CHARS, UNKNOWN_KEY};
use crate::tier::Tier;

/// One result from one tier, pre-fusion.
///
/// Ephemeral: created per request from an adapter response and discarded
/// once fusion has folded it into a [`HybridCandidate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Backend-assigned id, if any.
    pub id: Option<String>,
    /// The retrievable content unit.
    pub text: String,
    /// Backend relevance score, documented range [0.0, 1.0].
    pub score: f64,
    /// Which backend produced this candidate.
    pub tier: Tier,
    /// Opaque backend metadata (chunk provenance, timestamps, ...).
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Candidate {
    /// Identity used to merge candidates across tiers.
    pub fn key(&self) -> CandidateKey {
        CandidateKey::derive(self)
    }
}

/// Identity under which candidates referring to the same underlying
/// content are merged. Two candidates with the same key represent the
/// same logical unit and must never both reach the output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateKey(String);

impl CandidateKey {
    /// Derive a key from a candidate, in priority order: explicit id,
    /// then `file_path::chunk_index` from metadata, then the first
    /// 200 characters of text, then the literal `"unknown"`.
    pub fn derive(candidate: &Candidate) -> Self {
        if let Some(id) = candidate.id.as_deref() {
            if !id.is_empty() {
                return Self(id.to_string());
            }
        }
        if let Some(key) = Self::from_chunk_metadata(&candidate.metadata) {
            return Self(key);
        }
        if !candidate.text.is_empty() {
            return Self(candidate.text.chars().take(KEY_TEXT_PREFIX_CHARS).collect());
        }
        Self(UNKNOWN_KEY.to_string())
    }

    /// `file_path::chunk_index`, when both fields are present.
    /// Backends disagree on whether chunk_index is a number or a string.
    fn from_chunk_metadata(metadata: &serde_json::Value) -> Option<String> {
        let file_path = metadata.get("file_path")?.as_str()?;
        let chunk = match metadata.get("chunk_index")? {
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => s.clone(),
            _ => return None,
        };
        Some(format!("{file_path}::{chunk}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fused record merging same-entity candidates across tiers.
///
/// Per-tier scores are `Option` so "this tier never scored the unit"
/// stays distinguishable from "this tier scored it 0.0".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridCandidate {
    pub key: CandidateKey,
    pub id: Option<String>,
    pub text: String,
    pub metadata: serde_json::Value,
    pub vector_score: Option<f64>,
    pub graph_score: Option<f64>,
    pub probabilistic_score: Option<f64>,
    /// Weighted combination of the tier components, set by ranking.
    pub hybrid_score: f64,
    /// Every tier that contributed at least one observation.
    pub source_tiers: BTreeSet<Tier>,
}

impl HybridCandidate {
    /// Start a hybrid record from the first candidate seen for a key.
    /// Tier scores are recorded separately via [`HybridCandidate::observe`].
    pub fn new(key: CandidateKey, candidate: &Candidate) -> Self {
        Self {
            key,
            id: candidate.id.clone(),
            text: candidate.text.clone(),
            metadata: candidate.metadata.clone(),
            vector_score: None,
            graph_score: None,
            probabilistic_score: None,
            hybrid_score: 0.0,
            source_tiers: BTreeSet::new(),
        }
    }

    /// The score this tier has assigned, if it responded for this unit.
    pub fn tier_score(&self, tier: Tier) -> Option<f64> {
        match tier {
            Tier::Vector => self.vector_score,
            Tier::Graph => self.graph_score,
            Tier::Probabilistic => self.probabilistic_score,
        }
    }

    /// Record a per-tier observation. When the same tier reports the
    /// same unit more than once, the maximum score wins: a unit is not
    /// penalized for also appearing with a low score.
    pub fn observe(&mut self, tier: Tier, score: f64) {
        let slot = match tier {
            Tier::Vector => &mut self.vector_score,
            Tier::Graph => &mut self.graph_score,
            Tier::Probabilistic => &mut self.probabilistic_score,
        };
        *slot = Some(slot.map_or(score, |existing| existing.max(score)));
        self.source_tiers.insert(tier);
    }

    /// Best per-tier component observed so far, before weighting.
    /// Used by the confidence filter ahead of ranking.
    pub fn best_component(&self) -> f64 {
        [self.vector_score, self.graph_score, self.probabilistic_score]
            .into_iter()
            .flatten()
            .fold(0.0, f64::max)
    }
}
