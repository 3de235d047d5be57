use serde::{Deserialize, Serialize};

use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::ConfigError;
use crate::mode::ModeTable;
use crate::tier::Tier;

mod defaults {
    pub const CONFIDENCE_THRESHOLD: f64 = 0.3;
    pub const DEDUP_SIMILARITY_THRESHOLD: f64 = 0.95;
    pub const RERANK_TOP_K: usize = 30;
    pub const RERANK_BLEND: f64 = 0.5;
    pub const POSITION_EDGE_BOOST: f64 = 0.5;
    pub const TIER_TIMEOUT_MS: u64 = 250;
    pub const GRAPH_MAX_HOPS: u8 = 2;
}

/// Per-tier weights for the hybrid score. Must sum to 1.0 so the hybrid
/// score stays in [0.0, 1.0] whenever each component does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TierWeights {
    pub vector: f64,
    pub graph: f64,
    pub probabilistic: f64,
}

impl TierWeights {
    pub fn weight(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Vector => self.vector,
            Tier::Graph => self.graph,
            Tier::Probabilistic => self.probabilistic,
        }
    }

    pub fn sum(&self) -> f64 {
        self.vector + self.graph + self.probabilistic
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            vector: 0.4,
            graph: 0.4,
            probabilistic: 0.2,
        }
    }
}

/// Context-ordering mitigation applied to combat degraded attention in
/// the middle of a long context window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MitigationStrategy {
    /// Keep rank order unchanged.
    None,
    /// Best item first, second-best last, alternating front/back so the
    /// most relevant items sit at the boundaries.
    #[default]
    Edges,
    /// Alternate between the top half and bottom half of the ranked list.
    Interleave,
    /// Keep the first and last elements fixed, reverse everything between.
    ReverseMiddle,
}

/// Fusion pipeline configuration.
///
/// Validated once at engine construction. The pipeline holds it
/// immutably, so a single engine is safe to share across concurrent
/// requests without locking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Per-tier weights for hybrid scoring.
    pub tier_weights: TierWeights,
    /// Hybrid candidates whose best per-tier score falls below this
    /// floor are dropped before dedup and ranking.
    pub confidence_threshold: f64,
    /// Cosine similarity at or above which two candidates count as
    /// near-duplicates.
    pub dedup_similarity_threshold: f64,
    /// How many ranked candidates are sent to the precision reranker.
    pub rerank_top_k: usize,
    /// Blend between precision score and hybrid score
    /// (1.0 = precision only, 0.0 = hybrid only).
    pub rerank_blend: f64,
    /// Context-ordering mitigation applied to the extended list.
    pub mitigation: MitigationStrategy,
    /// Edge boost for the position-weight curve.
    pub position_edge_boost: f64,
    /// Per-tier recall timeout in milliseconds.
    pub tier_timeout_ms: u64,
    /// Hop limit forwarded to the graph reasoner.
    pub graph_max_hops: u8,
    /// Per-mode sizing profiles.
    pub modes: ModeTable,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            tier_weights: TierWeights::default(),
            confidence_threshold: defaults::CONFIDENCE_THRESHOLD,
            dedup_similarity_threshold: defaults::DEDUP_SIMILARITY_THRESHOLD,
            rerank_top_k: defaults::RERANK_TOP_K,
            rerank_blend: defaults::RERANK_BLEND,
            mitigation: MitigationStrategy::default(),
            position_edge_boost: defaults::POSITION_EDGE_BOOST,
            tier_timeout_ms: defaults::TIER_TIMEOUT_MS,
            graph_max_hops: defaults::GRAPH_MAX_HOPS,
            modes: ModeTable::default(),
        }
    }
}

impl FusionConfig {
    /// Validate deployment configuration.
    ///
    /// Invalid configuration is fatal at construction time and is never
    /// silently clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tier in Tier::ALL {
            let value = self.tier_weights.weight(tier);
            if value < 0.0 {
                return Err(ConfigError::NegativeWeight {
                    tier: tier.as_str(),
                    value,
                });
            }
        }
        let sum = self.tier_weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }
        Self::check_unit_range("confidence_threshold", self.confidence_threshold)?;
        Self::check_unit_range("dedup_similarity_threshold", self.dedup_similarity_threshold)?;
        Self::check_unit_range("rerank_blend", self.rerank_blend)?;
        if self.position_edge_boost < 0.0 {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "position_edge_boost",
                value: self.position_edge_boost,
            });
        }
        if self.rerank_top_k == 0 {
            return Err(ConfigError::NonPositive {
                name: "rerank_top_k",
            });
        }
        if self.tier_timeout_ms == 0 {
            return Err(ConfigError::NonPositive {
                name: "tier_timeout_ms",
            });
        }
        for (name, profile) in [
            ("execution", self.modes.execution),
            ("planning", self.modes.planning),
            ("brainstorming", self.modes.brainstorming),
        ] {
            if profile.core_size == 0 {
                return Err(ConfigError::NonPositiveProfileField {
                    mode: name,
                    field: "core_size",
                });
            }
            if profile.token_budget == 0 {
                return Err(ConfigError::NonPositiveProfileField {
                    mode: name,
                    field: "token_budget",
                });
            }
            if profile.latency_budget_ms == 0 {
                return Err(ConfigError::NonPositiveProfileField {
                    mode: name,
                    field: "latency_budget_ms",
                });
            }
        }
        Ok(())
    }

    /// Parse a TOML deployment config and validate it.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn check_unit_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ThresholdOutOfRange { name, value });
        }
        Ok(())
    }
}
