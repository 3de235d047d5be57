use std::fmt;

use serde::{Deserialize, Serialize};

/// One independent retrieval backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Vector-similarity index.
    Vector,
    /// Multi-hop graph reasoner.
    Graph,
    /// Probabilistic (Bayesian) inference engine.
    Probabilistic,
}

impl Tier {
    /// All tiers, in fusion order.
    pub const ALL: [Tier; 3] = [Tier::Vector, Tier::Graph, Tier::Probabilistic];

    /// Lowercase tier name as it appears in logs and serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Vector => "vector",
            Tier::Graph => "graph",
            Tier::Probabilistic => "probabilistic",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
