use std::fmt;

use serde::{Deserialize, Serialize};

/// Interaction mode selecting how much context the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Terse: the minimum context needed to execute a known task.
    Execution,
    /// Balanced: planning and review.
    Planning,
    /// Exploratory: wide context for brainstorming.
    Brainstorming,
}

impl Mode {
    /// Parse a caller-supplied mode string. Unrecognized values fall
    /// back to `Execution`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "planning" | "balanced" => Mode::Planning,
            "brainstorming" | "exploratory" => Mode::Brainstorming,
            _ => Mode::Execution,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Execution => "execution",
            Mode::Planning => "planning",
            Mode::Brainstorming => "brainstorming",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Execution
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result sizing and budgets for one interaction mode.
/// Supplied by the caller's deployment config, never mutated by the pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModeProfile {
    /// Highest-confidence results, always included.
    pub core_size: usize,
    /// Supplementary results, budget permitting.
    pub extended_size: usize,
    /// Hard cap on estimated output tokens.
    pub token_budget: usize,
    /// Whole-request latency target in milliseconds.
    pub latency_budget_ms: u64,
}

/// Per-mode profile table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeTable {
    pub execution: ModeProfile,
    pub planning: ModeProfile,
    pub brainstorming: ModeProfile,
}

impl ModeTable {
    pub fn profile(&self, mode: Mode) -> ModeProfile {
        match mode {
            Mode::Execution => self.execution,
            Mode::Planning => self.planning,
            Mode::Brainstorming => self.brainstorming,
        }
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self {
            execution: ModeProfile {
                core_size: 3,
                extended_size: 6,
                token_budget: 2_000,
                latency_budget_ms: 150,
            },
            planning: ModeProfile {
                core_size: 5,
                extended_size: 15,
                token_budget: 6_000,
                latency_budget_ms: 400,
            },
            brainstorming: ModeProfile {
                core_size: 8,
                extended_size: 24,
                token_budget: 12_000,
                latency_budget_ms: 800,
            },
        }
    }
}
