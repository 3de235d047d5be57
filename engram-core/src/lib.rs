//! # engram-core
//!
//! Foundation crate for the Engram query-fusion layer.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod candidate;
pub mod config;
pub mod constants;
pub mod errors;
pub mod mode;
pub mod models;
pub mod tier;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use candidate::{Candidate, CandidateKey, HybridCandidate};
pub use config::{FusionConfig, MitigationStrategy, TierWeights};
pub use errors::{EngramError, EngramResult};
pub use mode::{Mode, ModeProfile, ModeTable};
pub use tier::Tier;
