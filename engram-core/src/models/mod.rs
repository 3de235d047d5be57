//! Request and result models for the fusion pipeline.

mod pipeline_result;
mod rerank;
mod stats;

pub use pipeline_result::PipelineResult;
pub use rerank::{RerankOutcome, RerankStats};
pub use stats::{PipelineStats, StageCounts, StageTimings, TierReport, TierStatus};
