//! # engram-retrieval
//!
//! The multi-tier query-fusion pipeline: recall fan-out over the vector,
//! graph, and probabilistic backends, tier-score fusion, confidence
//! filtering, near-duplicate elimination, weighted ranking, optional
//! precision reranking, and budget-aware compression with
//! context-ordering mitigation.
//!
//! Stages are plain functions over request-local data, wired together by
//! [`engine::RetrievalEngine`]. The engine holds only immutable
//! configuration and adapter handles, so one instance serves concurrent
//! requests without locking.

pub mod compression;
pub mod dedup;
pub mod engine;
pub mod filter;
pub mod fusion;
pub mod ranking;
pub mod recall;

mod stats;

pub use engine::{RetrievalEngine, RetrievalRequest};
pub use recall::TierAdapters;
