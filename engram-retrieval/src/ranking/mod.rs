//! Ranking: weighted hybrid scoring, then optional precision reranking.
//!
//! Stages are explicit functions composed by the engine; the scorer is
//! pure, the reranker talks to an external model through its adapter.

pub mod reranker;
pub mod scorer;
