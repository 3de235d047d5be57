//! Error taxonomy for the Engram fusion layer.
//!
//! Tier failures are recovered inside the recall fan-out and never reach
//! callers; configuration errors are fatal at construction time.

mod adapter_error;
mod config_error;

pub use adapter_error::AdapterError;
pub use config_error::ConfigError;

/// Umbrella error for the fusion layer.
#[derive(Debug, thiserror::Error)]
pub enum EngramError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// Convenience result alias used across the workspace.
pub type EngramResult<T> = Result<T, EngramError>;
