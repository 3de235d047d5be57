/// Engram system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Leading characters of candidate text used as the key-derivation fallback.
pub const KEY_TEXT_PREFIX_CHARS: usize = 200;

/// Candidate key of last resort when no identity can be derived.
pub const UNKNOWN_KEY: &str = "unknown";

/// Tolerance when validating that tier weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
