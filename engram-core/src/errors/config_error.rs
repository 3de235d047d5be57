/// Deployment configuration errors. Fatal at engine construction,
/// never silently clamped.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("tier weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },

    #[error("tier weight for {tier} is negative: {value}")]
    NegativeWeight { tier: &'static str, value: f64 },

    #[error("{name} must be within [0.0, 1.0], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be positive")]
    NonPositive { name: &'static str },

    #[error("mode profile {mode}: {field} must be positive")]
    NonPositiveProfileField {
        mode: &'static str,
        field: &'static str,
    },

    #[error("failed to parse configuration: {reason}")]
    Parse { reason: String },
}
