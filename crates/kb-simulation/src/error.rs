use kb_mechanics::MechError;

/// Convenience result type for simulation setup.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while loading or checking simulation setup.
///
/// Stepping a round never fails; these only come from configuration.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The scoring rules are invalid.
    #[error(transparent)]
    Mechanics(#[from] MechError),

    /// The setup document is not valid JSON or does not match the schema.
    #[error("cannot parse dice setup: {0}")]
    Parse(#[from] serde_json::Error),

    /// A face has a value but no anchor direction.
    #[error("face '{0}' has no anchor direction")]
    MissingAnchor(String),

    /// A physics or timing parameter is out of range.
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
}
