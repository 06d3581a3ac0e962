//! Error types for the scoring rules.

/// Errors that can occur while loading or checking scoring rules.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The rules document is not valid JSON or does not match the schema.
    #[error("cannot parse rules: {0}")]
    Parse(#[from] serde_json::Error),

    /// A combination requires a value that no face produces.
    #[error("combination '{combination}' requires value {value}, which no face produces")]
    UnknownFace {
        /// The combination that cannot be satisfied.
        combination: String,
        /// The value no face maps to.
        value: i32,
    },

    /// A combination was declared without any required values.
    #[error("combination '{0}' requires no values")]
    EmptyCombination(String),

    /// Two faces share the same name (names are compared case-insensitively).
    #[error("face '{0}' is declared more than once")]
    DuplicateFace(String),

    /// The rules are malformed in some other way.
    #[error("invalid rules: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for scoring rule operations.
pub type MechResult<T> = Result<T, MechError>;
