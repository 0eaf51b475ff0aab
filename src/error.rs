use thiserror::Error;

/// Failures raised while building boards or driving a search.
///
/// An unsolvable board is not an error: it is reported by the solver as a
/// regular outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The tile grid (or its text form) is malformed.
    #[error("invalid input: {detail}")]
    InvalidInput { detail: String },

    /// An internal consistency check failed. Unreachable for valid boards.
    #[error("invariant violated: {detail}")]
    InvariantViolation { detail: String },
}

impl PuzzleError {
    pub(crate) fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidInput {
            detail: detail.into(),
        }
    }

    pub(crate) fn invariant(detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            detail: detail.into(),
        }
    }
}
