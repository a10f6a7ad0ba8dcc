use thiserror::Error;

/// Failures surfaced by a single step attempt.
///
/// Both variants are fatal for the call: nothing is retried and partially
/// written buffers are left in an unspecified (but memory-safe) state, so
/// `out`/`err` must be overwritten before reuse after a failure.
#[derive(Debug, Error)]
pub enum StepError {
    /// A non-resizable buffer cannot be brought to the dimension of the
    /// presented state.
    #[error("cannot conform buffer of dimension {actual} to dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The user-supplied right-hand side reported a failure.
    #[error("derivative evaluation failed")]
    Evaluation(#[source] anyhow::Error),
}
