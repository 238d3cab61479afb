use thiserror::Error as ThisError;

/// Everything that can go wrong before the solver runs.
///
/// Slow convergence is deliberately absent: exhausting the iteration
/// budget is normal termination with a best-effort estimate, and numeric
/// instability is clamped and logged rather than surfaced.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// Malformed point cloud: empty, ragged, or non-finite coordinates.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Non-positive or non-finite solver hyperparameter.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
