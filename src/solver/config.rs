use crate::Distance;
use crate::Entropy;
use crate::Error;
use crate::Result;

/// hyperparameters of the entropic solver, fixed for the duration of one
/// alignment call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// entropic regularization strength (> 0). smaller is closer to the
    /// unregularized optimum but numerically harder.
    pub epsilon: Entropy,
    /// cap on outer iterations (> 0). exhausting it is normal
    /// termination, not an error.
    pub max_iterations: usize,
    /// convergence threshold (> 0) on total-variation change of the
    /// coupling, shared with the inner scaling loop.
    pub tolerance: Distance,
}

impl SolverConfig {
    /// surface bad hyperparameters before any computation begins
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0. {
            return Err(Error::InvalidConfig(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "maxIter must be positive".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0. {
            return Err(Error::InvalidConfig(format!(
                "tol must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: crate::DEFAULT_EPSILON,
            max_iterations: crate::DEFAULT_MAX_ITERATIONS,
            tolerance: crate::DEFAULT_TOLERANCE,
        }
    }
}
