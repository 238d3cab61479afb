use super::config::SolverConfig;
use super::gromov::Gromov;
use crate::geometry::cloud::Cloud;
use crate::geometry::marginal::Marginal;
use crate::geometry::metric::Metric;
use crate::transport::coupling::Coupling;
use crate::Distance;
use crate::Result;

/// Gromov-Wasserstein distance between two point clouds.
///
/// Validates the configuration, collapses each cloud into its pairwise
/// Euclidean distance matrix with uniform weights, runs the entropic
/// solver, and returns the square root of the divergence (the square root
/// makes the value behave like a metric in the induced space).
///
/// The pair is oriented by a deterministic order on the two matrices
/// before solving, so swapping the arguments runs the identical
/// computation and symmetry holds exactly, not just up to the solver's
/// stationary-point sensitivity.
///
/// Pure: no state survives the call, and concurrent calls never interact.
pub fn measure(x: &Cloud, y: &Cloud, config: Option<SolverConfig>) -> Result<Distance> {
    let config = config.unwrap_or_default();
    config.validate()?;
    let ref cx = Metric::from(x);
    let ref cy = Metric::from(y);
    let ref p = Marginal::uniform(x.n());
    let ref q = Marginal::uniform(y.n());
    let divergence = match cy.precedes(cx) {
        true => Gromov::from((cy, cx, q, p, config)).minimize().cost(),
        false => Gromov::from((cx, cy, p, q, config)).minimize().cost(),
    };
    Ok(divergence.sqrt())
}
