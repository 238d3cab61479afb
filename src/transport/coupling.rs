use crate::Distance;
use crate::Probability;

/// a transport plan between two distributions, together with the
/// procedure that produces it.
///
/// implementors carry their own working state; `minimize` consumes and
/// returns Self so a solve reads as a single expression at the call site.
pub trait Coupling {
    /// run the solver to (approximate) optimality
    fn minimize(self) -> Self;
    /// mass transported from x to y under the current plan
    fn flow(&self, x: usize, y: usize) -> Probability;
    /// objective value of the current plan
    fn cost(&self) -> Distance;
}
