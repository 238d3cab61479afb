use crate::Probability;

/// generalization of any probability distribution over
/// the indices of a finite point set.
pub trait Density {
    fn density(&self, x: usize) -> Probability;
    fn support(&self) -> impl Iterator<Item = usize>;
}
