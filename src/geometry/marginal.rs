use crate::transport::density::Density;
use crate::Error;
use crate::Probability;
use crate::Result;
use ndarray::Array1;

/// A probability distribution over the indices of one cloud.
///
/// Default is uniform; callers may supply their own weights, which are
/// normalized to unit mass on construction.
#[derive(Debug, Clone)]
pub struct Marginal(Array1<Probability>);

impl Marginal {
    /// uniform weight 1/n on each of n points
    pub fn uniform(n: usize) -> Self {
        Self(Array1::from_elem(n, 1. / n as Probability))
    }
    /// number of atoms
    pub fn n(&self) -> usize {
        self.0.len()
    }
    pub fn weights(&self) -> &Array1<Probability> {
        &self.0
    }
}

impl TryFrom<Vec<Probability>> for Marginal {
    type Error = Error;

    fn try_from(weights: Vec<Probability>) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::InvalidInput("empty marginal".to_string()));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.) {
            return Err(Error::InvalidInput(
                "marginal weights must be finite and non-negative".to_string(),
            ));
        }
        let mass = weights.iter().sum::<Probability>();
        if mass <= 0. {
            return Err(Error::InvalidInput(
                "marginal must carry positive mass".to_string(),
            ));
        }
        Ok(Self(Array1::from_vec(weights).mapv(|w| w / mass)))
    }
}

impl Density for Marginal {
    fn density(&self, x: usize) -> Probability {
        self.0[x]
    }
    fn support(&self) -> impl Iterator<Item = usize> {
        0..self.n()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sums_to_one() {
        let marginal = Marginal::uniform(7);
        let mass = marginal.support().map(|i| marginal.density(i)).sum::<f64>();
        assert!((mass - 1.).abs() < 1e-12);
    }

    #[test]
    fn normalizes_supplied_weights() {
        let marginal = Marginal::try_from(vec![1., 3.]).unwrap();
        assert!((marginal.density(0) - 0.25).abs() < 1e-12);
        assert!((marginal.density(1) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn rejects_negative_weights() {
        let result = Marginal::try_from(vec![0.5, -0.5]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_zero_mass() {
        let result = Marginal::try_from(vec![0., 0.]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
