use super::cloud::Cloud;
use crate::Distance;
use ndarray::Array1;
use ndarray::Array2;

/// Pairwise Euclidean distance matrix over one cloud.
///
/// Symmetric, non-negative, zero diagonal. This is the only geometric
/// information the solver ever sees; the ambient coordinates are forgotten
/// once it is built, which is exactly what buys isometry invariance.
#[derive(Debug, Clone)]
pub struct Metric(Array2<Distance>);

impl Metric {
    /// number of points
    pub fn n(&self) -> usize {
        self.0.nrows()
    }
    pub fn matrix(&self) -> &Array2<Distance> {
        &self.0
    }
    pub fn distance(&self, x: usize, y: usize) -> Distance {
        self.0[[x, y]]
    }
    /// weighted second moment (C ∘ C) · w, one term of the squared-loss
    /// gradient decomposition
    pub fn moment(&self, weights: &Array1<Distance>) -> Array1<Distance> {
        self.0.mapv(|c| c * c).dot(weights)
    }
    /// deterministic total order: size first, then lexicographic entry
    /// comparison. used to orient a pair of metrics before solving, so
    /// both argument orders run the identical computation. two metrics
    /// that compare equal both ways are entry-identical.
    pub fn precedes(&self, other: &Self) -> bool {
        if self.n() != other.n() {
            return self.n() < other.n();
        }
        self.0
            .iter()
            .zip(other.0.iter())
            .find(|(a, b)| a != b)
            .is_some_and(|(a, b)| a < b)
    }
}

impl From<&Cloud> for Metric {
    fn from(cloud: &Cloud) -> Self {
        use rayon::prelude::*;
        let n = cloud.n();
        let points = cloud.points();
        let rows = (0..n)
            .into_par_iter()
            .map(|i| {
                (0..n)
                    .map(|j| {
                        (&points.row(i) - &points.row(j))
                            .mapv(|d| d * d)
                            .sum()
                            .sqrt()
                    })
                    .collect::<Vec<Distance>>()
            })
            .collect::<Vec<_>>();
        Self(Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::marginal::Marginal;
    use crate::Arbitrary;

    #[test]
    fn diagonal_is_zero() {
        let ref cloud = Cloud::random();
        let metric = Metric::from(cloud);
        for i in 0..metric.n() {
            assert!(metric.distance(i, i) == 0.);
        }
    }

    #[test]
    fn is_symmetric() {
        let ref cloud = Cloud::random();
        let metric = Metric::from(cloud);
        for i in 0..metric.n() {
            for j in 0..metric.n() {
                let dij = metric.distance(i, j);
                let dji = metric.distance(j, i);
                assert!((dij - dji).abs() < 1e-12, "{} != {}", dij, dji);
            }
        }
    }

    #[test]
    fn is_non_negative() {
        let ref cloud = Cloud::random();
        let metric = Metric::from(cloud);
        for i in 0..metric.n() {
            for j in 0..metric.n() {
                assert!(metric.distance(i, j) >= 0.);
            }
        }
    }

    #[test]
    fn matches_hand_computed_distances() {
        let ref cloud = Cloud::try_from(vec![vec![0., 0.], vec![3., 4.]]).unwrap();
        let metric = Metric::from(cloud);
        assert!((metric.distance(0, 1) - 5.).abs() < 1e-12);
    }

    #[test]
    fn orders_metrics_deterministically() {
        let ref a = Metric::from(&Cloud::try_from(vec![vec![0.], vec![1.]]).unwrap());
        let ref b = Metric::from(&Cloud::try_from(vec![vec![0.], vec![2.]]).unwrap());
        assert!(a.precedes(b));
        assert!(!b.precedes(a));
        assert!(!a.precedes(a));
    }

    #[test]
    fn moment_weights_squared_distances() {
        let ref cloud = Cloud::try_from(vec![vec![0.], vec![2.]]).unwrap();
        let metric = Metric::from(cloud);
        let moment = metric.moment(Marginal::uniform(2).weights());
        // each point sees one squared distance of 4 at weight 1/2
        assert!((moment[0] - 2.).abs() < 1e-12);
        assert!((moment[1] - 2.).abs() < 1e-12);
    }
}
