use crate::Arbitrary;
use crate::Distance;
use crate::Error;
use crate::Result;
use ndarray::Array2;

/// An ordered set of fixed-dimensional points sampled from one modality.
///
/// Row i is point i. All rows share the same dimensionality, but two
/// clouds being compared need not: only intra-cloud distances ever leave
/// this type.
#[derive(Debug, Clone)]
pub struct Cloud(Array2<Distance>);

impl Cloud {
    /// number of points
    pub fn n(&self) -> usize {
        self.0.nrows()
    }
    /// ambient dimensionality
    pub fn dim(&self) -> usize {
        self.0.ncols()
    }
    pub fn points(&self) -> &Array2<Distance> {
        &self.0
    }
}

impl TryFrom<Vec<Vec<Distance>>> for Cloud {
    type Error = Error;

    fn try_from(points: Vec<Vec<Distance>>) -> Result<Self> {
        let n = points.len();
        if n == 0 {
            return Err(Error::InvalidInput("empty point cloud".to_string()));
        }
        let dim = points[0].len();
        if dim == 0 {
            return Err(Error::InvalidInput("zero-dimensional points".to_string()));
        }
        for (i, point) in points.iter().enumerate() {
            if point.len() != dim {
                return Err(Error::InvalidInput(format!(
                    "inconsistent dimensionality: point {} has {} coordinates, expected {}",
                    i,
                    point.len(),
                    dim
                )));
            }
            if point.iter().any(|x| !x.is_finite()) {
                return Err(Error::InvalidInput(format!(
                    "non-finite coordinate in point {}",
                    i
                )));
            }
        }
        Ok(Self(Array2::from_shape_fn((n, dim), |(i, j)| points[i][j])))
    }
}

impl Arbitrary for Cloud {
    fn random() -> Self {
        let n = rand::random_range(2..=8);
        let dim = rand::random_range(2..=4);
        Self(Array2::from_shape_fn((n, dim), |_| {
            rand::random::<Distance>() * 2. - 1.
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_cloud() {
        let cloud = Cloud::try_from(vec![vec![0., 0.], vec![1., 0.], vec![0., 1.]]).unwrap();
        assert_eq!(cloud.n(), 3);
        assert_eq!(cloud.dim(), 2);
    }

    #[test]
    fn rejects_empty_cloud() {
        let result = Cloud::try_from(Vec::new());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_ragged_cloud() {
        let result = Cloud::try_from(vec![vec![0., 0.], vec![1.]]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_zero_dimensional_points() {
        let result = Cloud::try_from(vec![vec![]]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let result = Cloud::try_from(vec![vec![0., f64::NAN]]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn random_cloud_is_well_formed() {
        let cloud = Cloud::random();
        assert!(cloud.n() >= 2);
        assert!(cloud.dim() >= 2);
    }
}
