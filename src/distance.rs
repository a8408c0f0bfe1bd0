//! Distance metrics for numerical feature vectors

use crate::error::{Error, Result};
use ndarray::{ArrayView1, ArrayView2};

/// Trait for computing distances between numerical data points
pub trait Distance {
    /// Compute the distance between two feature vectors
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64>;

    /// Compute distances between a single point and multiple centroids
    fn distances_to_centroids(
        &self,
        point: ArrayView1<f64>,
        centroids: ArrayView2<f64>,
    ) -> Result<Vec<f64>>;
}

/// Euclidean distance between feature vectors: `sqrt(sum((a_i - b_i)^2))`
///
/// NaN and infinite inputs propagate through the computation; sanitizing
/// input is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct Euclidean;

impl Distance for Euclidean {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
        if a.len() != b.len() {
            return Err(Error::dimension_mismatch(a.len(), b.len()));
        }

        let sum_sq_diff = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f64>();

        Ok(sum_sq_diff.sqrt())
    }

    fn distances_to_centroids(
        &self,
        point: ArrayView1<f64>,
        centroids: ArrayView2<f64>,
    ) -> Result<Vec<f64>> {
        if centroids.ncols() != point.len() {
            return Err(Error::dimension_mismatch(point.len(), centroids.ncols()));
        }

        let mut distances = Vec::with_capacity(centroids.nrows());
        for centroid_row in centroids.rows() {
            distances.push(self.distance(point, centroid_row)?);
        }
        Ok(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_euclidean_distance() {
        let metric = Euclidean;
        let a = ndarray::arr1(&[1.0, 2.0, 3.0]);
        let b = ndarray::arr1(&[4.0, 5.0, 6.0]);

        let result = metric.distance(a.view(), b.view()).unwrap();
        let expected = ((3.0_f64).powi(2) * 3.0).sqrt();
        assert!((result - expected).abs() < 1e-10);
    }

    #[test]
    fn test_euclidean_identical_points() {
        let metric = Euclidean;
        let a = ndarray::arr1(&[1.5, -2.5, 0.0]);

        assert_eq!(metric.distance(a.view(), a.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let metric = Euclidean;
        let a = ndarray::arr1(&[1.0, 2.0]);
        let b = ndarray::arr1(&[1.0, 2.0, 3.0]);

        let result = metric.distance(a.view(), b.view());
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_nan_propagates() {
        let metric = Euclidean;
        let a = ndarray::arr1(&[f64::NAN, 0.0]);
        let b = ndarray::arr1(&[0.0, 0.0]);

        let result = metric.distance(a.view(), b.view()).unwrap();
        assert!(result.is_nan());
    }

    #[test]
    fn test_distances_to_centroids() {
        let metric = Euclidean;
        let point = ndarray::arr1(&[0.0, 0.0]);
        let centroids =
            Array2::from_shape_vec((2, 2), vec![3.0, 4.0, 0.0, 1.0]).unwrap();

        let distances = metric
            .distances_to_centroids(point.view(), centroids.view())
            .unwrap();
        assert_eq!(distances.len(), 2);
        assert!((distances[0] - 5.0).abs() < 1e-10);
        assert!((distances[1] - 1.0).abs() < 1e-10);
    }
}
