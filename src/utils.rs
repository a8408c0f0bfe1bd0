//! Utility functions for k-means clustering

use crate::error::{Error, Result};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Find the closest centroid for a given data point
///
/// Ties are broken by the lowest centroid index.
pub fn find_closest_centroid<F>(
    point: ArrayView1<f64>,
    centroids: ArrayView2<f64>,
    distance_fn: F,
) -> Result<usize>
where
    F: Fn(ArrayView1<f64>, ArrayView1<f64>) -> Result<f64>,
{
    if centroids.nrows() == 0 {
        return Err(Error::invalid_data("No centroids provided"));
    }

    if centroids.ncols() != point.len() {
        return Err(Error::dimension_mismatch(point.len(), centroids.ncols()));
    }

    let mut min_distance = f64::INFINITY;
    let mut closest_centroid = 0;

    for (i, centroid) in centroids.rows().into_iter().enumerate() {
        let distance = distance_fn(point, centroid)?;
        if distance < min_distance {
            min_distance = distance;
            closest_centroid = i;
        }
    }

    Ok(closest_centroid)
}

/// Assign all data points to their closest centroids
///
/// Produces a full replacement of the assignment array on every call;
/// assignments are never patched incrementally.
pub fn assign_points_to_centroids<F>(
    data: ArrayView2<f64>,
    centroids: ArrayView2<f64>,
    distance_fn: F,
) -> Result<Array1<usize>>
where
    F: Fn(ArrayView1<f64>, ArrayView1<f64>) -> Result<f64> + Copy,
{
    let mut assignments = Array1::zeros(data.nrows());

    for (i, point) in data.rows().into_iter().enumerate() {
        assignments[i] = find_closest_centroid(point, centroids, distance_fn)?;
    }

    Ok(assignments)
}

/// Sum of squared deviations from the arithmetic mean of a feature column
///
/// Returns 0 for a column of length <= 1.
pub fn column_squared_error(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum()
}

/// Total within-cluster sum of squares for the given assignment
///
/// For each cluster, sums [`column_squared_error`] over every feature column
/// of the rows assigned to it. A cluster with no assigned rows contributes 0.
/// The objective depends only on the data and the assignment, not on the
/// current centroid snapshot.
pub fn total_within_ss(
    data: ArrayView2<f64>,
    n_clusters: usize,
    assignments: ArrayView1<usize>,
) -> f64 {
    let cluster_indices = get_cluster_indices(assignments, n_clusters);
    let mut total = 0.0;

    for indices in &cluster_indices {
        if indices.is_empty() {
            continue;
        }

        for col_idx in 0..data.ncols() {
            let column_values: Vec<f64> =
                indices.iter().map(|&row_idx| data[[row_idx, col_idx]]).collect();
            total += column_squared_error(&column_values);
        }
    }

    total
}

/// Get indices of points assigned to each cluster
pub fn get_cluster_indices(assignments: ArrayView1<usize>, n_clusters: usize) -> Vec<Vec<usize>> {
    let mut cluster_indices = vec![Vec::new(); n_clusters];

    for (point_idx, &cluster_id) in assignments.iter().enumerate() {
        if cluster_id < n_clusters {
            cluster_indices[cluster_id].push(point_idx);
        }
    }

    cluster_indices
}

/// Calculate cluster sizes
pub fn cluster_sizes(assignments: ArrayView1<usize>, n_clusters: usize) -> Vec<usize> {
    let mut sizes = vec![0; n_clusters];

    for &cluster_id in assignments.iter() {
        if cluster_id < n_clusters {
            sizes[cluster_id] += 1;
        }
    }

    sizes
}

/// Euclidean norm of each centroid, one scalar per centroid
pub fn centroid_norms(centroids: ArrayView2<f64>) -> Array1<f64> {
    let mut norms = Array1::zeros(centroids.nrows());

    for (i, centroid) in centroids.rows().into_iter().enumerate() {
        norms[i] = centroid.iter().map(|v| v * v).sum::<f64>().sqrt();
    }

    norms
}

/// Euclidean distance between two centroid norm vectors
///
/// Used by the convergence check: the iteration has stabilized when this
/// shift is numerically indistinguishable from zero.
pub fn norm_shift(previous: ArrayView1<f64>, current: ArrayView1<f64>) -> f64 {
    previous
        .iter()
        .zip(current.iter())
        .map(|(p, c)| (p - c).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Validate clustering parameters
pub fn validate_parameters(
    n_clusters: usize,
    max_iter: usize,
    tol: f64,
    n_init: usize,
) -> Result<()> {
    if n_clusters == 0 {
        return Err(Error::invalid_parameter("n_clusters must be > 0"));
    }

    if max_iter == 0 {
        return Err(Error::invalid_parameter("max_iter must be > 0"));
    }

    if tol < 0.0 {
        return Err(Error::invalid_parameter("tol must be >= 0"));
    }

    if n_init == 0 {
        return Err(Error::invalid_parameter("n_init must be > 0"));
    }

    Ok(())
}

/// Validate input data
pub fn validate_data(data: ArrayView2<f64>) -> Result<()> {
    if data.nrows() == 0 {
        return Err(Error::invalid_data("Data cannot be empty"));
    }

    if data.ncols() == 0 {
        return Err(Error::invalid_data("Data must have at least one feature"));
    }

    Ok(())
}
