//! Centroid initialization methods for k-means clustering

use crate::distance::{Distance, Euclidean};
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};
use rand::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

/// Initialization methods for k-means clustering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitMethod {
    /// Random initialization - randomly select data points as initial centroids
    Random,
    /// K-means++ initialization - greedy farthest-point seeding that spreads
    /// the initial centroids apart
    #[default]
    KMeansPlusPlus,
}

impl FromStr for InitMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(InitMethod::Random),
            "kmeans++" | "k-means++" => Ok(InitMethod::KMeansPlusPlus),
            other => Err(Error::invalid_parameter(format!(
                "Unknown initialization method: {other}"
            ))),
        }
    }
}

/// Initialize centroids for k-means clustering
pub fn initialize_centroids<R>(
    data: ArrayView2<f64>,
    n_clusters: usize,
    method: InitMethod,
    rng: &mut R,
) -> Result<Array2<f64>>
where
    R: Rng,
{
    if n_clusters == 0 {
        return Err(Error::invalid_parameter("Number of clusters must be > 0"));
    }

    if n_clusters > data.nrows() {
        return Err(Error::invalid_parameter(
            "Number of clusters cannot exceed number of data points",
        ));
    }

    match method {
        InitMethod::Random => random_init(data, n_clusters, rng),
        InitMethod::KMeansPlusPlus => kmeans_plus_plus_init(data, n_clusters, rng),
    }
}

/// Random initialization: randomly select k distinct data points as initial
/// centroids
fn random_init<R>(data: ArrayView2<f64>, n_clusters: usize, rng: &mut R) -> Result<Array2<f64>>
where
    R: Rng,
{
    let n_points = data.nrows();
    let mut seen = HashSet::new();
    let mut selected_indices = Vec::with_capacity(n_clusters);

    // Randomly select unique indices, keeping draw order for reproducibility
    while selected_indices.len() < n_clusters {
        let idx = rng.gen_range(0..n_points);
        if seen.insert(idx) {
            selected_indices.push(idx);
        }
    }

    let mut centroids = Array2::zeros((n_clusters, data.ncols()));
    for (i, &data_idx) in selected_indices.iter().enumerate() {
        centroids.row_mut(i).assign(&data.row(data_idx));
    }

    Ok(centroids)
}

/// K-means++ initialization, greedy farthest-point variant.
///
/// The first centroid is drawn uniformly at random. Each subsequent centroid
/// is the observation with maximum distance to its nearest already-chosen
/// centroid. This is a deterministic approximation of the canonical
/// probability-weighted k-means++ sampling; ties go to the lowest row index.
fn kmeans_plus_plus_init<R>(
    data: ArrayView2<f64>,
    n_clusters: usize,
    rng: &mut R,
) -> Result<Array2<f64>>
where
    R: Rng,
{
    let metric = Euclidean;
    let n_points = data.nrows();

    let mut selected_indices = Vec::with_capacity(n_clusters);
    selected_indices.push(rng.gen_range(0..n_points));

    // Each observation's distance to its nearest chosen centroid, refined
    // incrementally as centroids are added
    let mut nearest_distances = vec![f64::INFINITY; n_points];

    while selected_indices.len() < n_clusters {
        let latest = *selected_indices
            .last()
            .ok_or_else(|| Error::invalid_data("No seed centroid selected"))?;

        let mut best_idx = 0;
        let mut best_distance = -1.0;

        for row_idx in 0..n_points {
            let dist = metric.distance(data.row(row_idx), data.row(latest))?;
            if dist < nearest_distances[row_idx] {
                nearest_distances[row_idx] = dist;
            }

            if nearest_distances[row_idx] > best_distance {
                best_distance = nearest_distances[row_idx];
                best_idx = row_idx;
            }
        }

        selected_indices.push(best_idx);
    }

    let mut centroids = Array2::zeros((n_clusters, data.ncols()));
    for (i, &data_idx) in selected_indices.iter().enumerate() {
        centroids.row_mut(i).assign(&data.row(data_idx));
    }

    Ok(centroids)
}
