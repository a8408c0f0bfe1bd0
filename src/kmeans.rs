//! K-means clustering algorithm implementation

use crate::distance::{Distance, Euclidean};
use crate::error::{Error, Result};
use crate::initialization::{initialize_centroids, InitMethod};
use crate::utils::{
    assign_points_to_centroids, centroid_norms, get_cluster_indices, norm_shift, total_within_ss,
    validate_data, validate_parameters,
};
use ndarray::{Array1, Array2, ArrayView2};
use rand::prelude::*;
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// K-means clustering algorithm for numerical data
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KMeans {
    /// Number of clusters
    pub n_clusters: usize,
    /// Initialization method
    pub init_method: InitMethod,
    /// Maximum number of iterations per run
    pub max_iter: usize,
    /// Tolerance for the centroid-norm convergence check
    pub tol: f64,
    /// Number of independent restarts; the run with the lowest
    /// within-cluster sum of squares wins
    pub n_init: usize,
    /// Random seed for reproducibility
    pub random_state: Option<u64>,
    /// Number of parallel jobs (restarts run in parallel unless set to 1)
    pub n_jobs: Option<usize>,
    /// Enable verbose output
    pub verbose: bool,
}

/// Result of k-means clustering
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KMeansResult {
    /// Cluster labels for each data point, each in `[0, n_clusters)`
    pub labels: Array1<usize>,
    /// Final cluster centroids, one row per cluster
    pub centroids: Array2<f64>,
    /// Number of assignment passes performed by the winning run
    pub n_iter: usize,
    /// Total within-cluster sum of squares of the returned assignment
    pub inertia: f64,
    /// Whether the run stopped on the convergence check rather than the
    /// iteration budget
    pub converged: bool,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            n_clusters: 8,
            init_method: InitMethod::KMeansPlusPlus,
            max_iter: 10,
            tol: 1e-9,
            n_init: 1,
            random_state: None,
            n_jobs: None,
            verbose: false,
        }
    }
}

impl KMeans {
    /// Create a new k-means clusterer with specified number of clusters
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Default::default()
        }
    }

    /// Set the initialization method
    pub fn init_method(mut self, method: InitMethod) -> Self {
        self.init_method = method;
        self
    }

    /// Set the maximum number of iterations per run
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the number of independent restarts
    pub fn n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Set the random seed for reproducibility
    pub fn random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Set the number of parallel jobs
    pub fn n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = Some(n_jobs);
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Fit the k-means algorithm to the data and return the best run
    ///
    /// Runs `n_init` independent restarts, each with its own initialization,
    /// and keeps the run with the minimum within-cluster sum of squares.
    /// Restarts share nothing but read-only access to `data`.
    pub fn fit(&self, data: ArrayView2<f64>) -> Result<KMeansResult> {
        self.validate_input(data)?;

        let mut best_result: Option<KMeansResult> = None;
        let mut best_inertia = f64::INFINITY;

        let results: Vec<Result<KMeansResult>> = if self.should_use_parallel() {
            (0..self.n_init)
                .into_par_iter()
                .map(|i| {
                    let seed = self.random_state.unwrap_or(0) + i as u64;
                    self.fit_single(data, seed)
                })
                .collect()
        } else {
            (0..self.n_init)
                .map(|i| {
                    let seed = self.random_state.unwrap_or(0) + i as u64;
                    self.fit_single(data, seed)
                })
                .collect()
        };

        for result in results {
            let result = result?;
            if result.inertia < best_inertia {
                best_inertia = result.inertia;
                best_result = Some(result);
            }
        }

        best_result.ok_or_else(|| Error::invalid_data("No clustering runs produced a result"))
    }

    /// Single run of the k-means algorithm
    fn fit_single(&self, data: ArrayView2<f64>, seed: u64) -> Result<KMeansResult> {
        let mut rng = StdRng::seed_from_u64(seed);
        let metric = Euclidean;

        let mut centroids =
            initialize_centroids(data, self.n_clusters, self.init_method, &mut rng)?;
        let mut labels =
            assign_points_to_centroids(data, centroids.view(), |a, b| metric.distance(a, b))?;
        let mut norms = centroid_norms(centroids.view());
        let mut n_iter = 1;
        let mut converged = false;

        // The update rule is a heuristic with no monotonic-descent guarantee;
        // track the iterate with the lowest objective and return that one.
        let mut best_inertia = total_within_ss(data, self.n_clusters, labels.view());
        let mut best_centroids = centroids.clone();
        let mut best_labels = labels.clone();

        for iter in 1..self.max_iter {
            let next_centroids = self.update_centroids(data, &labels, centroids.view());
            centroids = next_centroids;
            labels =
                assign_points_to_centroids(data, centroids.view(), |a, b| metric.distance(a, b))?;
            n_iter = iter + 1;

            let inertia = total_within_ss(data, self.n_clusters, labels.view());
            if inertia <= best_inertia {
                best_inertia = inertia;
                best_centroids = centroids.clone();
                best_labels = labels.clone();
            }

            let new_norms = centroid_norms(centroids.view());
            if norm_shift(norms.view(), new_norms.view()) <= self.tol {
                converged = true;
                if self.verbose {
                    println!("K-means converged after {} iterations", n_iter);
                }
                break;
            }
            norms = new_norms;

            if self.verbose && n_iter % 10 == 0 {
                println!("K-means iteration {}", n_iter);
            }
        }

        Ok(KMeansResult {
            labels: best_labels,
            centroids: best_centroids,
            n_iter,
            inertia: best_inertia,
            converged,
        })
    }

    /// Recompute each centroid as the mean of its assigned observations
    ///
    /// A cluster with no assigned observations keeps its previous centroid
    /// unchanged. Returns a fresh centroid set; the previous one is never
    /// mutated in place.
    fn update_centroids(
        &self,
        data: ArrayView2<f64>,
        labels: &Array1<usize>,
        previous: ArrayView2<f64>,
    ) -> Array2<f64> {
        let cluster_indices = get_cluster_indices(labels.view(), self.n_clusters);
        let mut new_centroids = Array2::zeros((self.n_clusters, data.ncols()));

        for (cluster_id, indices) in cluster_indices.iter().enumerate() {
            if indices.is_empty() {
                new_centroids
                    .row_mut(cluster_id)
                    .assign(&previous.row(cluster_id));
            } else {
                let count = indices.len() as f64;
                for &row_idx in indices {
                    for col_idx in 0..data.ncols() {
                        new_centroids[[cluster_id, col_idx]] += data[[row_idx, col_idx]];
                    }
                }
                new_centroids
                    .row_mut(cluster_id)
                    .mapv_inplace(|sum| sum / count);
            }
        }

        new_centroids
    }

    /// Validate input parameters and data
    fn validate_input(&self, data: ArrayView2<f64>) -> Result<()> {
        validate_parameters(self.n_clusters, self.max_iter, self.tol, self.n_init)?;
        validate_data(data)?;

        if self.n_clusters > data.nrows() {
            return Err(Error::invalid_parameter(
                "Number of clusters cannot exceed number of data points",
            ));
        }

        Ok(())
    }

    /// Determine if parallel processing should be used
    fn should_use_parallel(&self) -> bool {
        match self.n_jobs {
            Some(1) => false,
            Some(_) => true,
            None => self.n_init > 1, // Use parallel by default for multiple restarts
        }
    }

    /// Fit the model and return only the cluster assignments
    pub fn fit_predict(&self, data: ArrayView2<f64>) -> Result<Array1<usize>> {
        let result = self.fit(data)?;
        Ok(result.labels)
    }
}
