//! # K-means Clustering
//!
//! This crate implements k-means clustering for numerical data: partitioning
//! observations into `k` groups that minimize the total within-cluster sum of
//! squares.
//!
//! ## Features
//!
//! - **K-means++ seeding** (default): greedy farthest-point initialization
//!   that spreads the starting centroids apart
//! - **Random seeding**: uniform sampling of data rows as starting centroids
//! - Multi-start selection: run `n_init` independent restarts and keep the
//!   one with the lowest objective
//! - Parallel restarts via Rayon
//! - Reproducible results with a fixed random seed
//!
//! ## Example
//!
//! ```rust
//! use kentroid::{KMeans, InitMethod};
//! use ndarray::Array2;
//!
//! // Two well-separated groups of points
//! let data = Array2::from_shape_vec((4, 2), vec![
//!     0.0, 0.0,
//!     0.0, 1.0,
//!     10.0, 0.0,
//!     10.0, 1.0,
//! ]).unwrap();
//!
//! let kmeans = KMeans::new(2)
//!     .init_method(InitMethod::KMeansPlusPlus)
//!     .max_iter(10)
//!     .n_init(3)
//!     .random_state(42);
//!
//! let result = kmeans.fit(data.view()).unwrap();
//! assert_eq!(result.labels.len(), 4);
//! assert_eq!(result.labels[0], result.labels[1]);
//! assert_ne!(result.labels[0], result.labels[2]);
//! ```

#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
pub mod error;
pub mod initialization;
pub mod kmeans;
pub mod utils;

pub use distance::{Distance, Euclidean};
pub use error::{Error, Result};
pub use initialization::InitMethod;
pub use kmeans::{KMeans, KMeansResult};

/// Re-export commonly used types from ndarray
pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
