//! knn-arff classifies every instance of a labeled dataset with the
//! brute-force k-nearest-neighbors rule, using the rest of the dataset as
//! training data (leave-one-out), and scores the result with a confusion
//! matrix and its accuracy.
//!
//! # Getting started
//!
//! The tool is mainly used via the binary it provides, `knn-arff`:
//!
//! ```text
//! knn-arff [--k=<k>] [--scale] [--matrix] <dataset>
//! ```
//!
//! where `<dataset>` is either an ARFF file or a header-less CSV file.
//! In both cases the class is the last attribute of each row.
//!
//! The library exposes the same pipeline:
//!
//! ```
//! #[macro_use(array)]
//! extern crate ndarray;
//! extern crate knn_arff;
//!
//! # fn main() {
//! use knn_arff::{Dataset, KNNClassifier, evaluate};
//!
//! let features = array![[0.], [1.], [10.], [11.]];
//! let labels = array![0, 0, 1, 1];
//! let dataset = Dataset::from_labels(features, labels).unwrap();
//!
//! let predictions = KNNClassifier::new(1).classify(&dataset).unwrap();
//! let (matrix, accuracy) = evaluate(&predictions.view(), &dataset).unwrap();
//!
//! assert_eq!(predictions, array![0, 0, 1, 1]);
//! assert_eq!(matrix.counts(), &array![[2, 0], [0, 2]]);
//! assert_eq!(accuracy, 1.0);
//! # }
//! ```
extern crate csv;
extern crate ndarray;
#[macro_use]
extern crate itertools;

pub mod error;
pub mod dataset;
pub mod knn;
pub mod evaluation;
pub mod utils;

pub use crate::error::{Error, Result};
pub use crate::dataset::Dataset;
pub use crate::knn::{KNNClassifier, euclidean_distance};
pub use crate::evaluation::{ConfusionMatrix, evaluate};

/// Class labels are zero-based indexes.
pub type Label = usize;
