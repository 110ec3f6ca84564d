//! Leave-one-out k-NN classification of a whole dataset.
//!
//! Every instance is classified by majority vote among its k nearest
//! neighbors, taken from all the *other* instances of the same dataset.
//! This costs O(n^2 * (d + k)) for n instances of d attributes.
//!
//! # Examples
//!
//! ```
//! #[macro_use(array)]
//! extern crate ndarray;
//! extern crate knn_arff;
//!
//! # fn main() {
//! use knn_arff::{Dataset, KNNClassifier};
//!
//! let features = array![[0.], [1.], [2.], [10.], [11.], [12.]];
//! let labels = array![0, 0, 0, 1, 1, 1];
//! let dataset = Dataset::from_labels(features, labels).unwrap();
//!
//! let knn = KNNClassifier::new(3);
//! assert_eq!(knn.classify(&dataset).unwrap(), array![0, 0, 0, 1, 1, 1]);
//! # }
//! ```
use ndarray::*;

use crate::Label;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::knn::{NearestNeighbors, euclidean_distance};

/// Default number of neighbors.
pub const DEFAULT_K: usize = 5;

/// Brute-force k-NN classifier with Euclidean distance.
#[derive(Debug, Clone, Copy)]
pub struct KNNClassifier {
    k: usize,
}

impl Default for KNNClassifier {
    fn default() -> KNNClassifier {
        KNNClassifier::new(DEFAULT_K)
    }
}

impl KNNClassifier {
    pub fn new(k: usize) -> KNNClassifier {
        KNNClassifier { k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Checks that `1 <= k <= n-1`, where n is the number of instances.
    fn check_k(&self, n: usize) -> Result<()> {
        if self.k == 0 || self.k >= n {
            return Err(Error::InvalidK { k: self.k, n });
        }
        Ok(())
    }

    /// The k nearest neighbors of the `i`-th instance of `dataset`,
    /// excluding the instance itself.
    pub fn neighbors(&self, dataset: &Dataset, i: usize)
            -> Result<NearestNeighbors> {
        self.check_k(dataset.ninstances())?;
        if i >= dataset.ninstances() {
            return Err(Error::ShapeMismatch { expected: dataset.ninstances(),
                                              actual: i + 1 });
        }
        Ok(NearestNeighbors::from_data(i, &dataset.features(),
                                       &dataset.labels(), self.k,
                                       euclidean_distance))
    }

    /// Predicts the label of each instance from its k nearest neighbors.
    ///
    /// Predictions are returned in the same order as the instances.
    pub fn classify(&self, dataset: &Dataset) -> Result<Array1<Label>> {
        let n = dataset.ninstances();
        self.check_k(n)?;

        // Votes are tallied only up to the largest label that can
        // actually be voted for.
        let max_label = dataset.max_label();
        let features = dataset.features();
        let labels = dataset.labels();

        let predictions = (0..n).map(|i| {
                                    NearestNeighbors::from_data(i, &features,
                                                                &labels, self.k,
                                                                euclidean_distance)
                                        .vote(max_label)
                                })
                                .collect::<Array1<_>>();

        Ok(predictions)
    }
}
