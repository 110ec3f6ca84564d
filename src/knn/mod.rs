//! Brute-force k-NN classification: the distance between instances, the
//! selection of the k nearest neighbors of an instance, and the classifier
//! putting them together.
pub mod neighbors;
pub mod classifier;

pub use self::neighbors::{Neighbor, NearestNeighbors};
pub use self::classifier::KNNClassifier;

use ndarray::prelude::*;


/// Returns the Euclidean distance between two vectors of f64 values.
///
/// Both vectors contain only the (non-class) attributes of an instance,
/// and are expected to have the same length.
pub fn euclidean_distance(v1: &ArrayView1<f64>, v2: &ArrayView1<f64>) -> f64 {
    v1.iter()
      .zip(v2.iter())
      .map(|(x,y)| (x - y).powi(2))
      .sum::<f64>()
      .sqrt()
}
