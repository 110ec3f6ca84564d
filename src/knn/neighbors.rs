//! Selection of the k nearest neighbors of an instance, and majority vote
//! among them.
//!
//! `NearestNeighbors` holds exactly k slots, sorted by increasing distance
//! from the query instance. Slots start out empty (label 0, infinite
//! distance) and are filled by `offer()`ing the other instances one by
//! one; the full set of candidates is never sorted.
use std::mem;

use ndarray::*;

use crate::Label;

/// Nearest neighbor of a query instance.
#[derive(Debug, Clone)]
pub struct Neighbor {
    // Distance from the query instance.
    pub distance: f64,
    // Class of this neighbor.
    pub label: Label,
    // Position of this neighbor in the dataset; None for a slot that was
    // never filled.
    pub index: Option<usize>,
}

impl Neighbor {
    /// Constructs a new Neighbor.
    pub fn new(distance: f64, label: Label, index: usize) -> Neighbor {
        Neighbor {
            distance,
            label,
            index: Some(index),
        }
    }

    /// An unfilled slot, farther than any real neighbor.
    fn empty() -> Neighbor {
        Neighbor {
            distance: f64::INFINITY,
            label: 0,
            index: None,
        }
    }
}

/// The k nearest neighbors of some query instance.
#[derive(Debug)]
pub struct NearestNeighbors {
    // Exactly k neighbors, sorted in increasing order by their distance
    // from the query.
    neighbors: Vec<Neighbor>,
}

impl NearestNeighbors {
    /// Init k empty neighbor slots.
    pub fn new(k: usize) -> NearestNeighbors {
        NearestNeighbors {
            neighbors: vec![Neighbor::empty(); k],
        }
    }

    /// Finds the k nearest neighbors of the `query`-th instance among all
    /// the other instances of `features`.
    ///
    /// # Arguments
    /// * `query` - Index of the query instance within `features`.
    /// * `features` - Attributes of all the instances, one per row.
    /// * `labels` - Labels of all the instances.
    /// * `k` - Number of neighbors to keep.
    /// * `distance` - Distance between two instances.
    ///
    pub fn from_data<D>(query: usize, features: &ArrayView2<f64>,
                        labels: &ArrayView1<Label>, k: usize, distance: D)
            -> NearestNeighbors
    where D: Fn(&ArrayView1<f64>, &ArrayView1<f64>) -> f64 {
        let mut knn = NearestNeighbors::new(k);
        let x = features.row(query);

        for (j, (xj, yj)) in features.outer_iter().zip(labels).enumerate() {
            // An instance is never its own neighbor: its distance would
            // always be 0.
            if j == query {
                continue;
            }
            knn.offer(Neighbor::new(distance(&x, &xj), *yj, j));
        }

        knn
    }

    /// Offers a candidate neighbor.
    ///
    /// The candidate takes the first slot whose distance is strictly
    /// larger than its own; the neighbor it displaces becomes the
    /// candidate for the following slots, and the last one falls off.
    /// On equal distances the neighbor already stored is kept.
    pub fn offer(&mut self, mut candidate: Neighbor) {
        for slot in self.neighbors.iter_mut() {
            if candidate.distance < slot.distance {
                mem::swap(slot, &mut candidate);
            }
        }
    }

    /// Predicts a label by majority vote among the neighbors.
    ///
    /// Votes are tallied for labels `0..=max_label`; on equal votes the
    /// smallest label wins.
    pub fn vote(&self, max_label: Label) -> Label {
        let mut votes = vec![0usize; max_label + 1];
        for neigh in &self.neighbors {
            votes[neigh.label] += 1;
        }

        let mut y_pred = 0;
        for (y, &count) in votes.iter().enumerate() {
            if count > votes[y_pred] {
                y_pred = y;
            }
        }
        y_pred
    }

    /// Number of neighbor slots, k.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Neighbor> {
        self.neighbors.iter()
    }

    pub fn distances(&self) -> Vec<f64> {
        self.neighbors.iter().map(|neigh| neigh.distance).collect()
    }

    pub fn labels(&self) -> Vec<Label> {
        self.neighbors.iter().map(|neigh| neigh.label).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::knn::euclidean_distance;
    use proptest::prelude::*;

    #[test]
    fn knn_init() {
        let features = array![[0.],
                              [8.],
                              [3.],
                              [1.],
                              [4.],
                              [5.],
                              [7.],
                              [2.],
                              [6.]];
        let labels = array![0, 0, 0, 0, 1, 0, 1, 1, 2];
        let mut k = 8;

        let knn = NearestNeighbors::from_data(0, &features.view(),
                                              &labels.view(), k,
                                              euclidean_distance);
        assert_eq!(knn.distances(), vec![1., 2., 3., 4., 5., 6., 7., 8.]);
        assert_eq!(knn.labels(), vec![0, 1, 0, 1, 0, 2, 1, 0]);

        // Reduce k.
        k = 5;
        let knn = NearestNeighbors::from_data(0, &features.view(),
                                              &labels.view(), k,
                                              euclidean_distance);
        assert_eq!(knn.distances(), vec![1., 2., 3., 4., 5.]);
    }

    #[test]
    fn offer_keeps_slots_sorted() {
        let mut knn = NearestNeighbors::new(3);
        assert_eq!(knn.distances(), vec![f64::INFINITY; 3]);

        knn.offer(Neighbor::new(5., 1, 0));
        knn.offer(Neighbor::new(2., 2, 1));
        assert_eq!(knn.distances(), vec![2., 5., f64::INFINITY]);
        assert_eq!(knn.labels(), vec![2, 1, 0]);

        knn.offer(Neighbor::new(3., 0, 2));
        knn.offer(Neighbor::new(9., 0, 3));
        assert_eq!(knn.distances(), vec![2., 3., 5.]);

        // The farthest neighbor falls off.
        knn.offer(Neighbor::new(1., 3, 4));
        assert_eq!(knn.distances(), vec![1., 2., 3.]);
        assert_eq!(knn.labels(), vec![3, 2, 0]);
    }

    #[test]
    fn distance_ties_keep_first_scanned() {
        // Instances 1 and 2 are both at distance 2 from instance 0.
        let features = array![[0.], [2.], [-2.], [5.]];
        let labels = array![0, 1, 2, 1];

        let knn = NearestNeighbors::from_data(0, &features.view(),
                                              &labels.view(), 1,
                                              euclidean_distance);
        assert_eq!(knn.iter().next().unwrap().index, Some(1));
        assert_eq!(knn.labels(), vec![1]);

        let mut knn = NearestNeighbors::new(2);
        knn.offer(Neighbor::new(1., 0, 0));
        knn.offer(Neighbor::new(1., 1, 1));
        knn.offer(Neighbor::new(1., 2, 2));
        assert_eq!(knn.labels(), vec![0, 1]);
    }

    #[test]
    fn self_is_never_a_neighbor() {
        // Instance 2 duplicates instance 0, so it is at distance 0.
        let features = array![[1., 1.], [4., 5.], [1., 1.], [2., 1.]];
        let labels = array![0, 1, 1, 0];

        let knn = NearestNeighbors::from_data(0, &features.view(),
                                              &labels.view(), 3,
                                              euclidean_distance);
        let indexes = knn.iter().map(|neigh| neigh.index).collect::<Vec<_>>();
        assert_eq!(indexes, vec![Some(2), Some(3), Some(1)]);
        assert_eq!(knn.distances(), vec![0., 1., 5.]);
    }

    #[test]
    fn vote_majority() {
        let mut knn = NearestNeighbors::new(5);
        for (i, &y) in [2, 1, 2, 0, 1].iter().enumerate() {
            knn.offer(Neighbor::new(i as f64, y, i));
        }
        // Labels 1 and 2 have two votes each: the smallest wins.
        assert_eq!(knn.vote(2), 1);
        // Tallying up to a larger label changes nothing.
        assert_eq!(knn.vote(7), 1);

        knn.offer(Neighbor::new(0.5, 2, 5));
        assert_eq!(knn.labels(), vec![2, 2, 1, 2, 0]);
        assert_eq!(knn.vote(2), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_k_smallest_distances(
            points in prop::collection::vec((-50f64..50., -50f64..50., 0usize..3), 2..30),
            k_seed in 0usize..1000,
            query_seed in 0usize..1000,
        ) {
            let n = points.len();
            let k = 1 + k_seed % (n - 1);
            let query = query_seed % n;

            let features = Array::from_shape_vec((n, 2),
                                                 points.iter()
                                                       .flat_map(|p| vec![p.0, p.1])
                                                       .collect()).unwrap();
            let labels = points.iter().map(|p| p.2).collect::<Array1<Label>>();

            let knn = NearestNeighbors::from_data(query, &features.view(),
                                                  &labels.view(), k,
                                                  euclidean_distance);

            // Self-exclusion, and every slot is filled.
            for neigh in knn.iter() {
                prop_assert!(neigh.index.is_some());
                prop_assert_ne!(neigh.index, Some(query));
            }

            // Non-decreasing distances.
            let distances = knn.distances();
            prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));

            // Same as the k smallest distances of a full sort.
            let x = features.row(query);
            let mut expected = features.outer_iter()
                                       .enumerate()
                                       .filter(|(j, _)| *j != query)
                                       .map(|(_, xj)| euclidean_distance(&x, &xj))
                                       .collect::<Vec<_>>();
            expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
            expected.truncate(k);
            prop_assert_eq!(distances, expected);
        }
    }
}
