//! Evaluation of predictions: confusion matrix and accuracy.
use std::fmt;

use itertools::Itertools;
use ndarray::*;

use crate::Label;
use crate::dataset::Dataset;
use crate::error::{Error, Result};

/// Counts of instances by true class (rows) and predicted class (columns).
///
/// Correct predictions lie on the diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    counts: Array2<usize>,
}

impl ConfusionMatrix {
    /// Cross-tabulates predicted against true labels.
    ///
    /// Both must contain one label per instance, each in `[0, nclasses)`;
    /// otherwise an error is returned and no matrix is built.
    pub fn from_predictions(predictions: &ArrayView1<Label>,
                            truth: &ArrayView1<Label>, nclasses: usize)
            -> Result<ConfusionMatrix> {
        if predictions.len() != truth.len() {
            return Err(Error::ShapeMismatch { expected: truth.len(),
                                              actual: predictions.len() });
        }

        let mut counts = Array2::zeros((nclasses, nclasses));

        for (&y_pred, &y) in izip!(predictions, truth) {
            if let Some(&label) = [y, y_pred].iter().find(|&&l| l >= nclasses) {
                return Err(Error::LabelOutOfRange { label, nclasses });
            }
            counts[[y, y_pred]] += 1;
        }

        Ok(ConfusionMatrix { counts })
    }

    pub fn counts(&self) -> &Array2<usize> {
        &self.counts
    }

    pub fn nclasses(&self) -> usize {
        self.counts.nrows()
    }

    /// Total number of instances.
    pub fn total(&self) -> usize {
        self.counts.sum()
    }

    /// Number of correct predictions (the diagonal).
    pub fn correct(&self) -> usize {
        self.counts.diag().sum()
    }

    /// Number of instances of each true class.
    pub fn row_sums(&self) -> Array1<usize> {
        self.counts.sum_axis(Axis(1))
    }

    /// Number of predictions of each class.
    pub fn column_sums(&self) -> Array1<usize> {
        self.counts.sum_axis(Axis(0))
    }

    /// Fraction of correct predictions, in [0, 1].
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.,
            total => self.correct() as f64 / total as f64,
        }
    }

    /// Renders the matrix as a table, naming classes with `name`.
    ///
    /// Rows are true classes, columns predicted classes.
    pub fn table<F>(&self, name: F) -> String
    where F: Fn(Label) -> String {
        let names = (0..self.nclasses()).map(&name).collect::<Vec<_>>();
        let width = names.iter()
                         .map(|s| s.len())
                         .chain(self.counts.iter().map(|c| c.to_string().len()))
                         .max()
                         .unwrap_or(1);

        let header = names.iter()
                          .map(|s| format!("{:>w$}", s, w = width))
                          .join(" ");
        let mut out = format!("{:>w$} | {}\n", "", header, w = width);

        for (row, label) in self.counts.outer_iter().zip(&names) {
            let cells = row.iter()
                           .map(|c| format!("{:>w$}", c, w = width))
                           .join(" ");
            out.push_str(&format!("{:>w$} | {}\n", label, cells, w = width));
        }
        out
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.table(|y| y.to_string()))
    }
}

/// Builds the confusion matrix of `predictions` against the labels of
/// `dataset`, and returns it together with the accuracy.
///
/// The matrix is sized by the dataset's declared number of classes.
pub fn evaluate(predictions: &ArrayView1<Label>, dataset: &Dataset)
        -> Result<(ConfusionMatrix, f64)> {
    let matrix = ConfusionMatrix::from_predictions(predictions,
                                                   &dataset.labels(),
                                                   dataset.nclasses())?;
    let accuracy = matrix.accuracy();
    Ok((matrix, accuracy))
}


#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn perfect_predictions() {
        let dataset = Dataset::from_labels(array![[0.], [1.], [10.], [11.]],
                                           array![0, 0, 1, 1]).unwrap();
        let (matrix, accuracy) = evaluate(&array![0, 0, 1, 1].view(),
                                          &dataset).unwrap();
        assert_eq!(matrix.counts(), &array![[2, 0], [0, 2]]);
        assert_eq!(accuracy, 1.);
    }

    #[test]
    fn confusion_counts() {
        let truth = array![0, 1, 2, 2, 1, 0, 2];
        let predictions = array![0, 2, 2, 1, 1, 0, 0];
        let matrix = ConfusionMatrix::from_predictions(&predictions.view(),
                                                       &truth.view(), 4)
                                     .unwrap();
        assert_eq!(matrix.counts(), &array![[2, 0, 0, 0],
                                            [0, 1, 1, 0],
                                            [1, 1, 1, 0],
                                            [0, 0, 0, 0]]);
        assert_eq!(matrix.nclasses(), 4);
        assert_eq!(matrix.correct(), 4);
        assert_eq!(matrix.total(), 7);
        assert_eq!(matrix.row_sums(), array![2, 2, 3, 0]);
        assert_eq!(matrix.column_sums(), array![3, 2, 2, 0]);
        assert!(approx_eq!(f64, matrix.accuracy(), 4. / 7., ulps = 2));
    }

    #[test]
    fn rejects_bad_predictions() {
        let dataset = Dataset::new(array![[0.], [1.]], array![0, 1], 2)
                              .unwrap();

        match evaluate(&array![0, 2].view(), &dataset) {
            Err(Error::LabelOutOfRange { label: 2, nclasses: 2 }) => {},
            other => panic!("unexpected result: {:?}", other),
        }
        match evaluate(&array![0].view(), &dataset) {
            Err(Error::ShapeMismatch { expected: 2, actual: 1 }) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn empty_matrix_accuracy() {
        let empty = Array1::<Label>::zeros(0);
        let matrix = ConfusionMatrix::from_predictions(&empty.view(),
                                                       &empty.view(), 2)
                                     .unwrap();
        assert_eq!(matrix.accuracy(), 0.);
    }

    #[test]
    fn table() {
        let matrix = ConfusionMatrix::from_predictions(&array![0, 1, 1].view(),
                                                       &array![0, 0, 1].view(),
                                                       2)
                                     .unwrap();
        assert_eq!(matrix.to_string(), "  | 0 1\n0 | 1 1\n1 | 0 1\n");

        let names = ["yes", "no"];
        assert_eq!(matrix.table(|y| names[y].to_string()),
                   "    | yes  no\nyes |   1   1\n no |   0   1\n");
    }

    proptest! {
        #[test]
        fn prop_matrix_sums(
            pairs in prop::collection::vec((0usize..4, 0usize..4), 1..100)
        ) {
            let truth = pairs.iter().map(|p| p.0).collect::<Array1<Label>>();
            let predictions = pairs.iter().map(|p| p.1).collect::<Array1<Label>>();
            let matrix = ConfusionMatrix::from_predictions(&predictions.view(),
                                                           &truth.view(), 4)
                                         .unwrap();

            let correct = pairs.iter().filter(|p| p.0 == p.1).count();
            prop_assert_eq!(matrix.correct(), correct);
            prop_assert_eq!(matrix.total(), pairs.len());
            for (y, &count) in matrix.row_sums().iter().enumerate() {
                prop_assert_eq!(count, pairs.iter().filter(|p| p.0 == y).count());
            }

            let accuracy = matrix.accuracy();
            prop_assert!((0. ..=1.).contains(&accuracy));
            prop_assert_eq!(accuracy == 1., correct == pairs.len());
        }
    }
}
