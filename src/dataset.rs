//! In-memory labeled dataset.
use ndarray::*;

use crate::Label;
use crate::error::{Error, Result};

/// Largest supported number of classes. Bounds the size of vote tallies
/// and of the (square) confusion matrix.
pub const MAX_CLASSES: usize = 1 << 12;

/// A table of instances, each one made of numeric attributes plus a class
/// label.
///
/// The class attribute is kept apart from the features, in `labels`;
/// `nattributes()` counts it nonetheless, so that it matches the number of
/// columns of the file the data came from.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Array1<Label>,
    // Declared number of classes. Every label is < nclasses.
    nclasses: usize,
    // Nominal class values, indexed by label, if known.
    class_names: Option<Vec<String>>,
}

impl Dataset {
    /// Creates a dataset with a declared number of classes.
    ///
    /// Fails if the number of rows in `features` differs from the number
    /// of labels, if there are no instances, if `nclasses` exceeds
    /// `MAX_CLASSES`, or if some label is not smaller than `nclasses`.
    pub fn new(features: Array2<f64>, labels: Array1<Label>, nclasses: usize)
            -> Result<Dataset> {
        if nclasses > MAX_CLASSES {
            return Err(Error::TooManyClasses { nclasses, max: MAX_CLASSES });
        }
        if features.nrows() != labels.len() {
            return Err(Error::ShapeMismatch { expected: features.nrows(),
                                              actual: labels.len() });
        }
        if labels.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if let Some(&label) = labels.iter().find(|&&y| y >= nclasses) {
            return Err(Error::LabelOutOfRange { label, nclasses });
        }

        Ok(Dataset {
            features,
            labels,
            nclasses,
            class_names: None,
        })
    }

    /// Creates a dataset whose number of classes is the largest
    /// label plus one.
    pub fn from_labels(features: Array2<f64>, labels: Array1<Label>)
            -> Result<Dataset> {
        let nclasses = match labels.iter().max() {
            Some(&y) => y.checked_add(1)
                         .ok_or(Error::LabelOutOfRange { label: y,
                                                         nclasses: MAX_CLASSES })?,
            None => 0,
        };
        Dataset::new(features, labels, nclasses)
    }

    /// Attaches names to the classes; `names[y]` is the name of label `y`.
    pub fn with_class_names(mut self, names: Vec<String>) -> Result<Dataset> {
        if names.len() != self.nclasses {
            return Err(Error::ShapeMismatch { expected: self.nclasses,
                                              actual: names.len() });
        }
        self.class_names = Some(names);
        Ok(self)
    }

    pub fn ninstances(&self) -> usize {
        self.labels.len()
    }

    /// Number of attributes, class attribute included.
    pub fn nattributes(&self) -> usize {
        self.features.ncols() + 1
    }

    pub fn nclasses(&self) -> usize {
        self.nclasses
    }

    pub fn features(&self) -> ArrayView2<f64> {
        self.features.view()
    }

    /// Mutable access to the features, e.g. for scaling them.
    pub fn features_mut(&mut self) -> &mut Array2<f64> {
        &mut self.features
    }

    pub fn labels(&self) -> ArrayView1<Label> {
        self.labels.view()
    }

    /// Feature vector of the `i`-th instance.
    pub fn instance(&self, i: usize) -> ArrayView1<f64> {
        self.features.row(i)
    }

    pub fn label(&self, i: usize) -> Label {
        self.labels[i]
    }

    /// Largest label appearing in the data.
    pub fn max_label(&self) -> Label {
        // Datasets are never empty.
        self.labels.iter().cloned().max().unwrap_or(0)
    }

    pub fn class_names(&self) -> Option<&[String]> {
        self.class_names.as_deref()
    }

    /// Name of class `y`, or its index if classes have no names.
    pub fn class_name(&self, y: Label) -> String {
        match self.class_names.as_ref().and_then(|names| names.get(y)) {
            Some(name) => name.clone(),
            None => y.to_string(),
        }
    }
}
