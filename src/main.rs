//! `knn-arff` classifies every instance of a dataset with the k-NN rule,
//! using all the other instances as training data, and reports how long
//! the classification took and its accuracy.
//!
//! The dataset is either an ARFF file (`.arff` extension) or a
//! header-less CSV file, such as:
//!
//!     0.1, 2.43, 1.1, 0
//!     0.0, 1.22, 1.1, 1
//!     1.0, 1.02, 0.1, 1
//!     ...
//!
//! where the last column specifies the class, and the remaining ones
//! the attributes.
//!
//! The general syntax is:
//!
//!     knn-arff [options] <dataset>
//!
//! The output reports the number of instances, the time required to
//! classify them and to build the confusion matrix, and the accuracy:
//!
//!     The KNN classifier for 150 instances required 3 ms CPU time. Accuracy was 0.9533
//!
//! ## Options
//!
//! **--k** Number of neighbors (default: 5).
//!
//! **--scale** Scales each attribute in [0,1] before classifying.
//!
//! **--matrix** Also prints the confusion matrix and the accuracy of
//! always predicting the most frequent class.
extern crate docopt;
extern crate ndarray;
extern crate serde;

extern crate knn_arff;

use std::process;
use std::time::Instant;

use docopt::Docopt;
use serde::Deserialize;

use knn_arff::{Dataset, KNNClassifier, ConfusionMatrix, evaluate};
use knn_arff::knn::classifier::DEFAULT_K;
use knn_arff::utils::{load_dataset, scale01, majority_baseline};


const USAGE: &str = "
Classify a dataset with k-NN (leave-one-out) and report its accuracy.

Usage: knn-arff [options] <dataset>
       knn-arff (--help | --version)

Options:
    --k=<k>                     Number of neighbors [default: 5].
    --scale                     Scale attributes in [0,1] before
                                classifying.
    --matrix                    Print the confusion matrix.
    -h, --help                  Show help.
    --version                   Show the version.
";

#[derive(Debug, Deserialize)]
struct Args {
    flag_k: Option<usize>,
    flag_scale: bool,
    flag_matrix: bool,
    arg_dataset: String,
}

/// Result of the timed part of a run.
struct Outcome {
    matrix: ConfusionMatrix,
    accuracy: f64,
    millis: u128,
}

/// Classifies and evaluates the dataset; only this part is timed.
fn run(dataset: &Dataset, k: usize) -> knn_arff::Result<Outcome> {
    let start = Instant::now();

    let predictions = KNNClassifier::new(k).classify(dataset)?;
    let (matrix, accuracy) = evaluate(&predictions.view(), dataset)?;

    Ok(Outcome {
        matrix,
        accuracy,
        millis: start.elapsed().as_millis(),
    })
}

/// Prints the confusion matrix, with class names if known.
fn print_matrix(dataset: &Dataset, matrix: &ConfusionMatrix) {
    println!();
    println!("Confusion matrix (rows: true class, columns: predicted class):");
    print!("{}", matrix.table(|y| dataset.class_name(y)));
    println!("Correct predictions: {} / {}", matrix.correct(), matrix.total());
    println!("Majority class accuracy: {:.4}",
             majority_baseline(&dataset.labels()));
}

fn fail(message: &str, e: knn_arff::Error) -> ! {
    eprintln!("[!] {}: {}", message, e);
    process::exit(1);
}

fn main() {
    // Parse args from command line. A wrong number of arguments is not
    // an error: print usage and exit successfully.
    let args: Args = Docopt::new(USAGE)
                            .and_then(|d| d.version(Some(env!("CARGO_PKG_VERSION").to_string()))
                                           .deserialize())
                            .unwrap_or_else(|e| {
                                if e.fatal() {
                                    println!("{}", USAGE.trim());
                                    process::exit(0);
                                }
                                e.exit()
                            });

    let mut dataset = load_dataset(&args.arg_dataset)
                        .unwrap_or_else(|e| fail("failed to load dataset", e));

    if args.flag_scale && dataset.features().ncols() > 1 {
        println!("scaling features");
        scale01(dataset.features_mut());
    }

    let k = args.flag_k.unwrap_or(DEFAULT_K);
    let outcome = run(&dataset, k)
                    .unwrap_or_else(|e| fail("classification failed", e));

    println!("The KNN classifier for {} instances required {} ms CPU time. Accuracy was {:.4}",
             dataset.ninstances(), outcome.millis, outcome.accuracy);

    if args.flag_matrix {
        print_matrix(&dataset, &outcome.matrix);
    }
}
