//! Utility routines for loading datasets from files and preparing them.
//!
//! Two formats are supported, and in both the class is the *last*
//! attribute of each row:
//!   - ARFF (dense `@data` section only), recognized by the `.arff`
//!     extension;
//!   - header-less CSV, with a non-negative integer class label.
//!
//! ARFF values may be quoted with either `'` or `"`, but a single row
//! must not mix both quote characters, and a quoted value containing a
//! comma must start right after the preceding comma.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use ndarray::prelude::*;

use crate::Label;
use crate::dataset::{Dataset, MAX_CLASSES};
use crate::error::{Error, Result, parse_error};

/// Type of an ARFF attribute.
#[derive(Debug, Clone, PartialEq)]
enum AttributeType {
    Numeric,
    // Declared values, in order.
    Nominal(Vec<String>),
}

#[derive(Debug)]
struct Attribute {
    name: String,
    kind: AttributeType,
}

/// Loads a dataset, choosing the format from the file extension.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let is_arff = path.extension()
                      .map_or(false, |ext| ext.eq_ignore_ascii_case("arff"));
    if is_arff {
        load_arff(path)
    } else {
        load_csv(path)
    }
}

/// Loads an ARFF file.
///
/// The last declared attribute is the class, which is either nominal
/// (labels are the indexes of its declared values) or numeric with
/// non-negative integer values.
/// Nominal non-class attributes are converted into the index of their
/// value.
pub fn load_arff<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let content = fs::read_to_string(path)?;
    parse_arff(&content)
}

/// Parses the content of an ARFF file.
pub fn parse_arff(content: &str) -> Result<Dataset> {
    let mut attributes = Vec::new();
    let mut lines = content.lines().enumerate();
    let mut data_line = None;

    // Header.
    while let Some((i, line)) = lines.next() {
        let lineno = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        let (keyword, rest) = split_token(line);
        match keyword.to_ascii_lowercase().as_str() {
            "@relation" => {},
            "@attribute" => attributes.push(parse_attribute(rest, lineno)?),
            "@data" => {
                data_line = Some(lineno);
                break;
            },
            _ => return Err(parse_error(lineno,
                                        format!("unexpected line in header: {}",
                                                line))),
        }
    }

    let data_line = data_line.ok_or_else(|| parse_error(content.lines().count(),
                                                        "missing @data section"))?;
    let (class, inputs) = match attributes.split_last() {
        Some(split) => split,
        None => return Err(parse_error(data_line, "no attributes declared")),
    };

    // Data. Each data line is a comma-separated row.
    let mut features: Vec<f64> = Vec::new();
    let mut labels: Vec<Label> = Vec::new();

    for (i, line) in lines {
        let lineno = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let record = split_row(line, lineno)?;

        if record.get(0).map_or(false, |v| v.starts_with('{')) {
            return Err(parse_error(lineno, "sparse data is not supported"));
        }
        if record.len() != attributes.len() {
            return Err(parse_error(lineno,
                                   format!("expected {} values, found {}",
                                           attributes.len(), record.len())));
        }

        for (attribute, value) in inputs.iter().zip(record.iter()) {
            features.push(attribute_value(attribute, value, lineno)?);
        }
        labels.push(class_value(class, &record[record.len() - 1], lineno)?);
    }

    let features = to_matrix(features, labels.len(), inputs.len())?;
    match &class.kind {
        AttributeType::Nominal(values) => {
            Dataset::new(features, Array::from_vec(labels), values.len())?
                    .with_class_names(values.clone())
        },
        AttributeType::Numeric => {
            Dataset::from_labels(features, Array::from_vec(labels))
        },
    }
}

/// Splits an ARFF data line into its values.
///
/// The quote character is `"` if the line contains one, `'` otherwise.
fn split_row(line: &str, lineno: usize) -> Result<StringRecord> {
    let quote = if line.contains('"') { b'"' } else { b'\'' };
    let mut reader = ReaderBuilder::new()
                                   .has_headers(false)
                                   .quote(quote)
                                   .trim(Trim::All)
                                   .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(parse_error(lineno, "empty row"));
    }
    Ok(record)
}

/// Parses a finite number.
fn parse_number(value: &str, lineno: usize) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(parse_error(lineno, format!("invalid number `{}`", value))),
    }
}

/// Checks that a label leaves room for the confusion matrix.
fn check_label(y: f64, lineno: usize) -> Result<Label> {
    if y < 0. || y.fract() != 0. || y >= MAX_CLASSES as f64 {
        return Err(parse_error(lineno,
                               format!("class must be an integer in [0, {}), found {}",
                                       MAX_CLASSES, y)));
    }
    Ok(y as Label)
}

/// Splits the first whitespace-delimited token from the rest of a line.
fn split_token(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(pos) => (&line[..pos], line[pos..].trim_start()),
        None => (line, ""),
    }
}

/// Removes matching single or double quotes around a value.
fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in &['\'', '"'] {
        if value.len() >= 2 && value.starts_with(*quote) && value.ends_with(*quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parses `<name> <type>`, the rest of an `@attribute` line.
fn parse_attribute(decl: &str, lineno: usize) -> Result<Attribute> {
    // Names may be quoted, and then contain spaces.
    let (name, kind) = match decl.chars().next() {
        Some(q) if q == '\'' || q == '"' => {
            let end = decl[1..].find(q)
                               .ok_or_else(|| parse_error(lineno,
                                                          "unterminated attribute name"))?;
            (&decl[1..end + 1], decl[end + 2..].trim())
        },
        Some(_) => split_token(decl),
        None => return Err(parse_error(lineno, "missing attribute name")),
    };

    let kind = if kind.starts_with('{') {
        let end = kind.rfind('}')
                      .ok_or_else(|| parse_error(lineno, "unterminated nominal values"))?;
        let values = split_row(&kind[1..end], lineno)?
                                 .iter()
                                 .map(|v| unquote(v).to_string())
                                 .filter(|v| !v.is_empty())
                                 .collect::<Vec<_>>();
        if values.is_empty() {
            return Err(parse_error(lineno,
                                   format!("attribute {} has no nominal values", name)));
        }
        AttributeType::Nominal(values)
    } else {
        match kind.to_ascii_lowercase().as_str() {
            "numeric" | "real" | "integer" => AttributeType::Numeric,
            other => return Err(parse_error(lineno,
                                            format!("unsupported type `{}` for attribute {}",
                                                    other, name))),
        }
    };

    Ok(Attribute { name: name.to_string(), kind })
}

/// Converts the value of a non-class attribute into a number.
fn attribute_value(attribute: &Attribute, value: &str, lineno: usize) -> Result<f64> {
    let value = unquote(value);
    if value == "?" {
        return Err(parse_error(lineno,
                               format!("missing value for attribute {}", attribute.name)));
    }

    match &attribute.kind {
        AttributeType::Numeric => {
            parse_number(value, lineno)
                .map_err(|_| parse_error(lineno,
                                         format!("invalid number `{}` for attribute {}",
                                                 value, attribute.name)))
        },
        AttributeType::Nominal(values) => {
            nominal_index(values, value)
                .map(|y| y as f64)
                .ok_or_else(|| parse_error(lineno,
                                           format!("unknown value `{}` for attribute {}",
                                                   value, attribute.name)))
        },
    }
}

/// Converts the value of the class attribute into a label.
fn class_value(class: &Attribute, value: &str, lineno: usize) -> Result<Label> {
    match &class.kind {
        AttributeType::Nominal(values) => {
            let value = unquote(value);
            nominal_index(values, value)
                .ok_or_else(|| parse_error(lineno,
                                           format!("unknown class `{}`", value)))
        },
        AttributeType::Numeric => {
            let y = attribute_value(class, value, lineno)?;
            check_label(y, lineno)
        },
    }
}

fn nominal_index(values: &[String], value: &str) -> Option<usize> {
    values.iter().position(|v| v == value)
}

fn to_matrix(values: Vec<f64>, nrows: usize, ncols: usize) -> Result<Array2<f64>> {
    let actual = values.len();
    Array::from_shape_vec((nrows, ncols), values)
          .map_err(|_| Error::ShapeMismatch { expected: nrows * ncols, actual })
}

/// Loads a header-less CSV file.
///
/// The file format should be, for each row:
///     x1, x2, ..., label
/// where x1, x2, ... are numeric features, and label is a non-negative
/// integer.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
                                   .has_headers(false)
                                   .flexible(true)
                                   .trim(Trim::All)
                                   .from_path(path)?;

    let mut features: Vec<f64> = Vec::new();
    let mut labels: Vec<Label> = Vec::new();
    let mut ncols: Option<usize> = None;

    for result in reader.records() {
        let record = result?;
        let lineno = record_line(&record);

        match ncols {
            Some(d) if d != record.len() => {
                return Err(parse_error(lineno,
                                       format!("expected {} values, found {}",
                                               d, record.len())));
            },
            None if record.len() < 2 => {
                return Err(parse_error(lineno,
                                       "expected at least one feature and a label"));
            },
            _ => ncols = Some(record.len()),
        }

        let d = record.len() - 1;
        for x in record.iter().take(d) {
            features.push(parse_number(x, lineno)?);
        }
        let label = &record[d];
        let y = label.parse::<Label>()
                     .map_err(|_| parse_error(lineno,
                                              format!("invalid label `{}`", label)))?;
        labels.push(check_label(y as f64, lineno)?);
    }

    let d = ncols.ok_or(Error::EmptyDataset)? - 1;
    let features = to_matrix(features, labels.len(), d)?;
    Dataset::from_labels(features, Array::from_vec(labels))
}

fn record_line(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

/// Scales columns' values in [0,1] with min-max scaling.
///
/// Constant columns are set to 0.
pub fn scale01(matrix: &mut Array2<f64>) {
    let mut max = Array::ones(matrix.ncols()) * -f64::INFINITY;
    let mut min = Array::ones(matrix.ncols()) * f64::INFINITY;

    for row in matrix.outer_iter() {
        for i in 0..row.len() {
            if min[i] > row[i] {
               min[i] = row[i];
            }
            if max[i] < row[i] {
                max[i] = row[i];
            }
        }
    }

    for mut row in matrix.outer_iter_mut() {
        for i in 0..row.len() {
            let range = max[i] - min[i];
            row[i] = if range > 0. { (row[i] - min[i]) / range } else { 0. };
        }
    }
}

/// Accuracy of always predicting the most frequent label.
pub fn majority_baseline(labels: &ArrayView1<Label>) -> f64 {
    let mut counts = HashMap::new();
    let mut max_count = 0;

    for y in labels {
        let count = counts.entry(y).or_insert(0);
        *count += 1;
        if *count > max_count {
            max_count = *count;
        }
    }

    match labels.len() {
        0 => 0.,
        n => f64::from(max_count) / n as f64,
    }
}
