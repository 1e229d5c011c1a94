use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::data::model::Side;

// ---------------------------------------------------------------------------
// File access
// ---------------------------------------------------------------------------

/// A `--baseline` / `--test` path that cannot be used as an input file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileAccessError {
    #[error("Given file does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Given file is not a file: {}", .0.display())]
    NotAFile(PathBuf),
}

/// Rejected `--tolerance` value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("tolerance must be a non-negative finite number, got {0}")]
pub struct InvalidTolerance(pub f64);

// ---------------------------------------------------------------------------
// Schema validation
// ---------------------------------------------------------------------------

/// Which way a name set differs from the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetDifference {
    /// Present in the baseline, absent from the test file.
    Missing,
    /// Present in the test file, absent from the baseline.
    Extra,
}

/// Structural disagreement between the baseline and test documents.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaError {
    #[error("{side} file did not have a 'curves' section")]
    MissingCurves { side: Side },

    #[error("{side} file had no field names")]
    EmptyFieldSet { side: Side },

    #[error("{}", describe_field_mismatch(.difference, .names))]
    FieldSetMismatch {
        difference: SetDifference,
        names: Vec<String>,
    },

    #[error("{side} file had no data types under field name: {field}")]
    EmptyDataTypeSet { side: Side, field: String },

    #[error("{}", describe_data_type_mismatch(.field, .difference, .names))]
    DataTypeSetMismatch {
        field: String,
        difference: SetDifference,
        names: Vec<String>,
    },

    #[error("{side} file had no data under: {field}/{data_type}")]
    EmptyValueList {
        side: Side,
        field: String,
        data_type: String,
    },

    #[error(
        "Test file has {} entries than the baseline file under: {field}/{data_type}",
        fewer_or_more(.baseline_len, .test_len)
    )]
    LengthMismatch {
        field: String,
        data_type: String,
        baseline_len: usize,
        test_len: usize,
    },
}

fn fewer_or_more(baseline_len: &usize, test_len: &usize) -> &'static str {
    if test_len < baseline_len {
        "less"
    } else {
        "more"
    }
}

fn describe_field_mismatch(difference: &SetDifference, names: &[String]) -> String {
    match difference {
        SetDifference::Missing => format!(
            "Test file is missing field names that are in the baseline file\n       Missing field names: {}",
            names.join(",")
        ),
        SetDifference::Extra => format!(
            "Test file has extra field names not in baseline file\n       Extra field names: {}",
            names.join(",")
        ),
    }
}

fn describe_data_type_mismatch(field: &str, difference: &SetDifference, names: &[String]) -> String {
    match difference {
        SetDifference::Missing => format!(
            "Test file is missing data types under field name: {field}\n       Missing data types: {}",
            names.join(",")
        ),
        SetDifference::Extra => format!(
            "Test file has extra data types under field name: {field}\n       Extra data types: {}",
            names.join(",")
        ),
    }
}

// ---------------------------------------------------------------------------
// Value validation
// ---------------------------------------------------------------------------

/// One baseline/test scalar pair that differs by more than the tolerance.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error(
    "Test value out of tolerance: {field}/{data_type}/{index}: baseline value={baseline:?}, test value={test:?}"
)]
pub struct ToleranceError {
    pub field: String,
    pub data_type: String,
    pub index: usize,
    pub baseline: f64,
    pub test: f64,
}

/// Anything the comparator reports to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Diagnostic {
    Schema(SchemaError),
    Tolerance(ToleranceError),
}

impl Diagnostic {
    pub fn is_schema(&self) -> bool {
        matches!(self, Diagnostic::Schema(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Schema(e) => write!(f, "{e}"),
            Diagnostic::Tolerance(e) => write!(f, "{e}"),
        }
    }
}

impl From<SchemaError> for Diagnostic {
    fn from(e: SchemaError) -> Self {
        Diagnostic::Schema(e)
    }
}

impl From<ToleranceError> for Diagnostic {
    fn from(e: ToleranceError) -> Self {
        Diagnostic::Tolerance(e)
    }
}
