//! Regression-test helpers for simulation output.
//!
//! * [`compare`] checks a test run's curve results against a baseline.
//! * [`specs`] resolves the build specs configured for a machine.

pub mod cli;
pub mod compare;
pub mod data;
pub mod error;
pub mod report;
pub mod specs;

pub use compare::{compare, compare_with, CompareOptions, Outcome, TolerancePolicy};
pub use data::model::{Curves, FieldData, ResultDocument, Side, ValueList};
pub use error::{Diagnostic, FileAccessError, SchemaError, ToleranceError};
