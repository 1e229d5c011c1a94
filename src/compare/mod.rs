//! Baseline vs. test comparison of curve result documents.
//!
//! The comparison runs as a fixed sequence of stages:
//!
//! 1. field names must match (reserved entries excluded)
//! 2. every field must carry the same data types
//! 3. every series must have the same number of values
//! 4. every value pair must agree within the absolute tolerance
//!
//! Stages 1–3 are fatal: when one reports errors the later stages do not run.
//! Stage 4 always runs to completion and its effect on the outcome depends
//! on the [`TolerancePolicy`].

pub mod policy;

pub use policy::{CompareOptions, TolerancePolicy};

use crate::data::model::{Curves, ResultDocument, Side};
use crate::error::{Diagnostic, SchemaError, SetDifference, ToleranceError};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a full comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The documents match. Under [`TolerancePolicy::Warn`] any tolerance
    /// violations are carried along as warnings.
    Success { warnings: Vec<ToleranceError> },
    /// A fatal stage failed, or tolerance was violated under
    /// [`TolerancePolicy::Strict`].
    Failure(Vec<Diagnostic>),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Every diagnostic produced, warnings included.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Outcome::Success { warnings } => warnings.iter().cloned().map(Diagnostic::from).collect(),
            Outcome::Failure(diags) => diags.clone(),
        }
    }

    pub fn tolerance_violations(&self) -> usize {
        match self {
            Outcome::Success { warnings } => warnings.len(),
            Outcome::Failure(diags) => diags.iter().filter(|d| !d.is_schema()).count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Compare `test` against `baseline`.
pub fn compare(baseline: &ResultDocument, test: &ResultDocument, options: &CompareOptions) -> Outcome {
    compare_with(baseline, test, options, |_| {})
}

/// Compare `test` against `baseline`, handing each diagnostic to `observe`
/// as soon as its stage has produced it.
pub fn compare_with<F>(
    baseline: &ResultDocument,
    test: &ResultDocument,
    options: &CompareOptions,
    mut observe: F,
) -> Outcome
where
    F: FnMut(&Diagnostic),
{
    let (baseline, test) = match (baseline.curves(Side::Baseline), test.curves(Side::Test)) {
        (Ok(b), Ok(t)) => (b, t),
        (b, t) => {
            let errors = b.err().into_iter().chain(t.err()).collect();
            return fail(errors, &mut observe);
        }
    };

    let fields = match check_field_names(baseline, test) {
        Ok(fields) => fields,
        Err(errors) => return fail(errors, &mut observe),
    };
    log::debug!("field names match ({} fields)", fields.len());

    if let Err(errors) = check_data_types(&fields, baseline, test) {
        return fail(errors, &mut observe);
    }
    log::debug!("data types match");

    if let Err(errors) = check_value_counts(&fields, baseline, test) {
        return fail(errors, &mut observe);
    }
    log::debug!("value counts match");

    let violations = check_values(&fields, baseline, test, options.tolerance(), |v| {
        observe(&Diagnostic::Tolerance(v.clone()))
    });
    log::debug!(
        "{} values out of tolerance {}",
        violations.len(),
        options.tolerance()
    );

    match options.policy {
        TolerancePolicy::Strict if !violations.is_empty() => {
            Outcome::Failure(violations.into_iter().map(Diagnostic::from).collect())
        }
        _ => Outcome::Success {
            warnings: violations,
        },
    }
}

fn fail<F>(errors: Vec<SchemaError>, observe: &mut F) -> Outcome
where
    F: FnMut(&Diagnostic),
{
    let diags: Vec<Diagnostic> = errors.into_iter().map(Diagnostic::from).collect();
    for diag in &diags {
        observe(diag);
    }
    Outcome::Failure(diags)
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Stage 1. Returns the baseline's comparable field names on success.
pub fn check_field_names<'a>(
    baseline: &'a Curves,
    test: &'a Curves,
) -> Result<Vec<&'a str>, Vec<SchemaError>> {
    let baseline_names = baseline.field_names();
    let test_names = test.field_names();

    let mut errors = Vec::new();
    if baseline_names.is_empty() {
        errors.push(SchemaError::EmptyFieldSet {
            side: Side::Baseline,
        });
    }
    if test_names.is_empty() {
        errors.push(SchemaError::EmptyFieldSet { side: Side::Test });
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let missing = names_not_in(&baseline_names, &test_names);
    if !missing.is_empty() {
        errors.push(SchemaError::FieldSetMismatch {
            difference: SetDifference::Missing,
            names: missing,
        });
    }
    let extra = names_not_in(&test_names, &baseline_names);
    if !extra.is_empty() {
        errors.push(SchemaError::FieldSetMismatch {
            difference: SetDifference::Extra,
            names: extra,
        });
    }

    if errors.is_empty() {
        Ok(baseline_names)
    } else {
        Err(errors)
    }
}

/// Stage 2. Checks every field before giving up.
pub fn check_data_types(
    fields: &[&str],
    baseline: &Curves,
    test: &Curves,
) -> Result<(), Vec<SchemaError>> {
    let mut errors = Vec::new();

    for &field in fields {
        let (Some(b), Some(t)) = (baseline.field(field), test.field(field)) else {
            continue;
        };

        let mut empty = false;
        for (side, data) in [(Side::Baseline, b), (Side::Test, t)] {
            if data.is_empty() {
                errors.push(SchemaError::EmptyDataTypeSet {
                    side,
                    field: field.to_string(),
                });
                empty = true;
            }
        }
        if empty {
            continue;
        }

        let b_types: Vec<&str> = b.data_types().collect();
        let t_types: Vec<&str> = t.data_types().collect();
        for (difference, names) in [
            (SetDifference::Missing, names_not_in(&b_types, &t_types)),
            (SetDifference::Extra, names_not_in(&t_types, &b_types)),
        ] {
            if !names.is_empty() {
                errors.push(SchemaError::DataTypeSetMismatch {
                    field: field.to_string(),
                    difference,
                    names,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Stage 3. Checks every (field, data type) pair before giving up.
pub fn check_value_counts(
    fields: &[&str],
    baseline: &Curves,
    test: &Curves,
) -> Result<(), Vec<SchemaError>> {
    let mut errors = Vec::new();

    for (field, data_type, b, t) in paired_series(fields, baseline, test) {
        let mut empty = false;
        for (side, values) in [(Side::Baseline, b), (Side::Test, t)] {
            if values.is_empty() {
                errors.push(SchemaError::EmptyValueList {
                    side,
                    field: field.to_string(),
                    data_type: data_type.to_string(),
                });
                empty = true;
            }
        }
        if !empty && b.len() != t.len() {
            errors.push(SchemaError::LengthMismatch {
                field: field.to_string(),
                data_type: data_type.to_string(),
                baseline_len: b.len(),
                test_len: t.len(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Stage 4. Collects every out-of-tolerance pair, passing each one to
/// `on_violation` as it is found.
pub fn check_values<F>(
    fields: &[&str],
    baseline: &Curves,
    test: &Curves,
    tolerance: f64,
    mut on_violation: F,
) -> Vec<ToleranceError>
where
    F: FnMut(&ToleranceError),
{
    let mut violations = Vec::new();

    for (field, data_type, b, t) in paired_series(fields, baseline, test) {
        for (index, (&bv, &tv)) in b.iter().zip(t.iter()).enumerate() {
            if !within_tolerance(bv, tv, tolerance) {
                let violation = ToleranceError {
                    field: field.to_string(),
                    data_type: data_type.to_string(),
                    index,
                    baseline: bv,
                    test: tv,
                };
                on_violation(&violation);
                violations.push(violation);
            }
        }
    }

    violations
}

/// Absolute closeness with no relative term. Equal infinities match; NaN
/// never does.
pub fn within_tolerance(baseline: f64, test: f64, tolerance: f64) -> bool {
    baseline == test || (baseline - test).abs() <= tolerance
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Names in `left` that are absent from `right`, in `left`'s order.
fn names_not_in(left: &[&str], right: &[&str]) -> Vec<String> {
    left.iter()
        .filter(|name| !right.contains(name))
        .map(|name| name.to_string())
        .collect()
}

/// `(field, data type, baseline values, test values)` for every series the
/// baseline defines and the test also has.
fn paired_series<'a>(
    fields: &'a [&'a str],
    baseline: &'a Curves,
    test: &'a Curves,
) -> impl Iterator<Item = (&'a str, &'a str, &'a [f64], &'a [f64])> + 'a {
    fields.iter().flat_map(move |&field| {
        let b = baseline.field(field);
        let t = test.field(field);
        b.into_iter()
            .flat_map(|data| data.series.iter())
            .filter_map(move |(data_type, b_values)| {
                let t_values = t?.values(data_type)?;
                Some((field, data_type.as_str(), b_values.as_slice(), t_values.as_slice()))
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FieldData;

    fn doc(fields: &[(&str, &[(&str, &[f64])])]) -> ResultDocument {
        ResultDocument::new(Curves::from_fields(fields.iter().map(|(name, series)| {
            let series = series
                .iter()
                .map(|(dt, values)| (dt.to_string(), values.to_vec()))
                .collect();
            (name.to_string(), FieldData::new(series))
        })))
    }

    fn opts(tolerance: f64) -> CompareOptions {
        CompareOptions::new(tolerance).unwrap()
    }

    fn messages(outcome: &Outcome) -> Vec<String> {
        outcome.diagnostics().iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn identical_documents_pass_at_zero_tolerance() {
        let a = doc(&[("x", &[("series1", &[1.0, 2.0])])]);
        assert_eq!(
            compare(&a, &a.clone(), &opts(0.0)),
            Outcome::Success { warnings: vec![] }
        );
    }

    #[test]
    fn missing_and_extra_field_names() {
        let ab = doc(&[("a", &[("s", &[1.0])]), ("b", &[("s", &[1.0])])]);
        let a = doc(&[("a", &[("s", &[1.0])])]);

        let outcome = compare(&ab, &a, &opts(0.0));
        assert!(!outcome.passed());
        assert!(messages(&outcome)[0].ends_with("Missing field names: b"));

        let outcome = compare(&a, &ab, &opts(0.0));
        assert!(messages(&outcome)[0].ends_with("Extra field names: b"));
    }

    #[test]
    fn same_size_but_different_fields_reports_both_directions() {
        let base = doc(&[("a", &[("s", &[1.0])]), ("b", &[("s", &[1.0])])]);
        let test = doc(&[("a", &[("s", &[1.0])]), ("c", &[("s", &[1.0])])]);
        let msgs = messages(&compare(&base, &test, &opts(0.0)));
        assert_eq!(msgs.len(), 2);
        assert!(msgs[0].ends_with("Missing field names: b"));
        assert!(msgs[1].ends_with("Extra field names: c"));
    }

    #[test]
    fn empty_field_sets_reported_for_both_sides() {
        let empty = doc(&[]);
        let outcome = compare(&empty, &empty, &opts(0.0));
        assert_eq!(
            outcome,
            Outcome::Failure(vec![
                SchemaError::EmptyFieldSet {
                    side: Side::Baseline
                }
                .into(),
                SchemaError::EmptyFieldSet { side: Side::Test }.into(),
            ])
        );
    }

    #[test]
    fn missing_curves_on_both_sides() {
        let none = ResultDocument::without_curves();
        let msgs = messages(&compare(&none, &none, &opts(0.0)));
        assert_eq!(
            msgs,
            vec![
                "Baseline file did not have a 'curves' section",
                "Test file did not have a 'curves' section",
            ]
        );
    }

    #[test]
    fn data_type_mismatches_accumulate_across_fields() {
        let base = doc(&[
            ("a", &[("max", &[1.0]), ("min", &[1.0])]),
            ("b", &[("max", &[1.0])]),
        ]);
        let test = doc(&[
            ("a", &[("max", &[1.0])]),
            ("b", &[("max", &[1.0]), ("avg", &[1.0])]),
        ]);
        let msgs = messages(&compare(&base, &test, &opts(0.0)));
        assert_eq!(msgs.len(), 2);
        assert!(msgs[0].contains("missing data types under field name: a"));
        assert!(msgs[0].ends_with("Missing data types: min"));
        assert!(msgs[1].contains("extra data types under field name: b"));
        assert!(msgs[1].ends_with("Extra data types: avg"));
    }

    #[test]
    fn empty_data_type_set_is_fatal() {
        let base = doc(&[("a", &[])]);
        let test = doc(&[("a", &[("max", &[1.0])])]);
        let outcome = compare(&base, &test, &opts(0.0));
        assert_eq!(
            outcome.diagnostics(),
            vec![Diagnostic::Schema(SchemaError::EmptyDataTypeSet {
                side: Side::Baseline,
                field: "a".into(),
            })]
        );
    }

    #[test]
    fn empty_and_mismatched_data_types_reported_together() {
        let base = doc(&[
            ("x", &[]),
            ("y", &[("v", &[1.0])]),
            ("z", &[("j", &[1.0]), ("k", &[1.0])]),
        ]);
        let test = doc(&[
            ("x", &[("v", &[1.0])]),
            ("y", &[]),
            ("z", &[("j", &[1.0]), ("q", &[1.0])]),
        ]);
        let msgs = messages(&compare(&base, &test, &opts(0.0)));
        assert_eq!(
            msgs,
            vec![
                "Baseline file had no data types under field name: x",
                "Test file had no data types under field name: y",
                "Test file is missing data types under field name: z\n       Missing data types: k",
                "Test file has extra data types under field name: z\n       Extra data types: q",
            ]
        );
    }

    #[test]
    fn length_mismatches_collected_across_fields() {
        let base = doc(&[
            ("x", &[("a", &[1.0]), ("b", &[1.0, 2.0])]),
            ("y", &[("c", &[1.0, 2.0, 3.0])]),
        ]);
        let test = doc(&[
            ("x", &[("a", &[1.0, 2.0]), ("b", &[1.0])]),
            ("y", &[("c", &[1.0])]),
        ]);
        let msgs = messages(&compare(&base, &test, &opts(0.0)));
        assert_eq!(
            msgs,
            vec![
                "Test file has more entries than the baseline file under: x/a",
                "Test file has less entries than the baseline file under: x/b",
                "Test file has less entries than the baseline file under: y/c",
            ]
        );
    }

    #[test]
    fn length_mismatch_stops_before_values() {
        let base = doc(&[("x", &[("series1", &[1.0])]), ("y", &[("s", &[5.0])])]);
        let test = doc(&[
            ("x", &[("series1", &[1.0, 2.0])]),
            ("y", &[("s", &[500.0])]),
        ]);
        let outcome = compare(&base, &test, &opts(0.0));
        assert!(!outcome.passed());
        assert_eq!(outcome.tolerance_violations(), 0);
        assert_eq!(
            messages(&outcome),
            vec!["Test file has more entries than the baseline file under: x/series1"]
        );
    }

    #[test]
    fn empty_value_list_is_reported() {
        let base = doc(&[("x", &[("s", &[])])]);
        let test = doc(&[("x", &[("s", &[1.0])])]);
        let msgs = messages(&compare(&base, &test, &opts(0.0)));
        assert_eq!(msgs, vec!["Baseline file had no data under: x/s"]);
    }

    #[test]
    fn value_within_tolerance_passes() {
        let base = doc(&[("x", &[("s", &[1.0])])]);
        let test = doc(&[("x", &[("s", &[1.05])])]);
        assert_eq!(
            compare(&base, &test, &opts(0.1)),
            Outcome::Success { warnings: vec![] }
        );
    }

    #[test]
    fn violation_is_a_warning_by_default() {
        let base = doc(&[("x", &[("s", &[0.0, 1.0])])]);
        let test = doc(&[("x", &[("s", &[0.0, 1.2])])]);
        let outcome = compare(&base, &test, &opts(0.1));
        assert!(outcome.passed());
        assert_eq!(
            outcome,
            Outcome::Success {
                warnings: vec![ToleranceError {
                    field: "x".into(),
                    data_type: "s".into(),
                    index: 1,
                    baseline: 1.0,
                    test: 1.2,
                }]
            }
        );
    }

    #[test]
    fn violation_fails_under_strict_policy() {
        let base = doc(&[("x", &[("s", &[1.0, 2.0, 3.0])])]);
        let test = doc(&[("x", &[("s", &[1.5, 2.0, 3.5])])]);
        let options = opts(0.1).with_policy(TolerancePolicy::Strict);
        let outcome = compare(&base, &test, &options);
        assert!(!outcome.passed());
        assert_eq!(outcome.tolerance_violations(), 2);
    }

    #[test]
    fn reserved_fields_never_compared() {
        let base = doc(&[("t", &[("value", &[0.0, 1.0])]), ("x", &[("s", &[1.0])])]);
        let test = doc(&[
            ("t", &[("value", &[9.0])]),
            ("sidre_group_name", &[]),
            ("x", &[("s", &[1.0])]),
        ]);
        assert!(compare(&base, &test, &opts(0.0)).passed());
    }

    #[test]
    fn observer_sees_diagnostics_in_order() {
        let base = doc(&[("x", &[("s", &[1.0, 2.0, 3.0])])]);
        let test = doc(&[("x", &[("s", &[9.0, 2.0, 9.0])])]);
        let mut seen = Vec::new();
        compare_with(&base, &test, &opts(0.5), |d| {
            if let Diagnostic::Tolerance(e) = d {
                seen.push(e.index);
            }
        });
        assert_eq!(seen, vec![0, 2]);
    }

    #[test]
    fn check_values_reports_each_violation_as_found() {
        let base = doc(&[("x", &[("s", &[1.0, 2.0, 3.0])]), ("y", &[("s", &[0.0])])]);
        let test = doc(&[("x", &[("s", &[1.0, 9.0, 3.0])]), ("y", &[("s", &[4.0])])]);
        let b = base.curves(Side::Baseline).unwrap();
        let t = test.curves(Side::Test).unwrap();

        let mut seen = Vec::new();
        let violations = check_values(&["x", "y"], b, t, 0.5, |v| {
            seen.push(format!("{}/{}", v.field, v.index));
        });
        assert_eq!(seen, vec!["x/1", "y/0"]);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[1].test, 4.0);
    }

    #[test]
    fn closeness_edge_cases() {
        assert!(within_tolerance(f64::INFINITY, f64::INFINITY, 0.0));
        assert!(!within_tolerance(f64::NAN, f64::NAN, 1.0));
        assert!(!within_tolerance(f64::INFINITY, 1.0, 1e300));
        assert!(within_tolerance(1.0, 1.1, 0.1 + 1e-12));
        // no relative slack at large magnitudes
        assert!(!within_tolerance(1e12, 1e12 + 1.0, 0.5));
    }
}
