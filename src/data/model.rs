use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SchemaError;

/// Field names under `curves` that hold metadata rather than comparable series.
pub const RESERVED_FIELD_NAMES: [&str; 2] = ["t", "sidre_group_name"];

/// Whether `name` is one of [`RESERVED_FIELD_NAMES`].
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELD_NAMES.contains(&name)
}

// ---------------------------------------------------------------------------
// Side – which input a document came from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Baseline,
    Test,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Baseline => write!(f, "Baseline"),
            Side::Test => write!(f, "Test"),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldData – data type label → values
// ---------------------------------------------------------------------------

/// Ordered sequence of scalars; the index is the comparison key.
pub type ValueList = Vec<f64>;

/// All series recorded under one field name, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldData {
    pub series: Vec<(String, ValueList)>,
}

impl FieldData {
    pub fn new(series: Vec<(String, ValueList)>) -> Self {
        FieldData { series }
    }

    /// Data type labels in document order.
    pub fn data_types(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self, data_type: &str) -> Option<&ValueList> {
        self.series
            .iter()
            .find(|(name, _)| name == data_type)
            .map(|(_, values)| values)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Curves – the `curves` section of a result document
// ---------------------------------------------------------------------------

/// Comparable fields plus the names of the reserved entries that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curves {
    pub fields: Vec<(String, FieldData)>,
    pub reserved: Vec<String>,
}

impl Curves {
    /// Build from `(name, data)` pairs. Reserved names are moved to `reserved`.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, FieldData)>,
    {
        let mut curves = Curves::default();
        for (name, data) in fields {
            if is_reserved(&name) {
                curves.reserved.push(name);
            } else {
                curves.fields.push((name, data));
            }
        }
        curves
    }

    /// Comparable field names in document order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldData> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, data)| data)
    }
}

// ---------------------------------------------------------------------------
// ResultDocument – one loaded results file
// ---------------------------------------------------------------------------

/// A parsed curve results file. `curves` is optional at parse time so that a
/// missing section surfaces as a [`SchemaError`] instead of a load failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultDocument {
    curves: Option<Curves>,
}

impl ResultDocument {
    pub fn new(curves: Curves) -> Self {
        ResultDocument {
            curves: Some(curves),
        }
    }

    /// A document with no `curves` section.
    pub fn without_curves() -> Self {
        ResultDocument { curves: None }
    }

    /// The `curves` section, or `MissingCurves` attributed to `side`.
    pub fn curves(&self, side: Side) -> Result<&Curves, SchemaError> {
        self.curves
            .as_ref()
            .ok_or(SchemaError::MissingCurves { side })
    }
}

impl FromStr for ResultDocument {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::loader::parse_str(s)
    }
}
