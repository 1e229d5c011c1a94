use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use super::model::{is_reserved, Curves, FieldData, ResultDocument, ValueList};
use crate::error::FileAccessError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Check that `path` names an existing regular file.
pub fn ensure_file(path: &Path) -> Result<(), FileAccessError> {
    let meta =
        std::fs::metadata(path).map_err(|_| FileAccessError::NotFound(path.to_path_buf()))?;
    if !meta.is_file() {
        return Err(FileAccessError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// Read and parse a curve results file.
pub fn load_file(path: &Path) -> Result<ResultDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let doc = parse_str(&text).with_context(|| format!("loading {}", path.display()))?;
    log::debug!("loaded {}", path.display());
    Ok(doc)
}

/// Parse a curve results document from JSON text.
pub fn parse_str(text: &str) -> Result<ResultDocument> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    parse_document(&root)
}

// ---------------------------------------------------------------------------
// JSON layout
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// {
///   "curves": {
///     "t": { "value": [0.0, 0.1, 0.2] },
///     "sidre_group_name": "curves",
///     "displacement": {
///       "l1norms": [0.0, 0.12, 0.14],
///       "maxs":    [0.0, 0.05, 0.06]
///     }
///   }
/// }
/// ```
///
/// Entries named `t` and `sidre_group_name` are skipped without inspecting
/// their contents. A document without `curves` parses successfully; the
/// comparator reports the missing section.
pub fn parse_document(root: &JsonValue) -> Result<ResultDocument> {
    let obj = root
        .as_object()
        .context("Expected top-level JSON object")?;

    let Some(curves) = obj.get("curves") else {
        return Ok(ResultDocument::without_curves());
    };
    let curves = curves
        .as_object()
        .context("'curves' section is not a JSON object")?;

    let mut parsed = Curves::default();
    for (name, value) in curves {
        if is_reserved(name) {
            parsed.reserved.push(name.clone());
            continue;
        }
        parsed.fields.push((name.clone(), parse_field(name, value)?));
    }

    log::debug!(
        "parsed {} fields ({} reserved entries skipped)",
        parsed.fields.len(),
        parsed.reserved.len()
    );
    Ok(ResultDocument::new(parsed))
}

fn parse_field(field: &str, value: &JsonValue) -> Result<FieldData> {
    let obj = value
        .as_object()
        .with_context(|| format!("Field '{field}' is not a JSON object"))?;

    let series = obj
        .iter()
        .map(|(data_type, values)| {
            json_array_to_f64(values, field, data_type).map(|v| (data_type.clone(), v))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FieldData::new(series))
}

fn json_array_to_f64(val: &JsonValue, field: &str, data_type: &str) -> Result<ValueList> {
    let arr = val
        .as_array()
        .with_context(|| format!("{field}/{data_type}: expected an array of numbers"))?;

    arr.iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64()
                .with_context(|| format!("{field}/{data_type}[{i}]: not a number"))
        })
        .collect()
}
