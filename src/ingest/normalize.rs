//! Columnar query result normalization.
//!
//! Upstream results arrive as `{ "columns": [...], "data": [[...], ...] }`
//! with dotted column paths. Each data row becomes one [`NormalizedRow`] with
//! the nested structure rebuilt from those paths.

use serde_json::Value;

use crate::model::{schema, DatasetKind, NormalizedRow};

/// Convert one columnar query result into normalized rows.
///
/// Missing or malformed `columns`/`data` yield no rows. Non-array data rows
/// are skipped; rows shorter than `columns` leave the trailing fields unset.
#[must_use]
pub fn normalize_query_result(result: &Value) -> Vec<NormalizedRow> {
    let Some(columns) = columns_of(result) else {
        return Vec::new();
    };
    let selected: Vec<(usize, &str)> = columns.into_iter().enumerate().collect();
    build_rows(result, &selected)
}

/// Convert a query result for a known dataset, keeping only schema columns.
///
/// Columns outside [`schema::fields`] are dropped before rows are built.
#[must_use]
pub fn normalize_dataset(kind: DatasetKind, result: &Value) -> Vec<NormalizedRow> {
    let Some(columns) = columns_of(result) else {
        return Vec::new();
    };

    let mut selected = Vec::with_capacity(columns.len());
    for (index, column) in columns.into_iter().enumerate() {
        if schema::is_known_field(kind, column) {
            selected.push((index, column));
        } else {
            tracing::debug!(dataset = %kind, column, "ignoring column outside dataset schema");
        }
    }

    build_rows(result, &selected)
}

/// Column names of a result; non-string entries keep their slot as `""`.
fn columns_of(result: &Value) -> Option<Vec<&str>> {
    let columns = result.get("columns")?.as_array()?;
    Some(columns.iter().map(|c| c.as_str().unwrap_or_default()).collect())
}

fn build_rows(result: &Value, selected: &[(usize, &str)]) -> Vec<NormalizedRow> {
    let Some(data) = result.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };

    data.iter()
        .filter_map(Value::as_array)
        .map(|cells| {
            let mut row = NormalizedRow::new();
            for &(index, column) in selected {
                if column.is_empty() {
                    continue;
                }
                if let Some(cell) = cells.get(index) {
                    row.insert_path(column, coerce_cell(cell));
                }
            }
            row
        })
        .collect()
}

/// Turn `"true"`/`"false"` strings into booleans; keep everything else.
fn coerce_cell(cell: &Value) -> Value {
    match cell.as_str() {
        Some("true") => Value::Bool(true),
        Some("false") => Value::Bool(false),
        _ => cell.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_rows_and_boolean_coercion() {
        let result = json!({
            "columns": ["campaign.id", "campaign.status", "campaign.network_settings.target_content_network"],
            "data": [["1", "ENABLED", "true"], ["2", "PAUSED", "false"]]
        });
        let rows = normalize_query_result(&result);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].str_at("campaign.status"), Some("ENABLED"));
        assert_eq!(
            rows[0].bool_at("campaign.network_settings.target_content_network"),
            Some(true)
        );
        assert_eq!(
            rows[1].bool_at("campaign.network_settings.target_content_network"),
            Some(false)
        );
        // numbers are left for consumers to coerce
        assert_eq!(rows[0].value_at("campaign.id"), Some(&json!("1")));
    }

    #[test]
    fn test_malformed_input_yields_no_rows() {
        assert!(normalize_query_result(&json!(null)).is_empty());
        assert!(normalize_query_result(&json!({"columns": ["a"]})).is_empty());
        assert!(normalize_query_result(&json!({"data": [[1]]})).is_empty());
        assert!(normalize_query_result(&json!({"columns": "a", "data": [[1]]})).is_empty());
        assert!(normalize_query_result(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_short_and_non_array_rows() {
        let result = json!({
            "columns": ["metrics.clicks", "metrics.impressions"],
            "data": [[5], "garbage", [1, 2]]
        });
        let rows = normalize_query_result(&result);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].f64_at("metrics.clicks"), Some(5.0));
        assert!(rows[0].value_at("metrics.impressions").is_none());
        assert_eq!(rows[1].f64_at("metrics.impressions"), Some(2.0));
    }

    #[test]
    fn test_later_column_replaces_scalar_parent() {
        let result = json!({
            "columns": ["metrics", "metrics.clicks"],
            "data": [[7, 3]]
        });
        let rows = normalize_query_result(&result);
        assert_eq!(rows[0].f64_at("metrics.clicks"), Some(3.0));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let result = json!({
            "columns": ["ad_group.id", "ad_group.status"],
            "data": [["10", "ENABLED"]]
        });
        assert_eq!(normalize_query_result(&result), normalize_query_result(&result));
    }

    #[test]
    fn test_schema_filters_unknown_columns() {
        let result = json!({
            "columns": ["campaign.id", "campaign.labels", "campaign.status"],
            "data": [["1", "x", "ENABLED"]]
        });
        let rows = normalize_dataset(DatasetKind::Campaigns, &result);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].str_at("campaign.status"), Some("ENABLED"));
        assert!(rows[0].value_at("campaign.labels").is_none());
    }
}
