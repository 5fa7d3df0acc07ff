//! Decoding of the visualization query response.

use serde::Deserialize;

use crate::common::errors::PayloadError;
use crate::domain::sheet::{Row, RowCollection};

#[derive(Debug, Deserialize)]
struct QueryResponse {
    table: Table,
}

#[derive(Debug, Deserialize)]
struct Table {
    #[serde(default)]
    rows: Vec<Row>,
}

/// Strip the JS callback wrapper and decode the row data inside.
///
/// Responses arrive as `/*O_o*/\ngoogle.visualization.Query.setResponse({...});`,
/// a single JSON object wrapped in a function call. Everything between the
/// first `(` and the last `)` is the object.
pub fn parse_rows(raw: &str) -> Result<RowCollection, PayloadError> {
    let start = raw.find('(').ok_or(PayloadError::MissingWrapper)?;
    let end = raw.rfind(')').ok_or(PayloadError::MissingWrapper)?;
    if end <= start {
        return Err(PayloadError::MissingWrapper);
    }
    let response: QueryResponse = serde_json::from_str(&raw[start + 1..end])?;
    Ok(response.table.rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrapped(body: serde_json::Value) -> String {
        format!(
            "/*O_o*/\ngoogle.visualization.Query.setResponse({});",
            body
        )
    }

    #[test]
    fn decodes_rows_from_a_wrapped_response() {
        let raw = wrapped(json!({
            "version": "0.6",
            "status": "ok",
            "table": {
                "cols": [{"id": "A", "label": "title", "type": "string"}],
                "rows": [
                    {"c": [{"v": "launch"}, {"v": 45000, "f": "Date(2023,2,15)"}]},
                    {"c": [null, {"v": 2}]}
                ]
            }
        }));

        let rows = parse_rows(&raw).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells[0].as_ref().unwrap().value, json!("launch"));
        assert_eq!(
            rows[0].cells[1].as_ref().unwrap().formatted.as_deref(),
            Some("Date(2023,2,15)")
        );
        assert!(rows[1].cells[0].is_none());
    }

    #[test]
    fn empty_table_decodes_to_no_rows() {
        let raw = wrapped(json!({"table": {"rows": []}}));
        assert!(parse_rows(&raw).unwrap().is_empty());
    }

    #[test]
    fn missing_wrapper_is_an_error() {
        assert!(matches!(
            parse_rows("<!doctype html><p>sign in</p>"),
            Err(PayloadError::MissingWrapper)
        ));
    }

    #[test]
    fn malformed_body_is_an_error() {
        let raw = "google.visualization.Query.setResponse({not json);";
        assert!(matches!(parse_rows(raw), Err(PayloadError::Json(_))));
    }

    #[test]
    fn cell_without_value_decodes_as_null() {
        let raw = wrapped(json!({"table": {"rows": [{"c": [{"f": "only formatted"}]}]}}));
        let rows = parse_rows(&raw).unwrap();
        let cell = rows[0].cells[0].as_ref().unwrap();
        assert!(cell.is_null());
        assert_eq!(cell.formatted.as_deref(), Some("only formatted"));
    }
}
