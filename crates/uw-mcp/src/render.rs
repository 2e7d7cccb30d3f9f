//! Rendering tool results for MCP clients and the terminal

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde_json::{Value, json};
use uw_core::{Error, Records, TabularResult};

/// Structured error payload that LLM clients can parse
pub fn error_json(err: &Error) -> String {
    let mut body = json!({
        "error": err.kind().as_str(),
        "message": err.to_string(),
    });
    if let Some(param) = err.param() {
        body["param"] = Value::from(param);
    }
    if let Some(status) = err.http_status() {
        body["status"] = Value::from(status);
    }
    body.to_string()
}

/// Table as `{"columns": [...], "rows": [...], "row_count": n}`
pub fn table_json(table: &TabularResult) -> String {
    serde_json::to_string(table).unwrap_or_else(|e| error_json(&Error::parse(e.to_string())))
}

/// Table as a list of objects keyed by column name
pub fn records_json(table: &TabularResult) -> String {
    serde_json::to_string_pretty(&Records(table))
        .unwrap_or_else(|e| error_json(&Error::parse(e.to_string())))
}

/// Text table for terminal output
pub fn text_table(table: &TabularResult) -> String {
    if table.num_columns() == 0 {
        return "(no rows)".to_string();
    }

    let mut out = Table::new();
    out.load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(table.column_names());
    for row in table.rows() {
        out.add_row(row.iter().map(ToString::to_string));
    }
    format!("{out}\n({} rows)", table.num_rows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn sample() -> TabularResult {
        let records: Vec<Map<String, Value>> = vec![
            json!({ "ticker": "AAPL", "premium": 1000 }),
            json!({ "ticker": "TSLA", "premium": 2500 }),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
        TabularResult::from_records(records, &[])
    }

    #[test]
    fn test_table_json_shape() {
        let value: Value = serde_json::from_str(&table_json(&sample())).unwrap();
        assert_eq!(value["row_count"], 2);
        assert_eq!(value["columns"][0], json!({ "name": "ticker", "type": "text" }));
        assert_eq!(value["rows"][1], json!(["TSLA", 2500]));
    }

    #[test]
    fn test_records_json() {
        let value: Value = serde_json::from_str(&records_json(&sample())).unwrap();
        assert_eq!(value[0], json!({ "ticker": "AAPL", "premium": 1000 }));
    }

    #[test]
    fn test_error_json_fields() {
        let value: Value =
            serde_json::from_str(&error_json(&Error::validation("limit", "too large"))).unwrap();
        assert_eq!(value["error"], "validation_error");
        assert_eq!(value["param"], "limit");
        assert!(value.get("status").is_none());

        let value: Value = serde_json::from_str(&error_json(&Error::status(429, ""))).unwrap();
        assert_eq!(value["error"], "request_error");
        assert_eq!(value["status"], 429);
        assert_eq!(value["message"], "Rate limit exceeded");
    }

    #[test]
    fn test_text_table() {
        let text = text_table(&sample());
        assert!(text.contains("ticker"));
        assert!(text.contains("TSLA"));
        assert!(text.ends_with("(2 rows)"));
        assert_eq!(text_table(&TabularResult::empty()), "(no rows)");
    }
}
