//! Tool trait definition

use async_trait::async_trait;
use regex::Regex;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::LazyLock;
use uw_core::{Error, Result, TabularResult};

/// Trait for tools exposed to agents
///
/// Each tool must provide a name, description, and JSON schema for its input.
/// Execution is stateless: one call validates its parameters, performs at
/// most one request and returns a fresh table.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// The API response as a table, or a validation, request or parse error
    async fn execute(&self, params: Value) -> Result<TabularResult>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the LLM understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;
}

static FIELD_IN_MESSAGE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?:missing|unknown) field `([^`]+)`").ok());

/// Deserialize tool arguments, reporting failures as validation errors
///
/// A null payload is treated as an empty argument object.
pub fn parse_params<P: DeserializeOwned>(params: Value) -> Result<P> {
    let params = if params.is_null() { json!({}) } else { params };

    serde_json::from_value(params).map_err(|e| {
        let message = e.to_string();
        let param = FIELD_IN_MESSAGE
            .as_ref()
            .and_then(|re| re.captures(&message))
            .and_then(|caps| caps.get(1))
            .map_or_else(|| "arguments".to_string(), |m| m.as_str().to_string());
        Error::validation(param, message)
    })
}

/// JSON schema of a parameter type
pub fn schema_for<P: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(P)).unwrap_or_else(|_| json!({ "type": "object" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    #[serde(deny_unknown_fields)]
    struct Params {
        /// Stock ticker symbol
        ticker: String,
        #[serde(default)]
        limit: Option<u32>,
    }

    #[test]
    fn test_parse_params() {
        let params: Params = parse_params(json!({ "ticker": "AAPL", "limit": 5 })).unwrap();
        assert_eq!(params.ticker, "AAPL");
        assert_eq!(params.limit, Some(5));
    }

    #[test]
    fn test_parse_params_names_missing_field() {
        let err = parse_params::<Params>(json!({})).unwrap_err();
        assert_eq!(err.param(), Some("ticker"));
        assert_eq!(err.kind(), uw_core::ErrorKind::Validation);

        let err = parse_params::<Params>(Value::Null).unwrap_err();
        assert_eq!(err.param(), Some("ticker"));
    }

    #[test]
    fn test_parse_params_names_unknown_field() {
        let err = parse_params::<Params>(json!({ "ticker": "AAPL", "side": "buy" })).unwrap_err();
        assert_eq!(err.param(), Some("side"));
    }

    #[test]
    fn test_parse_params_type_mismatch() {
        let err = parse_params::<Params>(json!({ "ticker": 42 })).unwrap_err();
        assert_eq!(err.param(), Some("arguments"));
    }

    #[test]
    fn test_schema_for() {
        let schema = schema_for::<Params>();
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["ticker"].is_object());
        assert_eq!(schema["required"][0], "ticker");
    }
}
