//! Request adapter for the Unusual Whales REST API

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;
use uw_core::{ColumnHint, Error, Result, TabularResult};

use crate::config::ApiConfig;
use crate::query::QueryParams;
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};

const ACCEPT: &str = "application/json, text/plain";

/// Remote resource path, stored as unencoded segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
}

impl Endpoint {
    /// Build an endpoint from path segments
    ///
    /// Segments are percent-encoded when the URL is built, so a segment may
    /// contain spaces or slashes.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Unencoded path, for logs and tests
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// An endpoint plus its query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub query: QueryParams,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint, query: QueryParams) -> Self {
        Self { endpoint, query }
    }
}

/// Performs one authenticated GET per call and tabulates the response
///
/// Holds only read-only state, so one client can be shared across
/// concurrent tool calls behind an `Arc`.
#[derive(Clone)]
pub struct UnusualWhalesClient {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    authorization: String,
}

impl fmt::Debug for UnusualWhalesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnusualWhalesClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl UnusualWhalesClient {
    /// Create a client backed by `reqwest`
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: &ApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: config.base_url.clone(),
            authorization: config.authorization(),
        }
    }

    /// Absolute URL for an endpoint and query
    pub fn endpoint_url(&self, endpoint: &Endpoint, query: &QueryParams) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| Error::network(format!("base URL '{}' cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(endpoint.segments());

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }

    /// Fetch an endpoint and return its records as a table
    pub async fn fetch(&self, endpoint: &Endpoint, query: &QueryParams) -> Result<TabularResult> {
        self.fetch_with_hints(endpoint, query, &[]).await
    }

    /// Fetch an endpoint, applying column type hints to the table
    pub async fn fetch_with_hints(
        &self,
        endpoint: &Endpoint,
        query: &QueryParams,
        hints: &[ColumnHint],
    ) -> Result<TabularResult> {
        let url = self.endpoint_url(endpoint, query)?;
        debug!(endpoint = %endpoint, params = query.len(), "Sending API request");

        let request = HttpRequest {
            url,
            headers: vec![
                ("Accept".to_string(), ACCEPT.to_string()),
                ("Authorization".to_string(), self.authorization.clone()),
            ],
        };
        let response = self.transport.get(request).await?;

        if !response.is_success() {
            warn!(endpoint = %endpoint, status = response.status, "API request failed");
            return Err(Error::status(response.status, response.body));
        }

        let body: Value = serde_json::from_str(&response.body).map_err(|e| Error::parse(e.to_string()))?;
        let records = extract_records(body)?;
        debug!(endpoint = %endpoint, rows = records.len(), "API request succeeded");

        Ok(TabularResult::from_records(records, hints))
    }
}

/// Pull the record list out of a response body
///
/// Accepts `{"data": [...]}`, `{"data": {...}}` (one record), a null or
/// empty `data`, or a bare top-level array.
pub fn extract_records(body: Value) -> Result<Vec<Map<String, Value>>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.get_mut("data").map(Value::take) {
            Some(Value::Array(items)) => items,
            Some(Value::Object(record)) if record.is_empty() => Vec::new(),
            Some(Value::Object(record)) => return Ok(vec![record]),
            Some(Value::Null) => Vec::new(),
            Some(other) => {
                return Err(Error::parse(format!(
                    "`data` must be an array or object, got {}",
                    json_kind(&other)
                )));
            }
            None => return Err(Error::parse("response object has no `data` field")),
        },
        other => {
            return Err(Error::parse(format!(
                "expected an object or array, got {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(Error::parse(format!(
                "record {index} is {}, not an object",
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
