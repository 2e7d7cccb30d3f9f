//! Tool wrappers for the Unusual Whales endpoints
//!
//! Each wrapper is a parameter struct implementing [`ToolParams`]; the
//! generic [`ApiTool`] turns it into a [`Tool`] that validates, builds the
//! request and hands it to the shared [`UnusualWhalesClient`].

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uw_core::{ColumnHint, Result, TabularResult};
use uw_tools::{Tool, ToolRegistry, parse_params, schema_for};

use crate::client::{ApiRequest, UnusualWhalesClient};

pub mod congress;
pub mod flow_alerts;
pub mod holdings;
pub mod insider;
pub mod news;
pub mod stock_state;
pub mod ticker_info;

pub use congress::CongressTradesParams;
pub use flow_alerts::{FlowAlertsParams, FlowRule, IssueType};
pub use holdings::{InstitutionHoldingsParams, OrderDirection};
pub use insider::{InsiderTransactionsParams, MarketCapSize};
pub use news::NewsHeadlinesParams;
pub use stock_state::StockStateParams;
pub use ticker_info::TickerInfoParams;

/// Parameters of one endpoint tool
pub trait ToolParams: DeserializeOwned + JsonSchema + Send + Sync + 'static {
    /// Tool name exposed to clients
    const NAME: &'static str;

    /// Tool description exposed to clients
    const DESCRIPTION: &'static str;

    /// Column type hints applied to the response table
    const HINTS: &'static [ColumnHint] = &[];

    /// Check every constraint before any request is made
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Endpoint and query for validated parameters
    fn request(&self) -> ApiRequest;
}

/// A [`Tool`] backed by one API endpoint
pub struct ApiTool<P> {
    client: Arc<UnusualWhalesClient>,
    _params: PhantomData<fn() -> P>,
}

impl<P> Clone for ApiTool<P> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            _params: PhantomData,
        }
    }
}

impl<P: ToolParams> ApiTool<P> {
    pub fn new(client: Arc<UnusualWhalesClient>) -> Self {
        Self {
            client,
            _params: PhantomData,
        }
    }

    /// Validate typed parameters and fetch the endpoint
    pub async fn call(&self, params: P) -> Result<TabularResult> {
        params.validate()?;
        let request = params.request();
        self.client
            .fetch_with_hints(&request.endpoint, &request.query, P::HINTS)
            .await
    }
}

#[async_trait]
impl<P: ToolParams> Tool for ApiTool<P> {
    async fn execute(&self, params: Value) -> Result<TabularResult> {
        let params: P = parse_params(params)?;
        self.call(params).await
    }

    fn name(&self) -> &str {
        P::NAME
    }

    fn description(&self) -> &str {
        P::DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        schema_for::<P>()
    }
}

/// The seven endpoint tools sharing one client
#[derive(Clone)]
pub struct ToolSet {
    pub flow_alerts: ApiTool<FlowAlertsParams>,
    pub ticker_info: ApiTool<TickerInfoParams>,
    pub stock_state: ApiTool<StockStateParams>,
    pub institution_holdings: ApiTool<InstitutionHoldingsParams>,
    pub insider_transactions: ApiTool<InsiderTransactionsParams>,
    pub congress_trades: ApiTool<CongressTradesParams>,
    pub news_headlines: ApiTool<NewsHeadlinesParams>,
}

impl ToolSet {
    pub fn new(client: Arc<UnusualWhalesClient>) -> Self {
        Self {
            flow_alerts: ApiTool::new(Arc::clone(&client)),
            ticker_info: ApiTool::new(Arc::clone(&client)),
            stock_state: ApiTool::new(Arc::clone(&client)),
            institution_holdings: ApiTool::new(Arc::clone(&client)),
            insider_transactions: ApiTool::new(Arc::clone(&client)),
            congress_trades: ApiTool::new(Arc::clone(&client)),
            news_headlines: ApiTool::new(client),
        }
    }

    /// Registry holding every tool, keyed by name
    pub fn registry(&self) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(self.flow_alerts.clone()));
        registry.register(Arc::new(self.ticker_info.clone()));
        registry.register(Arc::new(self.stock_state.clone()));
        registry.register(Arc::new(self.institution_holdings.clone()));
        registry.register(Arc::new(self.insider_transactions.clone()));
        registry.register(Arc::new(self.congress_trades.clone()));
        registry.register(Arc::new(self.news_headlines.clone()));
        registry
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::ApiConfig;
    use crate::transport::MockHttpTransport;

    /// Client over a mock that must never be called
    pub fn offline_client() -> Arc<UnusualWhalesClient> {
        let mut mock = MockHttpTransport::new();
        mock.expect_get().times(0);
        client_with(mock)
    }

    pub fn client_with(mock: MockHttpTransport) -> Arc<UnusualWhalesClient> {
        let config = ApiConfig::builder("test-token").build().unwrap();
        Arc::new(UnusualWhalesClient::with_transport(&config, Arc::new(mock)))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::offline_client;
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;
    use tokio_test::assert_err;

    #[test]
    fn test_registry_holds_seven_unique_tools() {
        let registry = ToolSet::new(offline_client()).registry();
        assert_eq!(registry.len(), 7);

        let names: HashSet<_> = registry.names().into_iter().collect();
        for expected in [
            "get_flow_alerts",
            "get_ticker_info",
            "get_stock_state",
            "get_institution_holdings",
            "get_insider_transactions",
            "get_congress_trades",
            "get_news_headlines",
        ] {
            assert!(names.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_every_tool_has_object_schema() {
        let registry = ToolSet::new(offline_client()).registry();
        for tool in registry.list_tools() {
            let schema = tool.input_schema();
            assert_eq!(schema["type"], "object", "{}", tool.name());
            assert!(!tool.description().is_empty());
        }
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_arguments_offline() {
        let registry = ToolSet::new(offline_client()).registry();

        let err = assert_err!(registry.execute("get_ticker_info", json!({})).await);
        assert_eq!(err.param(), Some("ticker"));

        let err = assert_err!(
            registry
                .execute("get_news_headlines", json!({ "limit": 500 }))
                .await
        );
        assert_eq!(err.param(), Some("limit"));

        let err = assert_err!(
            registry
                .execute("get_congress_trades", json!({ "color": "red" }))
                .await
        );
        assert_eq!(err.param(), Some("color"));
    }
}
