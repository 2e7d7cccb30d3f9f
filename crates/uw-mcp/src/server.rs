//! MCP ServerHandler implementation for the Unusual Whales tools.
//!
//! Every tool validates its parameters locally, performs one authenticated GET
//! and returns the response table as JSON:
//!
//! - `get_flow_alerts`: options flow alerts with side, size and premium filters
//! - `get_ticker_info`: reference information for one ticker
//! - `get_stock_state`: latest OHLC and volume for one ticker
//! - `get_institution_holdings`: reported holdings of an institution
//! - `get_insider_transactions`: insider buys and sells
//! - `get_congress_trades`: trades disclosed by members of Congress
//! - `get_news_headlines`: recent financial headlines

use std::fmt;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};
use tracing::{info, warn};
use uw_api::tools::{
    CongressTradesParams, FlowAlertsParams, InsiderTransactionsParams, InstitutionHoldingsParams,
    NewsHeadlinesParams, StockStateParams, TickerInfoParams,
};
use uw_api::ToolSet;
use uw_core::{Result as ToolResult, TabularResult};

use crate::render::{error_json, table_json};

/// MCP server handler exposing the seven endpoint tools.
#[derive(Clone)]
pub struct UnusualWhalesServer {
    tool_router: ToolRouter<Self>,
    tools: Arc<ToolSet>,
}

impl fmt::Debug for UnusualWhalesServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnusualWhalesServer")
            .field("tool_router", &self.tool_router)
            .finish_non_exhaustive()
    }
}

impl UnusualWhalesServer {
    pub fn new(tools: Arc<ToolSet>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            tools,
        }
    }

    /// Failures go back as `isError` results carrying the error JSON.
    fn respond(tool: &str, result: &ToolResult<TabularResult>) -> Result<String, String> {
        match result {
            Ok(table) => {
                info!(tool, rows = table.num_rows(), "Tool call succeeded");
                Ok(table_json(table))
            }
            Err(e) => {
                warn!(tool, kind = %e.kind(), error = %e, "Tool call failed");
                Err(error_json(e))
            }
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for UnusualWhalesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "uw-mcp".to_string(),
                title: Some("Unusual Whales MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "Options flow, stock, institutional, insider, congressional and news data \
                     from the Unusual Whales API"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Each tool returns JSON with `columns` (name and type), `rows` (one array per \
                 record, in API order) and `row_count`. On failure the result is an object with \
                 `error` (validation_error, request_error or parse_error), `message`, and \
                 `param` or `status` when known. Results are a single page; nothing is cached."
                    .to_string(),
            ),
        }
    }
}

#[tool_router(router = tool_router)]
impl UnusualWhalesServer {
    #[tool(
        name = "get_flow_alerts",
        description = "Fetch options flow alerts (unusual trades, sweeps, floor trades). Filter by side (is_ask_side, is_bid_side), contract type (is_call, is_put), premium, size, volume, open interest, days to expiry, issue_types, rule_name and ticker_symbol. limit is 1-200."
    )]
    pub async fn get_flow_alerts(
        &self,
        Parameters(params): Parameters<FlowAlertsParams>,
    ) -> Result<String, String> {
        let result = self.tools.flow_alerts.call(params).await;
        Self::respond("get_flow_alerts", &result)
    }

    #[tool(
        name = "get_ticker_info",
        description = "Fetch reference information for a ticker: company name, sector, market cap, average 30-day volume and next earnings date."
    )]
    pub async fn get_ticker_info(
        &self,
        Parameters(params): Parameters<TickerInfoParams>,
    ) -> Result<String, String> {
        let result = self.tools.ticker_info.call(params).await;
        Self::respond("get_ticker_info", &result)
    }

    #[tool(
        name = "get_stock_state",
        description = "Fetch the latest open, high, low, close and volume for a ticker."
    )]
    pub async fn get_stock_state(
        &self,
        Parameters(params): Parameters<StockStateParams>,
    ) -> Result<String, String> {
        let result = self.tools.stock_state.call(params).await;
        Self::respond("get_stock_state", &result)
    }

    #[tool(
        name = "get_institution_holdings",
        description = "Fetch the reported holdings of an institution by name or CIK (e.g. 'VANGUARD GROUP INC'). Filter by report date range and security_types; order by a column with order_direction asc or desc. limit is 1-500."
    )]
    pub async fn get_institution_holdings(
        &self,
        Parameters(params): Parameters<InstitutionHoldingsParams>,
    ) -> Result<String, String> {
        let result = self.tools.institution_holdings.call(params).await;
        Self::respond("get_institution_holdings", &result)
    }

    #[tool(
        name = "get_insider_transactions",
        description = "Fetch insider transactions. Filter by ticker_symbol, owner_name, sectors, industries, value, price, market cap, market_cap_size (small, mid, large), insider role and transaction_codes (e.g. P, S). limit is 1-500."
    )]
    pub async fn get_insider_transactions(
        &self,
        Parameters(params): Parameters<InsiderTransactionsParams>,
    ) -> Result<String, String> {
        let result = self.tools.insider_transactions.call(params).await;
        Self::respond("get_insider_transactions", &result)
    }

    #[tool(
        name = "get_congress_trades",
        description = "Fetch recent stock trades disclosed by members of the US Congress, optionally for one ticker or report date. limit is 1-200."
    )]
    pub async fn get_congress_trades(
        &self,
        Parameters(params): Parameters<CongressTradesParams>,
    ) -> Result<String, String> {
        let result = self.tools.congress_trades.call(params).await;
        Self::respond("get_congress_trades", &result)
    }

    #[tool(
        name = "get_news_headlines",
        description = "Fetch recent financial news headlines, optionally filtered by sources, search_term or major_only. limit is 1-100."
    )]
    pub async fn get_news_headlines(
        &self,
        Parameters(params): Parameters<NewsHeadlinesParams>,
    ) -> Result<String, String> {
        let result = self.tools.news_headlines.call(params).await;
        Self::respond("get_news_headlines", &result)
    }
}
