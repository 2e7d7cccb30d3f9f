//! Recent congressional trades

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uw_core::{ColumnHint, ColumnType, Result};

use super::ToolParams;
use crate::client::{ApiRequest, Endpoint};
use crate::query::QueryParams;
use crate::validate;

pub const MAX_LIMIT: i64 = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CongressTradesParams {
    /// Maximum number of results (1-200)
    #[schemars(range(min = 1, max = 200))]
    pub limit: Option<i64>,
    /// Only trades reported on this date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Only trades in this ticker
    pub ticker: Option<String>,
}

impl ToolParams for CongressTradesParams {
    const NAME: &'static str = "get_congress_trades";
    const DESCRIPTION: &'static str =
        "Fetch recent stock trades disclosed by members of the US Congress";
    const HINTS: &'static [ColumnHint] = &[
        ("filed_at_date", ColumnType::Date),
        ("transaction_date", ColumnType::Date),
    ];

    fn validate(&self) -> Result<()> {
        validate::in_range("limit", self.limit, 1, MAX_LIMIT)?;
        validate::date("date", self.date.as_deref())?;
        validate::optional_ticker("ticker", self.ticker.as_deref()).map(|_| ())
    }

    fn request(&self) -> ApiRequest {
        let ticker = self.ticker.as_deref().map(|t| t.trim().to_ascii_uppercase());
        let query = QueryParams::new()
            .opt("limit", self.limit)
            .opt("date", self.date.as_deref())
            .opt("ticker", ticker);

        ApiRequest::new(Endpoint::new(["api", "congress", "recent-trades"]), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ApiTool;
    use crate::tools::test_support::client_with;
    use crate::transport::{HttpResponse, MockHttpTransport};
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_query_mapping() {
        let params = CongressTradesParams {
            limit: Some(10),
            ticker: Some("nvda".to_string()),
            ..Default::default()
        };
        assert_ok!(params.validate());

        let request = params.request();
        assert_eq!(request.endpoint.path(), "/api/congress/recent-trades");
        assert_eq!(request.query.keys(), vec!["limit", "ticker"]);
        assert_eq!(request.query.get("ticker"), Some("NVDA"));
    }

    #[test]
    fn test_limit_bounds() {
        let params = CongressTradesParams {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(assert_err!(params.validate()).param(), Some("limit"));
    }

    #[tokio::test]
    async fn test_empty_data_yields_empty_table() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, r#"{"data":[]}"#)));

        let tool = ApiTool::<CongressTradesParams>::new(client_with(mock));
        let table = assert_ok!(tool.call(CongressTradesParams::default()).await);
        assert!(table.is_empty());
        assert_eq!(table.num_columns(), 0);
    }

    #[tokio::test]
    async fn test_rate_limit_is_request_error() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(429, "slow down")));

        let tool = ApiTool::<CongressTradesParams>::new(client_with(mock));
        let err = assert_err!(tool.call(CongressTradesParams::default()).await);
        assert_eq!(err.http_status(), Some(429));
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }
}
