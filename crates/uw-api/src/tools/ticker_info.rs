//! Ticker reference information

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uw_core::{ColumnHint, ColumnType, Result};

use super::ToolParams;
use crate::client::{ApiRequest, Endpoint};
use crate::query::QueryParams;
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TickerInfoParams {
    /// Ticker symbol, e.g. 'AAPL'
    pub ticker: String,
}

impl ToolParams for TickerInfoParams {
    const NAME: &'static str = "get_ticker_info";
    const DESCRIPTION: &'static str = "Fetch reference information for a ticker: company name, sector, \
        market cap, average volume and next earnings date";
    const HINTS: &'static [ColumnHint] = &[
        ("next_earnings_date", ColumnType::Date),
        ("avg30_volume", ColumnType::Int),
        ("marketcap", ColumnType::Float),
    ];

    fn validate(&self) -> Result<()> {
        validate::ticker("ticker", &self.ticker).map(|_| ())
    }

    fn request(&self) -> ApiRequest {
        let ticker = self.ticker.trim().to_ascii_uppercase();
        ApiRequest::new(
            Endpoint::new(["api".to_string(), "stock".to_string(), ticker, "info".to_string()]),
            QueryParams::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ApiTool;
    use crate::tools::test_support::{client_with, offline_client};
    use crate::transport::{HttpResponse, MockHttpTransport};
    use tokio_test::{assert_err, assert_ok};
    use uw_core::ColumnValue;

    fn params(ticker: &str) -> TickerInfoParams {
        TickerInfoParams {
            ticker: ticker.to_string(),
        }
    }

    #[test]
    fn test_request_path_uppercases_ticker() {
        let request = params(" aapl ").request();
        assert_eq!(request.endpoint.path(), "/api/stock/AAPL/info");
        assert!(request.query.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_ticker_makes_no_request() {
        let tool = ApiTool::<TickerInfoParams>::new(offline_client());
        let err = assert_err!(tool.call(params("AA PL")).await);
        assert_eq!(err.param(), Some("ticker"));
    }

    #[tokio::test]
    async fn test_single_object_becomes_one_row() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .withf(|req| req.url.path() == "/api/stock/MSFT/info")
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::new(
                    200,
                    r#"{"data":{"symbol":"MSFT","marketcap":"3100000000000","next_earnings_date":"2024-07-25"}}"#,
                ))
            });

        let tool = ApiTool::<TickerInfoParams>::new(client_with(mock));
        let table = assert_ok!(tool.call(params("msft")).await);

        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.get(0, "marketcap"), Some(&ColumnValue::Float(3.1e12)));
        assert_eq!(table.column_type("next_earnings_date"), Some(ColumnType::Date));
    }
}
