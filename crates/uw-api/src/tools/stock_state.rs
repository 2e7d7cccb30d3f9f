//! Latest price state of a ticker

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uw_core::{ColumnHint, ColumnType, Result};

use super::ToolParams;
use crate::client::{ApiRequest, Endpoint};
use crate::query::QueryParams;
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StockStateParams {
    /// Ticker symbol, e.g. 'SPY'
    pub ticker: String,
}

impl ToolParams for StockStateParams {
    const NAME: &'static str = "get_stock_state";
    const DESCRIPTION: &'static str =
        "Fetch the latest open, high, low, close and volume for a ticker";
    const HINTS: &'static [ColumnHint] = &[
        ("open", ColumnType::Float),
        ("high", ColumnType::Float),
        ("low", ColumnType::Float),
        ("close", ColumnType::Float),
        ("tape_time", ColumnType::Timestamp),
        ("total_volume", ColumnType::Int),
        ("volume", ColumnType::Int),
    ];

    fn validate(&self) -> Result<()> {
        validate::ticker("ticker", &self.ticker).map(|_| ())
    }

    fn request(&self) -> ApiRequest {
        let ticker = self.ticker.trim().to_ascii_uppercase();
        ApiRequest::new(
            Endpoint::new([
                "api".to_string(),
                "stock".to_string(),
                ticker,
                "stock-state".to_string(),
            ]),
            QueryParams::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ApiTool;
    use crate::tools::test_support::client_with;
    use crate::transport::{HttpResponse, MockHttpTransport};
    use tokio_test::{assert_err, assert_ok};
    use uw_core::ColumnValue;

    #[test]
    fn test_request_path() {
        let params = StockStateParams {
            ticker: "spy".to_string(),
        };
        assert_ok!(params.validate());
        assert_eq!(params.request().endpoint.path(), "/api/stock/SPY/stock-state");
    }

    #[test]
    fn test_empty_ticker_rejected() {
        let params = StockStateParams {
            ticker: String::new(),
        };
        let err = assert_err!(params.validate());
        assert_eq!(err.param(), Some("ticker"));
    }

    #[tokio::test]
    async fn test_prices_cast_to_float() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get().times(1).returning(|_| {
            Ok(HttpResponse::new(
                200,
                r#"{"data":{"open":"510.1","close":"512.4","volume":"1200345","tape_time":"2024-05-01T20:00:00Z"}}"#,
            ))
        });

        let tool = ApiTool::<StockStateParams>::new(client_with(mock));
        let table = assert_ok!(
            tool.call(StockStateParams {
                ticker: "SPY".to_string()
            })
            .await
        );

        assert_eq!(table.get(0, "close"), Some(&ColumnValue::Float(512.4)));
        assert_eq!(table.get(0, "volume"), Some(&ColumnValue::Int(1_200_345)));
        assert_eq!(table.column_type("tape_time"), Some(ColumnType::Timestamp));
    }

    #[tokio::test]
    async fn test_not_found_is_request_error() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(404, r#"{"message":"not found"}"#)));

        let tool = ApiTool::<StockStateParams>::new(client_with(mock));
        let err = assert_err!(
            tool.call(StockStateParams {
                ticker: "ZZZZ".to_string()
            })
            .await
        );
        assert_eq!(err.http_status(), Some(404));
    }
}
