//! Insider transactions (Form 4 filings)

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uw_core::{ColumnHint, ColumnType, Result};

use super::ToolParams;
use crate::client::{ApiRequest, Endpoint};
use crate::query::QueryParams;
use crate::validate::{self, WireEnum};

/// Market capitalisation bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[schemars(rename_all = "lowercase")]
pub enum MarketCapSize {
    Small,
    Mid,
    Large,
}

impl WireEnum for MarketCapSize {
    const ALL: &'static [Self] = &[Self::Small, Self::Mid, Self::Large];

    fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Mid => "mid",
            Self::Large => "large",
        }
    }
}

pub const MAX_LIMIT: i64 = 500;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct InsiderTransactionsParams {
    /// Comma-separated tickers, e.g. 'AAPL,MSFT'; prefix with '-' to exclude
    pub ticker_symbol: Option<String>,
    /// Minimum transaction value in dollars
    pub min_value: Option<f64>,
    /// Maximum transaction value in dollars
    pub max_value: Option<f64>,
    /// Minimum stock price at the time of the transaction
    pub min_price: Option<f64>,
    /// Maximum stock price at the time of the transaction
    pub max_price: Option<f64>,
    /// Name of the insider
    pub owner_name: Option<String>,
    /// Comma-separated company sectors
    pub sectors: Option<String>,
    /// Comma-separated company industries
    pub industries: Option<String>,
    /// Minimum market capitalisation
    pub min_marketcap: Option<f64>,
    /// Maximum market capitalisation
    pub max_marketcap: Option<f64>,
    /// Market cap bucket
    #[schemars(with = "Option<MarketCapSize>")]
    pub market_cap_size: Option<String>,
    /// Minimum days until the next earnings report
    pub min_earnings_dte: Option<i64>,
    /// Maximum days until the next earnings report
    pub max_earnings_dte: Option<i64>,
    /// Minimum number of shares in the transaction
    pub min_amount: Option<f64>,
    /// Maximum number of shares in the transaction
    pub max_amount: Option<f64>,
    /// Filter on company directors
    pub is_director: Option<bool>,
    /// Filter on company officers
    pub is_officer: Option<bool>,
    /// Only S&P 500 companies
    pub is_s_p_500: Option<bool>,
    /// Filter on 10% owners
    pub is_ten_percent_owner: Option<bool>,
    /// Only common stock transactions
    pub common_stock_only: Option<bool>,
    /// Transaction codes, e.g. ['P', 'S']
    pub transaction_codes: Option<Vec<String>>,
    /// Comma-separated acquisition/disposition codes
    pub security_ad_codes: Option<String>,
    /// Maximum number of results (1-500)
    #[schemars(range(min = 1, max = 500))]
    pub limit: Option<i64>,
    /// Page number, starting at 0
    #[schemars(range(min = 0))]
    pub page: Option<i64>,
}

impl ToolParams for InsiderTransactionsParams {
    const NAME: &'static str = "get_insider_transactions";
    const DESCRIPTION: &'static str = "Fetch insider transactions filtered by ticker, owner, sector, \
        value, price, market cap and transaction code";
    const HINTS: &'static [ColumnHint] = &[
        ("amount", ColumnType::Int),
        ("shares_owned_after", ColumnType::Int),
        ("shares_owned_before", ColumnType::Int),
        ("transactions", ColumnType::Int),
        ("date_excercisable", ColumnType::Date),
        ("expiration_date", ColumnType::Date),
        ("filing_date", ColumnType::Date),
        ("next_earnings_date", ColumnType::Date),
        ("transaction_date", ColumnType::Date),
        ("marketcap", ColumnType::Float),
        ("price", ColumnType::Float),
        ("price_excercisable", ColumnType::Float),
        ("stock_price", ColumnType::Float),
    ];

    fn validate(&self) -> Result<()> {
        for (param, value) in [
            ("ticker_symbol", &self.ticker_symbol),
            ("owner_name", &self.owner_name),
            ("sectors", &self.sectors),
            ("industries", &self.industries),
            ("security_ad_codes", &self.security_ad_codes),
        ] {
            validate::non_empty(param, value.as_deref())?;
        }

        for (param, value) in [
            ("min_value", self.min_value),
            ("max_value", self.max_value),
            ("min_price", self.min_price),
            ("max_price", self.max_price),
            ("min_marketcap", self.min_marketcap),
            ("max_marketcap", self.max_marketcap),
            ("min_amount", self.min_amount),
            ("max_amount", self.max_amount),
        ] {
            validate::finite(param, value)?;
            validate::non_negative(param, value)?;
        }

        validate::non_negative("min_earnings_dte", self.min_earnings_dte)?;
        validate::non_negative("max_earnings_dte", self.max_earnings_dte)?;
        validate::one_of::<MarketCapSize>("market_cap_size", self.market_cap_size.as_deref())?;
        validate::each_letter("transaction_codes", self.transaction_codes.as_deref())?;
        validate::in_range("limit", self.limit, 1, MAX_LIMIT)?;
        validate::non_negative("page", self.page)
    }

    fn request(&self) -> ApiRequest {
        let query = QueryParams::new()
            .opt("ticker_symbol", self.ticker_symbol.as_deref())
            .opt("min_value", self.min_value)
            .opt("max_value", self.max_value)
            .opt("min_price", self.min_price)
            .opt("max_price", self.max_price)
            .opt("owner_name", self.owner_name.as_deref())
            .opt("sectors", self.sectors.as_deref())
            .opt("industries", self.industries.as_deref())
            .opt("min_marketcap", self.min_marketcap)
            .opt("max_marketcap", self.max_marketcap)
            .opt("market_cap_size", self.market_cap_size.as_deref())
            .opt("min_earnings_dte", self.min_earnings_dte)
            .opt("max_earnings_dte", self.max_earnings_dte)
            .opt("min_amount", self.min_amount)
            .opt("max_amount", self.max_amount)
            .bool("is_director", self.is_director)
            .bool("is_officer", self.is_officer)
            .bool("is_s_p_500", self.is_s_p_500)
            .bool("is_ten_percent_owner", self.is_ten_percent_owner)
            .bool("common_stock_only", self.common_stock_only)
            .list("transaction_codes", self.transaction_codes.as_deref())
            .opt("security_ad_codes", self.security_ad_codes.as_deref())
            .opt("limit", self.limit)
            .opt("page", self.page);

        ApiRequest::new(Endpoint::new(["api", "insider", "transactions"]), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ApiTool;
    use crate::tools::test_support::offline_client;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_query_mapping() {
        let params = InsiderTransactionsParams {
            ticker_symbol: Some("AAPL,MSFT".to_string()),
            is_officer: Some(false),
            transaction_codes: Some(vec!["P".to_string(), "S".to_string()]),
            min_value: Some(1_000_000.0),
            ..Default::default()
        };
        assert_ok!(params.validate());

        let request = params.request();
        assert_eq!(request.endpoint.path(), "/api/insider/transactions");
        assert_eq!(
            request.query.keys(),
            vec![
                "ticker_symbol",
                "min_value",
                "is_officer",
                "transaction_codes[]",
                "transaction_codes[]"
            ]
        );
        assert_eq!(request.query.get("is_officer"), Some("false"));
        assert_eq!(request.query.get("min_value"), Some("1000000"));
    }

    #[test]
    fn test_validation_names_parameter() {
        let bad_size = InsiderTransactionsParams {
            market_cap_size: Some("huge".to_string()),
            ..Default::default()
        };
        assert_eq!(
            assert_err!(bad_size.validate()).param(),
            Some("market_cap_size")
        );

        let bad_code = InsiderTransactionsParams {
            transaction_codes: Some(vec!["buy".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            assert_err!(bad_code.validate()).param(),
            Some("transaction_codes")
        );

        let negative = InsiderTransactionsParams {
            max_price: Some(-10.0),
            ..Default::default()
        };
        assert_eq!(assert_err!(negative.validate()).param(), Some("max_price"));

        let blank_owner = InsiderTransactionsParams {
            owner_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(assert_err!(blank_owner.validate()).param(), Some("owner_name"));
    }

    #[tokio::test]
    async fn test_invalid_page_makes_no_request() {
        let tool = ApiTool::<InsiderTransactionsParams>::new(offline_client());
        let params = InsiderTransactionsParams {
            page: Some(-2),
            ..Default::default()
        };
        assert_eq!(assert_err!(tool.call(params).await).param(), Some("page"));
    }
}
