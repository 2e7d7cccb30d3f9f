//! Institutional holdings (13F)

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uw_core::{ColumnHint, ColumnType, Result};

use super::ToolParams;
use crate::client::{ApiRequest, Endpoint};
use crate::query::QueryParams;
use crate::validate::{self, WireEnum};

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[schemars(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl WireEnum for OrderDirection {
    const ALL: &'static [Self] = &[Self::Asc, Self::Desc];

    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

pub const MAX_LIMIT: i64 = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InstitutionHoldingsParams {
    /// Institution name or CIK, e.g. 'VANGUARD GROUP INC' or '0000102909'
    pub name: String,
    /// Report date (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
    /// Earliest report date (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Latest report date (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<String>,
    /// Security types to include, e.g. ['Share', 'Call']
    #[serde(default)]
    pub security_types: Option<Vec<String>>,
    /// Maximum number of results (1-500)
    #[serde(default)]
    #[schemars(range(min = 1, max = 500))]
    pub limit: Option<i64>,
    /// Page number, starting at 0
    #[serde(default)]
    #[schemars(range(min = 0))]
    pub page: Option<i64>,
    /// Column to order by, e.g. 'value'
    #[serde(default)]
    pub order: Option<String>,
    /// Sort order
    #[serde(default)]
    #[schemars(with = "Option<OrderDirection>")]
    pub order_direction: Option<String>,
}

impl ToolParams for InstitutionHoldingsParams {
    const NAME: &'static str = "get_institution_holdings";
    const DESCRIPTION: &'static str = "Fetch the reported holdings of an institution by name or CIK, \
        optionally filtered by report date and security type";
    const HINTS: &'static [ColumnHint] = &[
        ("avg_price", ColumnType::Float),
        ("close", ColumnType::Float),
        ("price_first_buy", ColumnType::Float),
        ("shares_outstanding", ColumnType::Float),
        ("date", ColumnType::Date),
        ("first_buy", ColumnType::Date),
        ("units", ColumnType::Int),
        ("units_change", ColumnType::Int),
        ("value", ColumnType::Int),
    ];

    fn validate(&self) -> Result<()> {
        validate::path_segment("name", &self.name)?;
        validate::date("date", self.date.as_deref())?;
        validate::date("start_date", self.start_date.as_deref())?;
        validate::date("end_date", self.end_date.as_deref())?;
        validate::each_non_empty("security_types", self.security_types.as_deref())?;
        validate::in_range("limit", self.limit, 1, MAX_LIMIT)?;
        validate::non_negative("page", self.page)?;
        validate::non_empty("order", self.order.as_deref())?;
        validate::one_of::<OrderDirection>("order_direction", self.order_direction.as_deref())
    }

    fn request(&self) -> ApiRequest {
        let query = QueryParams::new()
            .opt("date", self.date.as_deref())
            .opt("start_date", self.start_date.as_deref())
            .opt("end_date", self.end_date.as_deref())
            .list("security_types", self.security_types.as_deref())
            .opt("limit", self.limit)
            .opt("page", self.page)
            .opt("order", self.order.as_deref())
            .opt("order_direction", self.order_direction.as_deref());

        ApiRequest::new(
            Endpoint::new([
                "api".to_string(),
                "institution".to_string(),
                self.name.trim().to_string(),
                "holdings".to_string(),
            ]),
            query,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ApiTool;
    use crate::tools::test_support::offline_client;
    use tokio_test::{assert_err, assert_ok};

    fn vanguard() -> InstitutionHoldingsParams {
        InstitutionHoldingsParams {
            name: "VANGUARD GROUP INC".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_query_mapping() {
        let params = InstitutionHoldingsParams {
            security_types: Some(vec!["Share".to_string(), "Call".to_string()]),
            start_date: Some("2024-01-01".to_string()),
            order_direction: Some("asc".to_string()),
            page: Some(2),
            ..vanguard()
        };
        assert_ok!(params.validate());

        let request = params.request();
        assert_eq!(
            request.endpoint.path(),
            "/api/institution/VANGUARD GROUP INC/holdings"
        );
        assert_eq!(
            request.query.keys(),
            vec![
                "start_date",
                "security_types[]",
                "security_types[]",
                "page",
                "order_direction"
            ]
        );
    }

    #[test]
    fn test_validation_names_parameter() {
        let bad_date = InstitutionHoldingsParams {
            end_date: Some("2024/03/31".to_string()),
            ..vanguard()
        };
        assert_eq!(assert_err!(bad_date.validate()).param(), Some("end_date"));

        let bad_direction = InstitutionHoldingsParams {
            order_direction: Some("up".to_string()),
            ..vanguard()
        };
        assert_eq!(
            assert_err!(bad_direction.validate()).param(),
            Some("order_direction")
        );

        let negative_page = InstitutionHoldingsParams {
            page: Some(-1),
            ..vanguard()
        };
        assert_eq!(assert_err!(negative_page.validate()).param(), Some("page"));
    }

    #[tokio::test]
    async fn test_blank_name_makes_no_request() {
        let tool = ApiTool::<InstitutionHoldingsParams>::new(offline_client());
        let params = InstitutionHoldingsParams {
            name: "   ".to_string(),
            ..Default::default()
        };
        let err = assert_err!(tool.call(params).await);
        assert_eq!(err.param(), Some("name"));
    }

    #[tokio::test]
    async fn test_dot_segment_name_makes_no_request() {
        let tool = ApiTool::<InstitutionHoldingsParams>::new(offline_client());
        for name in [".", ".."] {
            let params = InstitutionHoldingsParams {
                name: name.to_string(),
                ..Default::default()
            };
            let err = assert_err!(tool.call(params).await);
            assert_eq!(err.param(), Some("name"));
        }
    }
}
