//! Financial news headlines

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uw_core::{ColumnHint, ColumnType, Result};

use super::ToolParams;
use crate::client::{ApiRequest, Endpoint};
use crate::query::QueryParams;
use crate::validate;

pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct NewsHeadlinesParams {
    /// Comma-separated news sources, e.g. 'Reuters,Bloomberg'
    pub sources: Option<String>,
    /// Only headlines containing this term
    pub search_term: Option<String>,
    /// Only major news
    pub major_only: Option<bool>,
    /// Maximum number of results (1-100)
    #[schemars(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    /// Page number, starting at 0
    #[schemars(range(min = 0))]
    pub page: Option<i64>,
}

impl ToolParams for NewsHeadlinesParams {
    const NAME: &'static str = "get_news_headlines";
    const DESCRIPTION: &'static str =
        "Fetch recent financial news headlines, optionally filtered by source or search term";
    const HINTS: &'static [ColumnHint] = &[("created_at", ColumnType::Timestamp)];

    fn validate(&self) -> Result<()> {
        validate::non_empty("sources", self.sources.as_deref())?;
        validate::non_empty("search_term", self.search_term.as_deref())?;
        validate::in_range("limit", self.limit, 1, MAX_LIMIT)?;
        validate::non_negative("page", self.page)
    }

    fn request(&self) -> ApiRequest {
        let query = QueryParams::new()
            .opt("sources", self.sources.as_deref())
            .opt("search_term", self.search_term.as_deref())
            .flag("major_only", self.major_only)
            .opt("limit", self.limit)
            .opt("page", self.page);

        ApiRequest::new(Endpoint::new(["api", "news", "headlines"]), query)
    }
}
