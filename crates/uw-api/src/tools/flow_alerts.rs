//! Options flow alerts

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uw_core::{ColumnHint, ColumnType, Result};

use super::ToolParams;
use crate::client::{ApiRequest, Endpoint};
use crate::query::QueryParams;
use crate::validate::{self, WireEnum};

/// Issue type of the underlying security
#[derive(Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub enum IssueType {
    #[schemars(rename = "Common Stock")]
    CommonStock,
    #[schemars(rename = "ETF")]
    Etf,
    Index,
    #[schemars(rename = "ADR")]
    Adr,
}

impl WireEnum for IssueType {
    const ALL: &'static [Self] = &[Self::CommonStock, Self::Etf, Self::Index, Self::Adr];

    fn as_str(self) -> &'static str {
        match self {
            Self::CommonStock => "Common Stock",
            Self::Etf => "ETF",
            Self::Index => "Index",
            Self::Adr => "ADR",
        }
    }
}

/// Alert rule that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub enum FlowRule {
    FloorTradeSmallCap,
    FloorTradeMidCap,
    RepeatHits,
    RepeatedHitsAscendingFill,
    RepeatedHitsDescendingFill,
    FloorTradeLargeCap,
    OtmEarningsFloor,
    LowHistoricVolumeFloor,
    SweepsFollowedByFloor,
}

impl WireEnum for FlowRule {
    const ALL: &'static [Self] = &[
        Self::FloorTradeSmallCap,
        Self::FloorTradeMidCap,
        Self::RepeatHits,
        Self::RepeatedHitsAscendingFill,
        Self::RepeatedHitsDescendingFill,
        Self::FloorTradeLargeCap,
        Self::OtmEarningsFloor,
        Self::LowHistoricVolumeFloor,
        Self::SweepsFollowedByFloor,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::FloorTradeSmallCap => "FloorTradeSmallCap",
            Self::FloorTradeMidCap => "FloorTradeMidCap",
            Self::RepeatHits => "RepeatHits",
            Self::RepeatedHitsAscendingFill => "RepeatedHitsAscendingFill",
            Self::RepeatedHitsDescendingFill => "RepeatedHitsDescendingFill",
            Self::FloorTradeLargeCap => "FloorTradeLargeCap",
            Self::OtmEarningsFloor => "OtmEarningsFloor",
            Self::LowHistoricVolumeFloor => "LowHistoricVolumeFloor",
            Self::SweepsFollowedByFloor => "SweepsFollowedByFloor",
        }
    }
}

pub const MAX_LIMIT: i64 = 200;

/// Filters for the flow alerts feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct FlowAlertsParams {
    /// Only include trades where every transaction was an opening trade
    pub all_opening: Option<bool>,
    /// Only include trades on the ask side
    pub is_ask_side: Option<bool>,
    /// Only include trades on the bid side
    pub is_bid_side: Option<bool>,
    /// Only include call trades
    pub is_call: Option<bool>,
    /// Only include floor-executed trades
    pub is_floor: Option<bool>,
    /// Only include out-of-the-money trades
    pub is_otm: Option<bool>,
    /// Only include put trades
    pub is_put: Option<bool>,
    /// Only include intermarket sweep trades
    pub is_sweep: Option<bool>,
    /// Issue types to include
    #[schemars(with = "Option<Vec<IssueType>>")]
    pub issue_types: Option<Vec<String>>,
    /// Alert rules to include
    #[schemars(with = "Option<Vec<FlowRule>>")]
    pub rule_name: Option<Vec<String>>,
    /// Maximum number of results (1-200)
    #[schemars(range(min = 1, max = 200))]
    pub limit: Option<i64>,
    /// Minimum difference (as a decimal) between strike and underlying
    pub min_diff: Option<f64>,
    /// Maximum difference (as a decimal) between strike and underlying
    pub max_diff: Option<f64>,
    /// Minimum days to expiration
    pub min_dte: Option<i64>,
    /// Maximum days to expiration
    pub max_dte: Option<i64>,
    /// Minimum open interest
    pub min_open_interest: Option<i64>,
    /// Maximum open interest
    pub max_open_interest: Option<i64>,
    /// Minimum premium in dollars
    pub min_premium: Option<i64>,
    /// Maximum premium in dollars
    pub max_premium: Option<i64>,
    /// Minimum number of contracts in the trade
    pub min_size: Option<i64>,
    /// Maximum number of contracts in the trade
    pub max_size: Option<i64>,
    /// Minimum option volume
    pub min_volume: Option<i64>,
    /// Maximum option volume
    pub max_volume: Option<i64>,
    /// Minimum volume to open interest ratio
    pub min_volume_oi_ratio: Option<f64>,
    /// Maximum volume to open interest ratio
    pub max_volume_oi_ratio: Option<f64>,
    /// Only alerts newer than this ISO-8601 date or timestamp
    pub newer_than: Option<String>,
    /// Only alerts older than this ISO-8601 date or timestamp
    pub older_than: Option<String>,
    /// Tickers to include, e.g. 'AAPL,INTC'; prefix with '-' to exclude
    pub ticker_symbol: Option<String>,
}

const FLOW_HINTS: &[ColumnHint] = &[
    ("created_at", ColumnType::Timestamp),
    ("expiry", ColumnType::Date),
    ("next_earnings_date", ColumnType::Date),
    ("total_ask_side_prem", ColumnType::Int),
    ("total_bid_side_prem", ColumnType::Int),
    ("total_premium", ColumnType::Int),
    ("ask", ColumnType::Float),
    ("bid", ColumnType::Float),
    ("iv_end", ColumnType::Float),
    ("iv_start", ColumnType::Float),
    ("marketcap", ColumnType::Float),
    ("price", ColumnType::Float),
    ("strike", ColumnType::Float),
    ("underlying_price", ColumnType::Float),
    ("volume_oi_ratio", ColumnType::Float),
];

impl ToolParams for FlowAlertsParams {
    const NAME: &'static str = "get_flow_alerts";
    const DESCRIPTION: &'static str = "Fetch options flow alerts (unusual trades, sweeps, floor trades) \
        filtered by side, contract type, premium, size, volume, open interest, expiry and rule";
    const HINTS: &'static [ColumnHint] = FLOW_HINTS;

    fn validate(&self) -> Result<()> {
        validate::each_one_of::<IssueType>("issue_types", self.issue_types.as_deref())?;
        validate::each_one_of::<FlowRule>("rule_name", self.rule_name.as_deref())?;
        validate::in_range("limit", self.limit, 1, MAX_LIMIT)?;

        for (param, value) in [
            ("min_dte", self.min_dte),
            ("max_dte", self.max_dte),
            ("min_open_interest", self.min_open_interest),
            ("max_open_interest", self.max_open_interest),
            ("min_premium", self.min_premium),
            ("max_premium", self.max_premium),
            ("min_size", self.min_size),
            ("max_size", self.max_size),
            ("min_volume", self.min_volume),
            ("max_volume", self.max_volume),
        ] {
            validate::non_negative(param, value)?;
        }

        for (param, value) in [
            ("min_diff", self.min_diff),
            ("max_diff", self.max_diff),
            ("min_volume_oi_ratio", self.min_volume_oi_ratio),
            ("max_volume_oi_ratio", self.max_volume_oi_ratio),
        ] {
            validate::finite(param, value)?;
        }

        validate::iso8601("newer_than", self.newer_than.as_deref())?;
        validate::iso8601("older_than", self.older_than.as_deref())?;
        validate::non_empty("ticker_symbol", self.ticker_symbol.as_deref())
    }

    fn request(&self) -> ApiRequest {
        let query = QueryParams::new()
            .flag("all_opening", self.all_opening)
            .flag("is_ask_side", self.is_ask_side)
            .flag("is_bid_side", self.is_bid_side)
            .flag("is_call", self.is_call)
            .flag("is_floor", self.is_floor)
            .flag("is_otm", self.is_otm)
            .flag("is_put", self.is_put)
            .flag("is_sweep", self.is_sweep)
            .list("issue_types", self.issue_types.as_deref())
            .list("rule_name", self.rule_name.as_deref())
            .opt("limit", self.limit)
            .opt("min_diff", self.min_diff)
            .opt("max_diff", self.max_diff)
            .opt("min_dte", self.min_dte)
            .opt("max_dte", self.max_dte)
            .opt("min_open_interest", self.min_open_interest)
            .opt("max_open_interest", self.max_open_interest)
            .opt("min_premium", self.min_premium)
            .opt("max_premium", self.max_premium)
            .opt("min_size", self.min_size)
            .opt("max_size", self.max_size)
            .opt("min_volume", self.min_volume)
            .opt("max_volume", self.max_volume)
            .opt("min_volume_oi_ratio", self.min_volume_oi_ratio)
            .opt("max_volume_oi_ratio", self.max_volume_oi_ratio)
            .opt("newer_than", self.newer_than.as_deref())
            .opt("older_than", self.older_than.as_deref())
            .opt("ticker_symbol", self.ticker_symbol.as_deref().map(str::trim));

        ApiRequest::new(Endpoint::new(["api", "option-trades", "flow-alerts"]), query)
    }
}
