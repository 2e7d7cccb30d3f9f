//! Unusual Whales API adapter
//!
//! This crate turns typed tool calls into authenticated GET requests against
//! the Unusual Whales REST API and returns each response as a
//! [`TabularResult`](uw_core::TabularResult). It includes:
//!
//! - [`ApiConfig`]: credential, base URL and timeout, loaded once at startup
//! - [`UnusualWhalesClient`]: the request adapter (one GET, no retry, no cache)
//! - [`tools`]: the seven tool wrappers and the [`ToolSet`] that holds them
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use uw_api::{ApiConfig, ToolSet, UnusualWhalesClient};
//! use uw_api::tools::TickerInfoParams;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ApiConfig::from_env()?;
//!     let client = Arc::new(UnusualWhalesClient::new(&config)?);
//!     let tools = ToolSet::new(client);
//!
//!     let table = tools
//!         .ticker_info
//!         .call(TickerInfoParams { ticker: "AAPL".to_string() })
//!         .await?;
//!     println!("{:?}", table.column_names());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod query;
pub mod tools;
pub mod transport;
pub mod validate;

pub use client::{ApiRequest, Endpoint, UnusualWhalesClient};
pub use config::{ApiConfig, ApiConfigBuilder, ConfigError};
pub use query::QueryParams;
pub use tools::ToolSet;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
