//! MCP server for the Unusual Whales API
//!
//! Exposes the seven `uw-api` tools over the Model Context Protocol. Each tool
//! call returns its [`TabularResult`](uw_core::TabularResult) serialized as
//! JSON, or a structured error object.

pub mod render;
pub mod server;

pub use server::UnusualWhalesServer;
