//! Core abstractions for uw-mcp
//!
//! This crate defines the types shared by every tool: the [`TabularResult`]
//! returned on success and the [`Error`] returned on failure.

pub mod error;
pub mod table;

pub use error::{Error, ErrorKind, Result};
pub use table::{Column, ColumnHint, ColumnType, ColumnValue, Records, TabularResult};
