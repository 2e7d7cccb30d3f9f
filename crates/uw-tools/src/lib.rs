//! Tool management and execution framework for uw-mcp
//!
//! This crate provides the [`Tool`] trait every exposed operation implements
//! and the [`ToolRegistry`] that resolves tools by name.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{Tool, parse_params, schema_for};
