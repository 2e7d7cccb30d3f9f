//! Shared utilities for uw-mcp
//!
//! This crate provides common functionality used across the uw-mcp workspace:
//! tracing setup and environment variable lookup.

pub mod env;
pub mod logging;

pub use env::{Env, EnvError};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
