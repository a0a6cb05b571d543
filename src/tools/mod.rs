//! Recipe Units Tools module
//!
//! MCP tool implementations for quantity conversion and recipe rendering.

pub mod conversion;
pub mod recipes;
pub mod status;
