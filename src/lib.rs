//! Recipe Units Library
//!
//! Locale-aware normalization and display of recipe quantities.

pub mod build_info;
pub mod config;
pub mod format;
pub mod i18n;
pub mod mcp;
pub mod measure;
pub mod models;
pub mod tools;
