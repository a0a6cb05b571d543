//! Server configuration
//!
//! Read once at startup from `RECIPE_UNITS_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::measure::DEFAULT_GOAL;

pub const LOCALE_VAR: &str = "RECIPE_UNITS_LOCALE";
pub const GOAL_VAR: &str = "RECIPE_UNITS_GOAL";
pub const LOCALES_DIR_VAR: &str = "RECIPE_UNITS_LOCALES_DIR";

pub const DEFAULT_LOCALE: &str = "en";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be finite and positive, got {value}")]
    OutOfRange { var: &'static str, value: f64 },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Resolved server settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    /// Locale for tool calls that omit one
    pub default_locale: String,
    /// Readability goal for best-match selection
    pub goal: f64,
    /// Root of `<language>/translation.json` dictionaries
    pub locales_dir: PathBuf,
}

impl ServerConfig {
    /// Resolve from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let default_locale = match lookup(LOCALE_VAR) {
            Some(locale) if locale.trim().is_empty() => {
                return Err(ConfigError::Empty { var: LOCALE_VAR })
            }
            Some(locale) => locale.trim().to_string(),
            None => DEFAULT_LOCALE.to_string(),
        };

        let goal = match lookup(GOAL_VAR) {
            Some(raw) => parse_goal(&raw)?,
            None => DEFAULT_GOAL,
        };

        let locales_dir = lookup(LOCALES_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_locales_dir);

        Ok(Self {
            default_locale,
            goal,
            locales_dir,
        })
    }

    /// `locale` when given and non-empty, else the default
    pub fn locale_or_default<'a>(&'a self, locale: Option<&'a str>) -> &'a str {
        locale
            .map(str::trim)
            .filter(|locale| !locale.is_empty())
            .unwrap_or(&self.default_locale)
    }
}

fn parse_goal(raw: &str) -> ConfigResult<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        var: GOAL_VAR,
        value: raw.to_string(),
    })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::OutOfRange {
            var: GOAL_VAR,
            value,
        });
    }
    Ok(value)
}

/// `<project>/public/locales`, with the project root found from the executable
fn default_locales_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut path = project_root(exe_dir);
    path.push("public");
    path.push("locales");
    path
}

/// Step out of `target/release` or `target/debug` when running from a build dir
fn project_root(exe_dir: PathBuf) -> PathBuf {
    if exe_dir.ends_with("release") || exe_dir.ends_with("debug") {
        if let Some(grandparent) = exe_dir.parent().and_then(Path::parent) {
            return grandparent.to_path_buf();
        }
    }
    exe_dir
}
