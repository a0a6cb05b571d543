//! Build information
//!
//! Package metadata plus the counter and timestamp embedded by build.rs.

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity of the running binary, reported by `units_status`
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// 0 when built without the build script
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: VERSION,
            build_number: parse_build_number(option_env!("RECIPE_UNITS_BUILD_NUMBER")),
            build_timestamp: option_env!("RECIPE_UNITS_BUILD_TIMESTAMP").unwrap_or("unknown"),
        }
    }

    /// One-line form used in the banner and logs
    pub fn label(&self) -> String {
        format!("{} v{} (build {}, {})", self.name, self.version, self.build_number, self.build_timestamp)
    }
}

fn parse_build_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Print the startup banner to stderr; stdout carries the MCP stream
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("Recipe Units | {}", info.label());
    tracing::info!(build = info.build_number, "Starting {}", info.label());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_number() {
        assert_eq!(parse_build_number(Some("42")), 42);
        assert_eq!(parse_build_number(Some("7\n")), 7);
        assert_eq!(parse_build_number(Some("12a")), 0);
        assert_eq!(parse_build_number(None), 0);
    }

    #[test]
    fn test_current_uses_package_metadata() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "recipe-units");
        assert_eq!(info.version, VERSION);
        assert!(info.label().starts_with("recipe-units v"));
    }
}
