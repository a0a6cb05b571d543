//! Recipe Units Status Tool
//!
//! Runtime status of the service and the usage guide served to assistants.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::ServerConfig;
use crate::measure::Catalog;

/// Usage guide for AI assistants
pub const CONVERSION_INSTRUCTIONS: &str = r#"
# Recipe Units Instructions

This server converts recipe quantities and picks the most readable unit for
the reader's locale.

## Quantities

A quantity is a number plus an optional UN/CEFACT unit code, for example
`{"value": 250, "unitCode": "GRM"}`. Quantities without a unit code (eggs,
lemons) are passed through unchanged.

Common codes:

| Kind | Codes |
|------|-------|
| Mass | KGM, GRM, MRM, LBR, ONZ |
| Volume | LTR, DLT, MLT, G21 (cup), G24 (tbsp), G25 (tsp), GLI, PTI, QTI, OZI |
| Length | MTR, CMT, MMT, INH, FOT |
| Temperature | CEL, FAH |
| Time | SEC, MIN, HUR, DAY |

Call `list_units` to see every unit offered for a locale.

## Locales

- `en` with no region, or any `*-US` tag, uses US customary units
  (oz, lb, °F, cups). Metric masses and Celsius are never offered there.
- Every other locale uses metric units. Fahrenheit, ounces and fluid
  gallons, quarts, pints and ounces are never offered there; pounds, cups and
  spoon measures are.
- m³, dm, dm² and cl are never offered.

## Tools

1. `best_match` - the readable form of one quantity. Prefer this for display.
2. `render_recipe` - a whole recipe: tools sorted by name, supplies with equal
   quantities merged, every quantity best-matched and every name translated.
3. `group_by_quantity` - merge supplies whose value and unit code are
   identical. `500 GRM` and `0.5 KGM` are NOT merged.
4. `convert_to_base` / `convert_from_base` - raw conversions to and from the
   base unit of a kind (KGM, MTR, SEC, CEL, MTK, MTQ).

## Display rules

Values are shown with at most two significant digits using the locale's
separators: 1.10231 lb is "1.1" in `en` and "1,1" in `de`.
"#;

/// Service status information
#[derive(Debug, Serialize)]
pub struct UnitsStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub default_locale: String,
    pub goal: f64,
    pub locales_dir: String,
    pub loaded_languages: Vec<String>,
    pub catalog_units: Option<usize>,
    pub catalog_error: Option<String>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks service uptime and reports status
pub struct StatusTracker {
    start_time: Instant,
    config: ServerConfig,
}

impl StatusTracker {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            start_time: Instant::now(),
            config,
        }
    }

    pub fn get_status(&self, loaded_languages: Vec<String>) -> UnitsStatus {
        let build_info = BuildInfo::current();

        let (catalog_units, catalog_error) = match Catalog::builtin() {
            Ok(catalog) => (Some(catalog.table().len()), None),
            Err(e) => (None, Some(e.to_string())),
        };

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));
        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        UnitsStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            default_locale: self.config.default_locale.clone(),
            goal: self.config.goal,
            locales_dir: self.config.locales_dir.display().to_string(),
            loaded_languages,
            catalog_units,
            catalog_error,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
