//! Conversion MCP Tools
//!
//! Unit conversion, best-match selection, and grouping of recipe supplies.

use serde::Serialize;

use crate::measure::{
    self, Catalog, ConversionResult, LocaleFamily, MatchRequest, QuantityKind, UnitOfMeasure,
};
use crate::models::{self, Supply};

/// Response for best_match
#[derive(Debug, Serialize)]
pub struct BestMatchResponse {
    pub locale: String,
    pub family: LocaleFamily,
    /// Formatted value for display
    pub value: String,
    pub symbol: String,
    /// Unrounded converted value; absent for unitless quantities
    pub raw_value: Option<f64>,
    pub unit_code: Option<&'static str>,
}

/// Summary of a unit for list_units
#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub unit_code: &'static str,
    pub symbol: &'static str,
    pub quantity_kind: QuantityKind,
    pub is_base: bool,
}

impl From<&UnitOfMeasure> for UnitSummary {
    fn from(unit: &UnitOfMeasure) -> Self {
        Self {
            unit_code: unit.unit_code,
            symbol: unit.symbol,
            quantity_kind: unit.quantity_kind,
            is_base: unit.is_base(),
        }
    }
}

/// Response for list_units
#[derive(Debug, Serialize)]
pub struct ListUnitsResponse {
    pub locale: String,
    pub family: LocaleFamily,
    pub units: Vec<UnitSummary>,
    pub total: usize,
}

/// Response for group_by_quantity
#[derive(Debug, Serialize)]
pub struct GroupByQuantityResponse {
    pub groups: Vec<Supply>,
    pub total: usize,
}

pub fn convert_to_base(value: f64, unit_code: &str) -> Result<ConversionResult, String> {
    measure::convert_to_base(value, unit_code).map_err(|e| e.to_string())
}

pub fn convert_from_base(value: f64, unit_code: &str) -> Result<ConversionResult, String> {
    measure::convert_from_base(value, unit_code).map_err(|e| e.to_string())
}

/// Pick the most readable unit for a quantity in `locale`
pub fn best_match(
    locale: &str,
    value: f64,
    unit_code: Option<&str>,
    goal: f64,
) -> Result<BestMatchResponse, String> {
    let request = MatchRequest {
        locale: locale.to_string(),
        value,
        unit_code: unit_code.map(str::to_string),
    };
    let (display, matched) =
        measure::best_conversion(&request, goal).map_err(|e| e.to_string())?;

    Ok(BestMatchResponse {
        locale: request.locale,
        family: LocaleFamily::from_locale(locale),
        value: display.value,
        symbol: display.symbol,
        raw_value: matched.as_ref().map(|best| best.value),
        unit_code: matched.map(|best| best.unit_code),
    })
}

/// Units offered for `locale`, optionally limited to one quantity kind
pub fn list_units(locale: &str, quantity_kind: Option<&str>) -> Result<ListUnitsResponse, String> {
    let kinds: Vec<QuantityKind> = match quantity_kind {
        Some(name) => vec![QuantityKind::from_str(name)
            .ok_or_else(|| format!("Unknown quantity kind: {}", name))?],
        None => QuantityKind::ALL.to_vec(),
    };

    let catalog = Catalog::builtin().map_err(|e| e.to_string())?;
    let units: Vec<UnitSummary> = kinds
        .into_iter()
        .flat_map(|kind| catalog.available_units(kind, locale))
        .map(UnitSummary::from)
        .collect();

    Ok(ListUnitsResponse {
        locale: locale.to_string(),
        family: LocaleFamily::from_locale(locale),
        total: units.len(),
        units,
    })
}

pub fn group_by_quantity(supplies: &[Supply]) -> GroupByQuantityResponse {
    let groups = models::group_by_quantity(supplies);
    GroupByQuantityResponse {
        total: groups.len(),
        groups,
    }
}
