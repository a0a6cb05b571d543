//! Best-match unit selection
//!
//! Picks the locale-appropriate unit whose converted value is closest to a
//! readable target magnitude, so a recipe shows "250 g" rather than
//! "0.25 kg" or "250000 mg".

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::converter::{from_base, to_base, ConversionResult};
use super::error::{UnitError, UnitResult};
use super::locale::LocaleFamily;
use super::units::{QuantityKind, UnitOfMeasure};
use crate::format::format_value;
use crate::models::Supply;

/// Default readability goal for converted magnitudes
pub const DEFAULT_GOAL: f64 = 250.0;

/// Input to [`best_match`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub locale: String,
    pub value: f64,
    #[serde(default)]
    pub unit_code: Option<String>,
}

/// A value rendered for display together with its unit symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityDisplay {
    pub value: String,
    pub symbol: String,
}

impl Catalog {
    /// Units of `kind` that may be shown for `locale`
    pub fn available_units(&self, kind: QuantityKind, locale: &str) -> Vec<&'static UnitOfMeasure> {
        let family = LocaleFamily::from_locale(locale);
        let units = self.policy().allowed_units(self.table(), kind, family);

        tracing::debug!(
            "{} {} units available for {} ({})",
            units.len(),
            kind,
            locale,
            family.as_str()
        );

        units
    }

    /// Convert a base value into each of `units`, preserving their order
    pub fn convert_to_all(
        &self,
        base_value: f64,
        units: &[&'static UnitOfMeasure],
    ) -> UnitResult<Vec<ConversionResult>> {
        units
            .iter()
            .map(|unit| from_base(self.table(), base_value, unit.unit_code))
            .collect()
    }

    /// Select the allowed unit whose converted value lies closest to `goal`
    pub fn best_unit(
        &self,
        value: f64,
        unit_code: &str,
        locale: &str,
        goal: f64,
    ) -> UnitResult<ConversionResult> {
        let base = to_base(self.table(), value, unit_code)?;
        let units = self.available_units(base.quantity_kind, locale);
        let candidates = self.convert_to_all(base.value, &units)?;

        let best = closest(&candidates, goal).copied().ok_or_else(|| {
            UnitError::InvariantViolation(format!(
                "no {} units allowed for locale {locale}",
                base.quantity_kind
            ))
        })?;

        tracing::debug!(
            "Best match for {} {}: {} {}",
            value,
            unit_code,
            best.value,
            best.unit_code
        );

        Ok(best)
    }
}

/// The candidate closest to `goal`; the first one wins on equal distance
pub fn closest(candidates: &[ConversionResult], goal: f64) -> Option<&ConversionResult> {
    let distance = |candidate: &ConversionResult| (candidate.value - goal).abs();

    candidates.iter().fold(None, |best, candidate| match best {
        None => Some(candidate),
        Some(current) if distance(candidate) < distance(current) => Some(candidate),
        keep => keep,
    })
}

/// Best-match and format a quantity with the built-in catalog and default goal
///
/// Quantities without a unit code are passed through with an empty symbol.
pub fn best_match(request: &MatchRequest) -> UnitResult<QuantityDisplay> {
    best_match_with_goal(request, DEFAULT_GOAL)
}

/// Best-match and format a quantity against a custom readability goal
pub fn best_match_with_goal(request: &MatchRequest, goal: f64) -> UnitResult<QuantityDisplay> {
    best_conversion(request, goal).map(|(display, _)| display)
}

/// Like [`best_match_with_goal`], also returning the unrounded pick
///
/// The conversion is `None` for unitless quantities.
pub fn best_conversion(
    request: &MatchRequest,
    goal: f64,
) -> UnitResult<(QuantityDisplay, Option<ConversionResult>)> {
    let matched = match request.unit_code.as_deref() {
        Some(unit_code) => {
            Some(Catalog::builtin()?.best_unit(request.value, unit_code, &request.locale, goal)?)
        }
        None => None,
    };

    let (value, symbol) = matched
        .as_ref()
        .map_or((request.value, ""), |best| (best.value, best.symbol));
    let display = QuantityDisplay {
        value: format_value(value, &request.locale),
        symbol: symbol.to_string(),
    };
    Ok((display, matched))
}

/// Display form of a supply's required quantity
pub fn item_required_quantity(locale: &str, item: &Supply) -> UnitResult<QuantityDisplay> {
    best_match(&MatchRequest {
        locale: locale.to_string(),
        value: item.required_quantity.value,
        unit_code: item.required_quantity.unit_code.clone(),
    })
}

/// Formatted value of a supply's required quantity
pub fn item_required_quantity_value(locale: &str, item: &Supply) -> UnitResult<String> {
    item_required_quantity(locale, item).map(|display| display.value)
}

/// Unit symbol of a supply's required quantity
pub fn item_required_quantity_symbol(locale: &str, item: &Supply) -> UnitResult<String> {
    item_required_quantity(locale, item).map(|display| display.symbol)
}
