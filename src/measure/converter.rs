//! Unit conversion functions
//!
//! Converts values between any registered unit and the base unit of its
//! quantity kind. No rounding happens here; display formatting is left to
//! the caller.

use serde::Serialize;

use super::catalog::Catalog;
use super::error::UnitResult;
use super::units::{Conversion, QuantityKind, UnitTable};

/// A converted value together with the unit it is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionResult {
    pub value: f64,
    pub unit_code: &'static str,
    pub symbol: &'static str,
    pub quantity_kind: QuantityKind,
}

/// Converts Fahrenheit to Celsius
///
/// Example: 98.6 °F -> 37 °C
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Converts Celsius to Fahrenheit
///
/// Example: 37 °C -> 98.6 °F
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert a value in `unit_code` to the base unit of its kind
///
/// Example: 1000 GRM -> { value: 1, unit_code: "KGM", symbol: "kg", quantity_kind: mass }
pub fn to_base(table: &UnitTable, value: f64, unit_code: &str) -> UnitResult<ConversionResult> {
    let unit = table.lookup(unit_code)?;
    let base = table.base_unit_for(unit.quantity_kind)?;

    let base_value = match unit.conversion {
        Conversion::Linear(factor) => value * factor,
        Conversion::Affine { to_base, .. } => to_base(value),
    };

    tracing::debug!(
        "{} {} equals {} {}",
        value,
        unit_code,
        base_value,
        base.unit_code
    );

    Ok(ConversionResult {
        value: base_value,
        unit_code: base.unit_code,
        symbol: base.symbol,
        quantity_kind: base.quantity_kind,
    })
}

/// Convert a value expressed in the base unit into `unit_code`
///
/// Example: 1 (kg) to GRM -> { value: 1000, unit_code: "GRM", symbol: "g", quantity_kind: mass }
pub fn from_base(
    table: &UnitTable,
    base_value: f64,
    unit_code: &str,
) -> UnitResult<ConversionResult> {
    let unit = table.lookup(unit_code)?;

    let value = match unit.conversion {
        Conversion::Linear(factor) => base_value / factor,
        Conversion::Affine { from_base, .. } => from_base(base_value),
    };

    tracing::debug!(
        "{} (base {}) equals {} {}",
        base_value,
        unit.quantity_kind,
        value,
        unit.unit_code
    );

    Ok(ConversionResult {
        value,
        unit_code: unit.unit_code,
        symbol: unit.symbol,
        quantity_kind: unit.quantity_kind,
    })
}

/// Convert to the base unit using the built-in unit table
pub fn convert_to_base(value: f64, unit_code: &str) -> UnitResult<ConversionResult> {
    to_base(Catalog::builtin()?.table(), value, unit_code)
}

/// Convert from the base unit using the built-in unit table
pub fn convert_from_base(value: f64, unit_code: &str) -> UnitResult<ConversionResult> {
    from_base(Catalog::builtin()?.table(), value, unit_code)
}
