//! Measurement module
//!
//! Handles the unit table, locale exclusion policy, conversions, and
//! best-unit selection for recipe quantities.

pub mod catalog;
pub mod converter;
pub mod error;
pub mod locale;
pub mod matcher;
pub mod units;

pub use catalog::Catalog;
pub use converter::{
    celsius_to_fahrenheit, convert_from_base, convert_to_base, fahrenheit_to_celsius, from_base,
    to_base, ConversionResult,
};
pub use error::{UnitError, UnitResult};
pub use locale::{
    ExclusionPolicy, LocaleFamily, EXCLUDED_NON_US, EXCLUDED_UNITS_OF_MEASURE, EXCLUDED_US,
};
pub use matcher::{
    best_conversion, best_match, best_match_with_goal, closest, item_required_quantity,
    item_required_quantity_symbol, item_required_quantity_value, MatchRequest, QuantityDisplay,
    DEFAULT_GOAL,
};
pub use units::{Conversion, QuantityKind, UnitOfMeasure, UnitTable, UNITS_OF_MEASURE};
