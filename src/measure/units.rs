//! Unit types and the unit-of-measure table
//!
//! Unit codes follow UN/CEFACT Recommendation 20. Every quantity kind has
//! exactly one base unit (factor 1) that acts as the pivot for conversions.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::converter::{celsius_to_fahrenheit, fahrenheit_to_celsius};
use super::error::{UnitError, UnitResult};

/// Physical quantity measured by a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityKind {
    Length,
    Mass,
    Time,
    Temperature,
    Area,
    Volume,
}

impl QuantityKind {
    /// All kinds, in table order
    pub const ALL: [QuantityKind; 6] = [
        QuantityKind::Length,
        QuantityKind::Mass,
        QuantityKind::Time,
        QuantityKind::Temperature,
        QuantityKind::Area,
        QuantityKind::Volume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityKind::Length => "length",
            QuantityKind::Mass => "mass",
            QuantityKind::Time => "time",
            QuantityKind::Temperature => "temperature",
            QuantityKind::Area => "area",
            QuantityKind::Volume => "volume",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "length" => Some(QuantityKind::Length),
            "mass" | "weight" => Some(QuantityKind::Mass),
            "time" | "duration" => Some(QuantityKind::Time),
            "temperature" | "thermodynamic temperature" => Some(QuantityKind::Temperature),
            "area" => Some(QuantityKind::Area),
            "volume" => Some(QuantityKind::Volume),
            _ => None,
        }
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a unit relates to the base unit of its kind
#[derive(Debug, Clone, Copy)]
pub enum Conversion {
    /// `base = value * factor`
    Linear(f64),
    /// Non-multiplicative transform in both directions (temperature scales)
    Affine {
        to_base: fn(f64) -> f64,
        from_base: fn(f64) -> f64,
    },
}

/// A single unit of measure record
#[derive(Debug, Clone, Copy)]
pub struct UnitOfMeasure {
    pub quantity_kind: QuantityKind,
    pub unit_code: &'static str,
    pub symbol: &'static str,
    pub conversion: Conversion,
}

impl UnitOfMeasure {
    /// Create a unit converted by a plain factor
    pub const fn linear(
        quantity_kind: QuantityKind,
        unit_code: &'static str,
        symbol: &'static str,
        base_factor: f64,
    ) -> Self {
        Self {
            quantity_kind,
            unit_code,
            symbol,
            conversion: Conversion::Linear(base_factor),
        }
    }

    /// Create a unit with an affine transform to and from the base unit
    pub const fn affine(
        quantity_kind: QuantityKind,
        unit_code: &'static str,
        symbol: &'static str,
        to_base: fn(f64) -> f64,
        from_base: fn(f64) -> f64,
    ) -> Self {
        Self {
            quantity_kind,
            unit_code,
            symbol,
            conversion: Conversion::Affine { to_base, from_base },
        }
    }

    /// Multiplicative factor to the base unit, if the unit is linear
    pub fn base_factor(&self) -> Option<f64> {
        match self.conversion {
            Conversion::Linear(factor) => Some(factor),
            Conversion::Affine { .. } => None,
        }
    }

    /// Whether this is the base unit of its kind
    pub fn is_base(&self) -> bool {
        self.base_factor() == Some(1.0)
    }
}

use QuantityKind::{Area, Length, Mass, Temperature, Time, Volume};

/// Built-in units of measure. Declaration order decides best-match ties.
pub static UNITS_OF_MEASURE: &[UnitOfMeasure] = &[
    // Length (base: metre)
    UnitOfMeasure::linear(Length, "MTR", "m", 1.0),
    UnitOfMeasure::linear(Length, "DMT", "dm", 1e-1),
    UnitOfMeasure::linear(Length, "CMT", "cm", 1e-2),
    UnitOfMeasure::linear(Length, "MMT", "mm", 1e-3),
    UnitOfMeasure::linear(Length, "INH", "in", 25.4e-3),
    UnitOfMeasure::linear(Length, "FOT", "ft", 0.3048),
    // Mass (base: kilogram)
    UnitOfMeasure::linear(Mass, "KGM", "kg", 1.0),
    UnitOfMeasure::linear(Mass, "GRM", "g", 1e-3),
    UnitOfMeasure::linear(Mass, "MRM", "mg", 1e-6),
    UnitOfMeasure::linear(Mass, "LBR", "lb", 0.45359237),
    UnitOfMeasure::linear(Mass, "ONZ", "oz", 2.834952e-2),
    // Time (base: second)
    UnitOfMeasure::linear(Time, "SEC", "s", 1.0),
    UnitOfMeasure::linear(Time, "MIN", "min", 60.0),
    UnitOfMeasure::linear(Time, "HUR", "h", 3600.0),
    UnitOfMeasure::linear(Time, "DAY", "d", 86400.0),
    UnitOfMeasure::linear(Time, "WEE", "wk", 6.048e5),
    UnitOfMeasure::linear(Time, "MON", "mo", 2.6298e6),
    UnitOfMeasure::linear(Time, "ANN", "y", 3.15576e7),
    // Temperature (base: degree Celsius)
    UnitOfMeasure::linear(Temperature, "CEL", "°C", 1.0),
    UnitOfMeasure::affine(
        Temperature,
        "FAH",
        "°F",
        fahrenheit_to_celsius,
        celsius_to_fahrenheit,
    ),
    // Area (base: square metre)
    UnitOfMeasure::linear(Area, "MTK", "m²", 1.0),
    UnitOfMeasure::linear(Area, "DMK", "dm²", 1e-2),
    UnitOfMeasure::linear(Area, "CMK", "cm²", 1e-4),
    UnitOfMeasure::linear(Area, "MMK", "mm²", 1e-6),
    UnitOfMeasure::linear(Area, "INK", "in²", 6.4516e-4),
    UnitOfMeasure::linear(Area, "FTK", "ft²", 9.290304e-2),
    // Volume (base: cubic metre)
    UnitOfMeasure::linear(Volume, "MTQ", "m³", 1.0),
    UnitOfMeasure::linear(Volume, "LTR", "l", 1e-3),
    UnitOfMeasure::linear(Volume, "DLT", "dl", 1e-4),
    UnitOfMeasure::linear(Volume, "CLT", "cl", 1e-5),
    UnitOfMeasure::linear(Volume, "MLT", "ml", 1e-6),
    UnitOfMeasure::linear(Volume, "GLI", "gal (UK)", 4.546092e-3),
    UnitOfMeasure::linear(Volume, "PTI", "pt (UK)", 5.68261e-4),
    UnitOfMeasure::linear(Volume, "QTI", "qt (UK)", 1.1365225e-3),
    UnitOfMeasure::linear(Volume, "OZI", "fl oz (UK)", 2.841306e-5),
    UnitOfMeasure::linear(Volume, "GLL", "gal (US)", 3.785412e-3),
    UnitOfMeasure::linear(Volume, "PTL", "liq pt (US)", 4.731765e-4),
    UnitOfMeasure::linear(Volume, "QTL", "liq qt (US)", 9.463529e-4),
    UnitOfMeasure::linear(Volume, "OZA", "fl oz (US)", 2.957353e-5),
    UnitOfMeasure::linear(Volume, "G21", "cup (US)", 2.365882e-4),
    UnitOfMeasure::linear(Volume, "G24", "tbsp.", 1.478676e-5),
    UnitOfMeasure::linear(Volume, "G25", "tsp.", 4.928922e-6),
];

/// Indexed, validated view over a unit list
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: &'static [UnitOfMeasure],
    index: HashMap<&'static str, usize>,
}

impl UnitTable {
    /// Build a table, rejecting duplicate codes and kinds without exactly one base unit
    pub fn new(units: &'static [UnitOfMeasure]) -> UnitResult<Self> {
        let mut index = HashMap::with_capacity(units.len());
        for (position, unit) in units.iter().enumerate() {
            if index.insert(unit.unit_code, position).is_some() {
                return Err(UnitError::InvariantViolation(format!(
                    "duplicate unit code {}",
                    unit.unit_code
                )));
            }
        }

        let table = Self { units, index };
        for kind in QuantityKind::ALL {
            table.base_unit_for(kind)?;
        }
        Ok(table)
    }

    /// Look up a unit by its code
    pub fn lookup(&self, unit_code: &str) -> UnitResult<&'static UnitOfMeasure> {
        let units = self.units;
        self.index
            .get(unit_code)
            .map(|&position| &units[position])
            .ok_or_else(|| UnitError::UnknownUnit(unit_code.to_string()))
    }

    /// The single base unit for a quantity kind
    pub fn base_unit_for(&self, kind: QuantityKind) -> UnitResult<&'static UnitOfMeasure> {
        let units = self.units;
        let mut bases = units
            .iter()
            .filter(|unit| unit.quantity_kind == kind && unit.is_base());

        match (bases.next(), bases.next()) {
            (Some(base), None) => Ok(base),
            (None, _) => Err(UnitError::InvariantViolation(format!(
                "no base unit for {kind}"
            ))),
            (Some(_), Some(_)) => Err(UnitError::InvariantViolation(format!(
                "more than one base unit for {kind}"
            ))),
        }
    }

    /// All units in declaration order
    pub fn units(&self) -> &'static [UnitOfMeasure] {
        self.units
    }

    /// Units of one kind in declaration order
    pub fn units_of(&self, kind: QuantityKind) -> impl Iterator<Item = &'static UnitOfMeasure> {
        let units = self.units;
        units.iter().filter(move |unit| unit.quantity_kind == kind)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(x: f64) -> f64 {
        x
    }

    static ONE_PER_KIND: &[UnitOfMeasure] = &[
        UnitOfMeasure::linear(Length, "MTR", "m", 1.0),
        UnitOfMeasure::linear(Mass, "KGM", "kg", 1.0),
        UnitOfMeasure::linear(Time, "SEC", "s", 1.0),
        UnitOfMeasure::linear(Temperature, "CEL", "°C", 1.0),
        UnitOfMeasure::linear(Area, "MTK", "m²", 1.0),
        UnitOfMeasure::linear(Volume, "MTQ", "m³", 1.0),
    ];

    static DUPLICATE_CODE: &[UnitOfMeasure] = &[
        UnitOfMeasure::linear(Length, "MTR", "m", 1.0),
        UnitOfMeasure::linear(Mass, "KGM", "kg", 1.0),
        UnitOfMeasure::linear(Time, "SEC", "s", 1.0),
        UnitOfMeasure::linear(Temperature, "CEL", "°C", 1.0),
        UnitOfMeasure::linear(Area, "MTK", "m²", 1.0),
        UnitOfMeasure::linear(Volume, "MTQ", "m³", 1.0),
        UnitOfMeasure::linear(Volume, "MTR", "m", 1e-3),
    ];

    static TWO_MASS_BASES: &[UnitOfMeasure] = &[
        UnitOfMeasure::linear(Length, "MTR", "m", 1.0),
        UnitOfMeasure::linear(Mass, "KGM", "kg", 1.0),
        UnitOfMeasure::linear(Mass, "GRM", "g", 1.0),
        UnitOfMeasure::linear(Time, "SEC", "s", 1.0),
        UnitOfMeasure::linear(Temperature, "CEL", "°C", 1.0),
        UnitOfMeasure::linear(Area, "MTK", "m²", 1.0),
        UnitOfMeasure::linear(Volume, "MTQ", "m³", 1.0),
    ];

    static AFFINE_ONLY_TEMPERATURE: &[UnitOfMeasure] = &[
        UnitOfMeasure::linear(Length, "MTR", "m", 1.0),
        UnitOfMeasure::linear(Mass, "KGM", "kg", 1.0),
        UnitOfMeasure::linear(Time, "SEC", "s", 1.0),
        UnitOfMeasure::affine(Temperature, "FAH", "°F", identity, identity),
        UnitOfMeasure::linear(Area, "MTK", "m²", 1.0),
        UnitOfMeasure::linear(Volume, "MTQ", "m³", 1.0),
    ];

    #[test]
    fn test_builtin_table_is_valid() {
        let table = UnitTable::new(UNITS_OF_MEASURE).unwrap();
        assert_eq!(table.len(), 42);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_every_kind_has_exactly_one_base() {
        let table = UnitTable::new(UNITS_OF_MEASURE).unwrap();
        let expected = [
            (Length, "MTR"),
            (Mass, "KGM"),
            (Time, "SEC"),
            (Temperature, "CEL"),
            (Area, "MTK"),
            (Volume, "MTQ"),
        ];
        for (kind, code) in expected {
            assert_eq!(table.base_unit_for(kind).unwrap().unit_code, code);
        }
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let table = UnitTable::new(UNITS_OF_MEASURE).unwrap();
        let gram = table.lookup("GRM").unwrap();
        assert_eq!(gram.symbol, "g");
        assert_eq!(gram.quantity_kind, Mass);
        assert_eq!(gram.base_factor(), Some(1e-3));

        assert_eq!(
            table.lookup("ZZZ").unwrap_err(),
            UnitError::UnknownUnit("ZZZ".to_string())
        );
        // Codes are case-sensitive
        assert!(table.lookup("grm").is_err());
    }

    #[test]
    fn test_fahrenheit_has_no_factor() {
        let table = UnitTable::new(UNITS_OF_MEASURE).unwrap();
        let fahrenheit = table.lookup("FAH").unwrap();
        assert_eq!(fahrenheit.base_factor(), None);
        assert!(!fahrenheit.is_base());
        assert!(matches!(fahrenheit.conversion, Conversion::Affine { .. }));
    }

    #[test]
    fn test_units_of_keeps_declaration_order() {
        let table = UnitTable::new(UNITS_OF_MEASURE).unwrap();
        let codes: Vec<_> = table.units_of(Mass).map(|u| u.unit_code).collect();
        assert_eq!(codes, vec!["KGM", "GRM", "MRM", "LBR", "ONZ"]);
    }

    #[test]
    fn test_minimal_table_is_valid() {
        let table = UnitTable::new(ONE_PER_KIND).unwrap();
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_rejects_duplicate_codes() {
        let err = UnitTable::new(DUPLICATE_CODE).unwrap_err();
        assert!(matches!(err, UnitError::InvariantViolation(msg) if msg.contains("MTR")));
    }

    #[test]
    fn test_rejects_two_bases_for_one_kind() {
        let err = UnitTable::new(TWO_MASS_BASES).unwrap_err();
        assert!(matches!(err, UnitError::InvariantViolation(msg) if msg.contains("mass")));
    }

    #[test]
    fn test_rejects_kind_without_base() {
        let err = UnitTable::new(AFFINE_ONLY_TEMPERATURE).unwrap_err();
        assert!(
            matches!(err, UnitError::InvariantViolation(msg) if msg.contains("no base unit for temperature"))
        );
    }

    #[test]
    fn test_quantity_kind_from_str() {
        assert_eq!(QuantityKind::from_str("Mass"), Some(Mass));
        assert_eq!(
            QuantityKind::from_str("thermodynamic temperature"),
            Some(Temperature)
        );
        assert_eq!(QuantityKind::from_str("pressure"), None);
    }
}
