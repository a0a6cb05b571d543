//! Locale exclusion policy
//!
//! Decides which units are offered for a locale. The lists are a fixed
//! reference table: some units are never offered, and each locale family
//! drops the units of the other measurement system.

use std::collections::HashSet;

use serde::Serialize;

use super::error::{UnitError, UnitResult};
use super::units::{QuantityKind, UnitOfMeasure, UnitTable};

/// Units never offered as a best match in any locale
pub const EXCLUDED_UNITS_OF_MEASURE: &[&str] = &["DMT", "DMK", "MTQ", "CLT"];

/// Units dropped for US-customary locales
pub const EXCLUDED_US: &[&str] = &["CEL", "KGM", "GRM", "MRM"];

/// Units dropped for every other locale
pub const EXCLUDED_NON_US: &[&str] = &[
    "FAH", "GLI", "PTI", "QTI", "OZI", "GLL", "PTL", "QTL", "OZA", "ONZ",
];

/// Coarse bucketing of locales by unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleFamily {
    UsCustomary,
    NonUs,
}

impl LocaleFamily {
    pub const ALL: [LocaleFamily; 2] = [LocaleFamily::UsCustomary, LocaleFamily::NonUs];

    /// Bucket a BCP 47 style tag (`en`, `en-US`, `de_AT`, `zh-Hant-TW`)
    ///
    /// Bare `en` and any tag with the `US` region are US-customary. This is
    /// broader than an exact `en` match: `en-US`, `EN` and `es-US` all count,
    /// and subtags compare case-insensitively.
    pub fn from_locale(locale: &str) -> Self {
        let mut subtags = locale.trim().split(['-', '_']);
        let language = subtags.next().unwrap_or_default().to_ascii_lowercase();
        let region = subtags.find(|tag| {
            (tag.len() == 2 && tag.chars().all(|c| c.is_ascii_alphabetic()))
                || (tag.len() == 3 && tag.chars().all(|c| c.is_ascii_digit()))
        });

        match region {
            Some(region) if region.eq_ignore_ascii_case("us") => LocaleFamily::UsCustomary,
            Some(_) => LocaleFamily::NonUs,
            None if language == "en" => LocaleFamily::UsCustomary,
            None => LocaleFamily::NonUs,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocaleFamily::UsCustomary => "us_customary",
            LocaleFamily::NonUs => "non_us",
        }
    }
}

/// Immutable exclusion sets, checked against a unit table on construction
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    global: HashSet<&'static str>,
    us_customary: HashSet<&'static str>,
    non_us: HashSet<&'static str>,
}

impl ExclusionPolicy {
    /// Build a policy, rejecting unknown codes and any kind left without units
    pub fn new(
        table: &UnitTable,
        global: &[&'static str],
        us_customary: &[&'static str],
        non_us: &[&'static str],
    ) -> UnitResult<Self> {
        for code in global.iter().chain(us_customary).chain(non_us) {
            table.lookup(code).map_err(|_| {
                UnitError::InvariantViolation(format!("exclusion list names unknown unit {code}"))
            })?;
        }

        let policy = Self {
            global: global.iter().copied().collect(),
            us_customary: us_customary.iter().copied().collect(),
            non_us: non_us.iter().copied().collect(),
        };

        for family in LocaleFamily::ALL {
            for kind in QuantityKind::ALL {
                if policy.allowed_units(table, kind, family).is_empty() {
                    return Err(UnitError::InvariantViolation(format!(
                        "no {kind} units left for {} locales",
                        family.as_str()
                    )));
                }
            }
        }

        Ok(policy)
    }

    pub fn is_excluded(&self, unit_code: &str, family: LocaleFamily) -> bool {
        let family_set = match family {
            LocaleFamily::UsCustomary => &self.us_customary,
            LocaleFamily::NonUs => &self.non_us,
        };
        self.global.contains(unit_code) || family_set.contains(unit_code)
    }

    /// Units of `kind` offered to `family`, in table declaration order
    pub fn allowed_units(
        &self,
        table: &UnitTable,
        kind: QuantityKind,
        family: LocaleFamily,
    ) -> Vec<&'static UnitOfMeasure> {
        table
            .units_of(kind)
            .filter(|unit| !self.is_excluded(unit.unit_code, family))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::units::UNITS_OF_MEASURE;

    fn builtin() -> (UnitTable, ExclusionPolicy) {
        let table = UnitTable::new(UNITS_OF_MEASURE).unwrap();
        let policy =
            ExclusionPolicy::new(&table, EXCLUDED_UNITS_OF_MEASURE, EXCLUDED_US, EXCLUDED_NON_US)
                .unwrap();
        (table, policy)
    }

    fn codes(units: Vec<&'static UnitOfMeasure>) -> Vec<&'static str> {
        units.into_iter().map(|u| u.unit_code).collect()
    }

    #[test]
    fn test_locale_family_buckets() {
        assert_eq!(LocaleFamily::from_locale("en"), LocaleFamily::UsCustomary);
        assert_eq!(LocaleFamily::from_locale("en-US"), LocaleFamily::UsCustomary);
        assert_eq!(LocaleFamily::from_locale("en_us"), LocaleFamily::UsCustomary);
        assert_eq!(LocaleFamily::from_locale("es-US"), LocaleFamily::UsCustomary);
        assert_eq!(LocaleFamily::from_locale("EN"), LocaleFamily::UsCustomary);
        assert_eq!(LocaleFamily::from_locale("En-us"), LocaleFamily::UsCustomary);
        assert_eq!(LocaleFamily::from_locale("en-GB"), LocaleFamily::NonUs);
        assert_eq!(LocaleFamily::from_locale("de"), LocaleFamily::NonUs);
        assert_eq!(LocaleFamily::from_locale("zh-Hant-TW"), LocaleFamily::NonUs);
        assert_eq!(LocaleFamily::from_locale("es-419"), LocaleFamily::NonUs);
        assert_eq!(LocaleFamily::from_locale(""), LocaleFamily::NonUs);
    }

    #[test]
    fn test_every_kind_keeps_units_for_both_families() {
        let (table, policy) = builtin();
        for family in LocaleFamily::ALL {
            for kind in QuantityKind::ALL {
                assert!(
                    !policy.allowed_units(&table, kind, family).is_empty(),
                    "{kind} empty for {family:?}"
                );
            }
        }
    }

    #[test]
    fn test_us_mass_is_customary_only() {
        let (table, policy) = builtin();
        let allowed = policy.allowed_units(&table, QuantityKind::Mass, LocaleFamily::UsCustomary);
        assert_eq!(codes(allowed), vec!["LBR", "ONZ"]);
    }

    #[test]
    fn test_non_us_mass_keeps_pound() {
        let (table, policy) = builtin();
        let allowed = policy.allowed_units(&table, QuantityKind::Mass, LocaleFamily::NonUs);
        assert_eq!(codes(allowed), vec!["KGM", "GRM", "MRM", "LBR"]);
    }

    #[test]
    fn test_temperature_has_one_unit_per_family() {
        let (table, policy) = builtin();
        let us = policy.allowed_units(&table, QuantityKind::Temperature, LocaleFamily::UsCustomary);
        let other = policy.allowed_units(&table, QuantityKind::Temperature, LocaleFamily::NonUs);
        assert_eq!(codes(us), vec!["FAH"]);
        assert_eq!(codes(other), vec!["CEL"]);
    }

    #[test]
    fn test_global_exclusions_apply_everywhere() {
        let (_, policy) = builtin();
        for family in LocaleFamily::ALL {
            for code in EXCLUDED_UNITS_OF_MEASURE {
                assert!(policy.is_excluded(code, family));
            }
        }
        assert!(!policy.is_excluded("MTR", LocaleFamily::NonUs));
    }

    #[test]
    fn test_non_us_volume_order() {
        let (table, policy) = builtin();
        let allowed = policy.allowed_units(&table, QuantityKind::Volume, LocaleFamily::NonUs);
        assert_eq!(codes(allowed), vec!["LTR", "DLT", "MLT", "G21", "G24", "G25"]);
    }

    #[test]
    fn test_rejects_policy_that_empties_a_kind() {
        let table = UnitTable::new(UNITS_OF_MEASURE).unwrap();
        let err = ExclusionPolicy::new(&table, &["CEL"], &["FAH"], &[]).unwrap_err();
        assert!(matches!(err, UnitError::InvariantViolation(msg) if msg.contains("temperature")));
    }

    #[test]
    fn test_rejects_unknown_excluded_code() {
        let table = UnitTable::new(UNITS_OF_MEASURE).unwrap();
        let err = ExclusionPolicy::new(&table, &["XYZ"], &[], &[]).unwrap_err();
        assert!(matches!(err, UnitError::InvariantViolation(msg) if msg.contains("XYZ")));
    }
}
