//! Process-wide unit catalog
//!
//! Pairs the unit table with its exclusion policy. The built-in catalog is
//! constructed once on first use and shared read-only afterwards.

use std::sync::LazyLock;

use super::error::UnitResult;
use super::locale::{ExclusionPolicy, EXCLUDED_NON_US, EXCLUDED_UNITS_OF_MEASURE, EXCLUDED_US};
use super::units::{UnitOfMeasure, UnitTable, UNITS_OF_MEASURE};

static BUILTIN: LazyLock<UnitResult<Catalog>> = LazyLock::new(|| {
    Catalog::new(
        UNITS_OF_MEASURE,
        EXCLUDED_UNITS_OF_MEASURE,
        EXCLUDED_US,
        EXCLUDED_NON_US,
    )
});

/// A validated unit table with its exclusion policy
#[derive(Debug, Clone)]
pub struct Catalog {
    table: UnitTable,
    policy: ExclusionPolicy,
}

impl Catalog {
    /// Validate a unit list and its exclusion lists together
    pub fn new(
        units: &'static [UnitOfMeasure],
        excluded: &[&'static str],
        excluded_us: &[&'static str],
        excluded_non_us: &[&'static str],
    ) -> UnitResult<Self> {
        let table = UnitTable::new(units)?;
        let policy = ExclusionPolicy::new(&table, excluded, excluded_us, excluded_non_us)?;
        tracing::debug!("Unit catalog ready with {} units", table.len());
        Ok(Self { table, policy })
    }

    /// The built-in catalog, or the construction defect that prevents it
    pub fn builtin() -> UnitResult<&'static Catalog> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    pub fn table(&self) -> &UnitTable {
        &self.table
    }

    pub fn policy(&self) -> &ExclusionPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_shared() {
        let first = Catalog::builtin().unwrap();
        let second = Catalog::builtin().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.table().len(), UNITS_OF_MEASURE.len());
    }
}
