//! Supply and tool models
//!
//! Recipe items with a required quantity, plus grouping of items that share
//! an identical quantity.

use std::collections::HashMap;

use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// An amount of something, optionally tagged with a UN/CEFACT unit code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequiredQuantity {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
}

/// A single item name, or all names sharing one quantity after grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum SupplyName {
    Single(String),
    Grouped(Vec<String>),
}

impl SupplyName {
    /// Names in order; a single name is a one-element slice
    pub fn names(&self) -> &[String] {
        match self {
            SupplyName::Single(name) => std::slice::from_ref(name),
            SupplyName::Grouped(names) => names,
        }
    }
}

impl From<&str> for SupplyName {
    fn from(name: &str) -> Self {
        SupplyName::Single(name.to_string())
    }
}

/// A consumable recipe item (ingredient)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supply {
    pub name: SupplyName,
    pub required_quantity: RequiredQuantity,
}

impl Supply {
    pub fn new(name: impl Into<SupplyName>, required_quantity: RequiredQuantity) -> Self {
        Self {
            name: name.into(),
            required_quantity,
        }
    }
}

/// A reusable recipe item counted without a unit (pans, bowls)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub required_quantity: f64,
}

/// Grouping key: exact value bits and the stored unit code
#[derive(Debug, PartialEq, Eq, Hash)]
struct QuantityKey<'a> {
    value_bits: u64,
    unit_code: Option<&'a str>,
}

impl<'a> QuantityKey<'a> {
    fn of(quantity: &'a RequiredQuantity) -> Self {
        // -0.0 and 0.0 print the same and share a group
        let value = if quantity.value == 0.0 { 0.0 } else { quantity.value };
        Self {
            value_bits: value.to_bits(),
            unit_code: quantity.unit_code.as_deref(),
        }
    }
}

/// Group items with an identical `(value, unit_code)` pair
///
/// Groups keep the order in which their key first appears, names keep their
/// input order, and each group takes the quantity of its first item. Units
/// are compared by code, so `500 GRM` and `0.5 KGM` stay apart.
pub fn group_by_quantity(items: &[Supply]) -> Vec<Supply> {
    let mut positions: HashMap<QuantityKey<'_>, usize> = HashMap::new();
    let mut groups: Vec<(Vec<String>, &RequiredQuantity)> = Vec::new();

    for item in items {
        let key = QuantityKey::of(&item.required_quantity);
        match positions.get(&key) {
            Some(&position) => groups[position].0.extend_from_slice(item.name.names()),
            None => {
                positions.insert(key, groups.len());
                groups.push((item.name.names().to_vec(), &item.required_quantity));
            }
        }
    }

    tracing::debug!("Grouped {} supplies into {} quantities", items.len(), groups.len());

    groups
        .into_iter()
        .map(|(names, quantity)| Supply {
            name: SupplyName::Grouped(names),
            required_quantity: quantity.clone(),
        })
        .collect()
}
