//! Recipe model
//!
//! Recipe content as stored in the food collection front matter.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate};
use rmcp::schemars;
use serde::{Deserialize, Serialize};

use super::{Supply, Tool};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// A recipe with its tools and supplies
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub name: String,
    pub date_published: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub tool: Vec<Tool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply: Option<Vec<Supply>>,
}

impl Recipe {
    /// Publication date, if `date_published` is in a recognized format
    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date_published)
    }

    /// Publication date as `YYYY-MM-DD`, falling back to the raw string
    pub fn published_display(&self) -> String {
        match self.published_on() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => {
                tracing::warn!("Unrecognized datePublished: {}", self.date_published);
                self.date_published.clone()
            }
        }
    }

    /// Tools ordered by name
    pub fn sorted_tools(&self) -> Vec<&Tool> {
        let mut tools: Vec<&Tool> = self.tool.iter().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Supplies, or an empty slice when the recipe lists none
    pub fn supplies(&self) -> &[Supply] {
        self.supply.as_deref().unwrap_or_default()
    }
}

/// Order recipes by publication date; unparseable dates sort first
pub fn compare_published(a: &Recipe, b: &Recipe) -> Ordering {
    a.published_on().cmp(&b.published_on())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SupplyName;

    const PANCAKES: &str = r#"{
        "title": "Fluffy Pancakes",
        "name": "pancakes",
        "datePublished": "2023/03/20",
        "recipeCuisine": "US",
        "tool": [
            {"name": "whisk", "requiredQuantity": 1},
            {"name": "bowl", "requiredQuantity": 2}
        ],
        "supply": [
            {"name": "flour", "requiredQuantity": {"value": 250, "unitCode": "GRM"}},
            {"name": "egg", "requiredQuantity": {"value": 2}}
        ]
    }"#;

    #[test]
    fn test_deserialize_recipe() {
        let recipe: Recipe = serde_json::from_str(PANCAKES).unwrap();
        assert_eq!(recipe.title, "Fluffy Pancakes");
        assert_eq!(recipe.recipe_cuisine.as_deref(), Some("US"));
        assert_eq!(recipe.recipe_category, None);
        assert_eq!(recipe.tool.len(), 2);
        assert_eq!(recipe.supplies().len(), 2);
        assert_eq!(recipe.supplies()[0].name, SupplyName::Single("flour".to_string()));
    }

    #[test]
    fn test_missing_supply_is_empty() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"title": "Toast", "name": "toast", "datePublished": "2021-12-31", "tool": []}"#,
        )
        .unwrap();
        assert!(recipe.supplies().is_empty());
    }

    #[test]
    fn test_published_formats() {
        assert_eq!(parse_date("2022-05-15"), NaiveDate::from_ymd_opt(2022, 5, 15));
        assert_eq!(parse_date("2023/03/20"), NaiveDate::from_ymd_opt(2023, 3, 20));
        assert_eq!(
            parse_date("2024-01-02T10:30:00+01:00"),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_published_display() {
        let recipe: Recipe = serde_json::from_str(PANCAKES).unwrap();
        assert_eq!(recipe.published_display(), "2023-03-20");
    }

    #[test]
    fn test_sorted_tools() {
        let recipe: Recipe = serde_json::from_str(PANCAKES).unwrap();
        let names: Vec<_> = recipe.sorted_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["bowl", "whisk"]);
    }

    #[test]
    fn test_compare_published() {
        let older: Recipe = serde_json::from_str(
            r#"{"title": "A", "name": "a", "datePublished": "2021-12-31", "tool": []}"#,
        )
        .unwrap();
        let newer: Recipe = serde_json::from_str(PANCAKES).unwrap();
        assert_eq!(compare_published(&older, &newer), Ordering::Less);
        assert_eq!(compare_published(&newer, &newer), Ordering::Equal);
    }
}
