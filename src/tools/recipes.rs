//! Recipe MCP Tools
//!
//! Renders a recipe for a locale: tools sorted by name, supplies grouped by
//! quantity, best-matched, and translated.

use serde::Serialize;

use crate::format::format_value;
use crate::i18n::{translate, Dictionary, TranslateArg, Translations};
use crate::measure::{self, MatchRequest, QuantityDisplay};
use crate::models::{group_by_quantity, Recipe, RequiredQuantity, Supply};

/// Translation node holding tool names
pub const TOOL_NODE: &str = "tool";
/// Translation node holding supply names
pub const INGREDIENT_NODE: &str = "ingredient";

/// A tool line of a rendered recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTool {
    pub name: String,
    pub quantity: String,
}

/// A supply line of a rendered recipe, one per distinct quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSupply {
    pub names: Vec<String>,
    pub value: String,
    pub symbol: String,
}

/// Response for render_recipe
#[derive(Debug, Serialize)]
pub struct RenderedRecipe {
    pub title: String,
    pub name: String,
    pub locale: String,
    pub date_published: String,
    pub recipe_cuisine: Option<String>,
    pub recipe_category: Option<String>,
    pub url: Option<String>,
    pub tools: Vec<RenderedTool>,
    pub supplies: Vec<RenderedSupply>,
}

pub fn render_recipe(
    recipe: &Recipe,
    locale: &str,
    goal: f64,
    translations: &Translations,
) -> Result<RenderedRecipe, String> {
    let tool_names = translations.node(TOOL_NODE);
    let ingredient_names = translations.node(INGREDIENT_NODE);

    let tools = recipe
        .sorted_tools()
        .into_iter()
        .map(|tool| RenderedTool {
            name: translate(
                &tool.name,
                TranslateArg::Quantity(tool.required_quantity, Some(&tool_names)),
            ),
            quantity: format_value(tool.required_quantity, locale),
        })
        .collect();

    let supplies = group_by_quantity(recipe.supplies())
        .iter()
        .map(|group| render_supply(group, locale, goal, &ingredient_names))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Rendered recipe {} for {}", recipe.name, locale);

    Ok(RenderedRecipe {
        title: recipe.title.clone(),
        name: recipe.name.clone(),
        locale: locale.to_string(),
        date_published: recipe.published_display(),
        recipe_cuisine: recipe.recipe_cuisine.clone(),
        recipe_category: recipe.recipe_category.clone(),
        url: recipe.url.clone(),
        tools,
        supplies,
    })
}

fn render_supply(
    group: &Supply,
    locale: &str,
    goal: f64,
    ingredient_names: &Dictionary,
) -> Result<RenderedSupply, String> {
    let QuantityDisplay { value, symbol } = display_quantity(&group.required_quantity, locale, goal)?;
    let qty = group.required_quantity.value;

    let names = group
        .name
        .names()
        .iter()
        .map(|name| translate(name, TranslateArg::Quantity(qty, Some(ingredient_names))))
        .collect();

    Ok(RenderedSupply {
        names,
        value,
        symbol,
    })
}

fn display_quantity(
    quantity: &RequiredQuantity,
    locale: &str,
    goal: f64,
) -> Result<QuantityDisplay, String> {
    let request = MatchRequest {
        locale: locale.to_string(),
        value: quantity.value,
        unit_code: quantity.unit_code.clone(),
    };
    measure::best_match_with_goal(&request, goal).map_err(|e| e.to_string())
}
