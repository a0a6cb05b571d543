//! Recipe Units MCP Server Implementation
//!
//! Exposes conversion, best-match, grouping, and recipe rendering as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::i18n::{I18nError, TranslationStore};
use crate::models::{Recipe, Supply};
use crate::tools::conversion;
use crate::tools::recipes;
use crate::tools::status::StatusTracker;

/// Recipe Units MCP Service
#[derive(Clone)]
pub struct RecipeUnitsService {
    config: Arc<ServerConfig>,
    translations: Arc<TranslationStore>,
    status_tracker: Arc<Mutex<StatusTracker>>,
    tool_router: ToolRouter<RecipeUnitsService>,
}

impl RecipeUnitsService {
    pub fn new(config: ServerConfig, translations: TranslationStore) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config.clone()))),
            config: Arc::new(config),
            translations: Arc::new(translations),
            tool_router: Self::tool_router(),
        }
    }

    fn locale<'a>(&'a self, locale: Option<&'a str>) -> &'a str {
        self.config.locale_or_default(locale)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertParams {
    /// Numeric value to convert
    pub value: f64,
    /// UN/CEFACT unit code, e.g. "GRM", "FAH", "G21"
    pub unit_code: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BestMatchParams {
    pub value: f64,
    /// Unit code of the value; omit for unitless quantities such as eggs
    pub unit_code: Option<String>,
    /// BCP 47 locale, e.g. "en", "en-US", "de-CH" (server default when omitted)
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GroupByQuantityParams {
    /// Supplies as {"name": ..., "requiredQuantity": {"value": ..., "unitCode": ...}}
    pub supplies: Vec<Supply>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListUnitsParams {
    pub locale: Option<String>,
    /// One of length, mass, time, temperature, area, volume
    pub quantity_kind: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenderRecipeParams {
    pub recipe: Recipe,
    pub locale: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl RecipeUnitsService {
    // --- Status ---

    #[tool(description = "Get the current status of the Recipe Units service including build info, configuration, catalog size, and process information")]
    async fn units_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(self.translations.loaded_languages());
        json_result(&status)
    }

    #[tool(description = "Get instructions for converting and displaying recipe quantities. Call this when unsure which unit codes or tools to use.")]
    fn conversion_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CONVERSION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CONVERSION_INSTRUCTIONS)]))
    }

    // --- Conversion ---

    #[tool(description = "Convert a value in the given unit to the base unit of its kind (KGM, MTR, SEC, CEL, MTK, MTQ)")]
    fn convert_to_base(&self, Parameters(p): Parameters<ConvertParams>) -> Result<CallToolResult, McpError> {
        let result = conversion::convert_to_base(p.value, &p.unit_code)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Convert a value expressed in the base unit of a kind into the given unit")]
    fn convert_from_base(&self, Parameters(p): Parameters<ConvertParams>) -> Result<CallToolResult, McpError> {
        let result = conversion::convert_from_base(p.value, &p.unit_code)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Pick the most readable unit for a quantity in a locale and format it with at most two significant digits")]
    fn best_match(&self, Parameters(p): Parameters<BestMatchParams>) -> Result<CallToolResult, McpError> {
        let locale = self.locale(p.locale.as_deref());
        let result = conversion::best_match(locale, p.value, p.unit_code.as_deref(), self.config.goal)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List the units offered for a locale, optionally limited to one quantity kind")]
    fn list_units(&self, Parameters(p): Parameters<ListUnitsParams>) -> Result<CallToolResult, McpError> {
        let locale = self.locale(p.locale.as_deref());
        let result = conversion::list_units(locale, p.quantity_kind.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    // --- Recipes ---

    #[tool(description = "Merge supplies whose value and unit code are identical, keeping first-seen order. Equivalent amounts in different units are not merged.")]
    fn group_by_quantity(&self, Parameters(p): Parameters<GroupByQuantityParams>) -> Result<CallToolResult, McpError> {
        let result = conversion::group_by_quantity(&p.supplies);
        json_result(&result)
    }

    #[tool(description = "Render a recipe for a locale: tools sorted by name, supplies grouped by quantity, every quantity best-matched and every name translated")]
    fn render_recipe(&self, Parameters(p): Parameters<RenderRecipeParams>) -> Result<CallToolResult, McpError> {
        let locale = self.locale(p.locale.as_deref());
        let translations = self.translations.get(locale).map_err(|e| match e {
            I18nError::InvalidLocale(_) => McpError::invalid_params(e.to_string(), None),
            _ => McpError::internal_error(e.to_string(), None),
        })?;
        let result = recipes::render_recipe(&p.recipe, locale, self.config.goal, &translations)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }
}

#[tool_handler]
impl ServerHandler for RecipeUnitsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "recipe-units".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Recipe Units".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Recipe Units - locale-aware conversion and display of recipe quantities. \
                 Call conversion_instructions first when unsure. \
                 Display: best_match (one quantity), render_recipe (whole recipe). \
                 Supplies: group_by_quantity. \
                 Raw conversion: convert_to_base/convert_from_base. \
                 Units: list_units. Status: units_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn service() -> RecipeUnitsService {
        let config = ServerConfig {
            default_locale: "de".to_string(),
            goal: 250.0,
            locales_dir: PathBuf::from("/nonexistent/locales"),
        };
        let translations = TranslationStore::new(config.locales_dir.clone());
        RecipeUnitsService::new(config, translations)
    }

    #[test]
    fn test_default_locale_applies() {
        let service = service();
        assert_eq!(service.locale(None), "de");
        assert_eq!(service.locale(Some("en-US")), "en-US");
    }

    #[test]
    fn test_server_info() {
        let info = service().get_info();
        assert_eq!(info.server_info.name, "recipe-units");
        assert!(info.instructions.unwrap_or_default().contains("render_recipe"));
    }

    #[test]
    fn test_best_match_tool_rejects_unknown_unit() {
        let result = service().best_match(Parameters(BestMatchParams {
            value: 1.0,
            unit_code: Some("ZZZ".to_string()),
            locale: None,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_render_recipe_tool_with_missing_dictionary() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"title": "Eggs", "name": "eggs", "datePublished": "2022-01-01",
                "tool": [{"name": "pan", "requiredQuantity": 1}],
                "supply": [{"name": "egg", "requiredQuantity": {"value": 2}}]}"#,
        )
        .unwrap();
        let result = service()
            .render_recipe(Parameters(RenderRecipeParams { recipe, locale: Some("fr".into()) }));
        assert!(result.is_ok());
    }
}
