//! Recipe Units
//!
//! An MCP server for locale-aware recipe quantity conversion.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use recipe_units::build_info;
use recipe_units::config::ServerConfig;
use recipe_units::i18n::TranslationStore;
use recipe_units::mcp::RecipeUnitsService;
use recipe_units::measure::Catalog;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr; stdout carries the MCP stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("recipe_units=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = ServerConfig::from_env()?;
    eprintln!("Default locale: {} | Goal: {}", config.default_locale, config.goal);
    eprintln!("Locales directory: {}", config.locales_dir.display());

    // Refuse to start on a broken unit table or exclusion policy
    let catalog = Catalog::builtin()?;
    tracing::info!("Unit catalog ready with {} units", catalog.table().len());

    let translations = TranslationStore::new(config.locales_dir.clone());
    if !translations.dir().is_dir() {
        tracing::warn!(
            "Locales directory {} not found, names will not be translated",
            translations.dir().display()
        );
    }

    eprintln!("Starting MCP server on stdio...");
    let service = RecipeUnitsService::new(config, translations);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
