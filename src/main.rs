//! wikictl - Main entry point

use clap::Parser;
use log::{debug, info};

use wikictl::cli::{Cli, Command, GetResource};
use wikictl::engine::{
    run_apply_command, run_destroy_command, run_import_command, run_plan_command,
    run_refresh_command,
};
use wikictl::wiki::authentication::{
    run_api_command, run_api_keys_command, run_auth_strategies_command,
};
use wikictl::wiki::groups::{run_group_command, run_groups_command};
use wikictl::wiki::localization::run_localization_command;
use wikictl::wiki::pages::run_page_command;
use wikictl::wiki::rendering::run_renderers_command;
use wikictl::wiki::search::run_search_engines_command;
use wikictl::wiki::site_config::run_site_config_command;
use wikictl::wiki::theming::{run_theme_config_command, run_themes_command};
use wikictl::{AuthResolver, Connection, SiteResolver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting wikictl v{}", env!("CARGO_PKG_VERSION"));

    let site = SiteResolver::resolve(cli.site.as_deref(), cli.batch)?;
    debug!("Using site {}", site);

    let auth = AuthResolver::new(&site).resolve(
        cli.token.as_deref(),
        cli.email.as_deref(),
        cli.password.as_deref(),
    )?;
    let connection = Connection::new(&site, auth);

    match &cli.command {
        Command::Plan(_) => run_plan_command(&connection, &cli).await?,
        Command::Apply(_) => run_apply_command(&connection, &cli).await?,
        Command::Refresh(_) => run_refresh_command(&connection, &cli).await?,
        Command::Destroy(_) => run_destroy_command(&connection, &cli).await?,
        Command::Import(_) => run_import_command(&connection, &cli).await?,
        Command::Get { resource } => {
            let client = connection.connect().await?;
            match resource {
                GetResource::SiteConfig(_) => run_site_config_command(&client, &cli).await?,
                GetResource::Page(_) => run_page_command(&client, &cli).await?,
                GetResource::Group(_) => run_group_command(&client, &cli).await?,
                GetResource::Groups(_) => run_groups_command(&client, &cli).await?,
                GetResource::Api(_) => run_api_command(&client, &cli).await?,
                GetResource::ApiKeys(_) => run_api_keys_command(&client, &cli).await?,
                GetResource::AuthStrategies(_) => run_auth_strategies_command(&client, &cli).await?,
                GetResource::ThemeConfig(_) => run_theme_config_command(&client, &cli).await?,
                GetResource::Themes(_) => run_themes_command(&client, &cli).await?,
                GetResource::Renderers(_) => run_renderers_command(&client, &cli).await?,
                GetResource::SearchEngines(_) => run_search_engines_command(&client, &cli).await?,
                GetResource::Localization(_) => run_localization_command(&client, &cli).await?,
            }
        }
    }

    info!("Completed successfully");
    Ok(())
}
