//! Theming command handlers

use crate::cli::{Cli, Command, GetResource};
use crate::output::{output_record, output_records};
use crate::ui::{create_spinner, finish_spinner};
use crate::wiki::WikiClient;

/// Run the 'get theme-config' command
pub async fn run_theme_config_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::ThemeConfig(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner("Fetching theme configuration...", cli.batch);
    let config = client.get_theme_config().await;
    finish_spinner(spinner);

    output_record(&config?, args.output, cli.no_header);
    Ok(())
}

/// Run the 'get themes' command
pub async fn run_themes_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::Themes(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner("Fetching themes...", cli.batch);
    let themes = client.get_themes().await;
    finish_spinner(spinner);
    let themes = themes?;

    if themes.is_empty() {
        eprintln!("No themes found");
        return Ok(());
    }

    output_records(&themes, args.output, cli.no_header);
    Ok(())
}
