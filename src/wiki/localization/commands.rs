//! Localization command handlers

use crate::cli::{Cli, Command, GetResource, OutputFormat};
use crate::output::{output_records, print_json, print_yaml};
use crate::ui::{create_spinner, finish_spinner};
use crate::wiki::WikiClient;

/// Run the 'get localization' command
///
/// Table and CSV list the locale catalog; JSON and YAML include the settings.
pub async fn run_localization_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::Localization(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner("Fetching localization...", cli.batch);
    let localization = client.get_localization().await;
    finish_spinner(spinner);
    let localization = localization?;

    match args.output {
        OutputFormat::Json => print_json(&localization),
        OutputFormat::Yaml => print_yaml(&localization),
        format => {
            let config = &localization.config;
            eprintln!(
                "Site locale: {} (auto update: {}, namespacing: {}, namespaces: [{}])",
                config.locale,
                config.auto_update,
                config.namespacing,
                config.namespaces.join(", ")
            );
            output_records(&localization.locales, format, cli.no_header);
        }
    }
    Ok(())
}
