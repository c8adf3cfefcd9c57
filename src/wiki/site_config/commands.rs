//! Site configuration command handlers

use crate::cli::{Cli, Command, GetResource};
use crate::output::output_record;
use crate::ui::{create_spinner, finish_spinner};
use crate::wiki::WikiClient;

/// Run the 'get site-config' command
pub async fn run_site_config_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::SiteConfig(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner("Fetching site configuration...", cli.batch);
    let config = client.get_site_config().await;
    finish_spinner(spinner);

    output_record(&config?, args.output, cli.no_header);
    Ok(())
}
