//! Search engine command handlers

use crate::cli::{Cli, Command, GetResource};
use crate::output::{output_records, ModuleView};
use crate::ui::{create_spinner, finish_spinner};
use crate::wiki::WikiClient;

/// Run the 'get search-engines' command
pub async fn run_search_engines_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::SearchEngines(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner("Fetching search engines...", cli.batch);
    let engines = client.get_search_engines().await;
    finish_spinner(spinner);

    let views = engines?
        .iter()
        .map(ModuleView::try_from)
        .collect::<crate::error::Result<Vec<_>>>()?;

    output_records(&views, args.output, cli.no_header);
    Ok(())
}
