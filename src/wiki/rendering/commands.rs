//! Renderer command handlers

use crate::cli::{Cli, Command, GetResource};
use crate::output::{output_records, ModuleView};
use crate::ui::{create_spinner, finish_spinner};
use crate::wiki::WikiClient;

/// Run the 'get renderers' command
pub async fn run_renderers_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::Renderers(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner("Fetching renderers...", cli.batch);
    let renderers = client
        .get_renderers(args.filter.as_deref(), args.order_by.as_deref())
        .await;
    finish_spinner(spinner);

    let views = renderers?
        .iter()
        .map(ModuleView::try_from)
        .collect::<crate::error::Result<Vec<_>>>()?;

    if views.is_empty() {
        eprintln!("No renderers found");
        return Ok(());
    }

    output_records(&views, args.output.output, cli.no_header);
    Ok(())
}
