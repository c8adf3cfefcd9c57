//! Page command handlers

use crate::cli::{Cli, Command, GetResource};
use crate::output::output_record;
use crate::ui::{create_spinner, finish_spinner};
use crate::wiki::WikiClient;

/// Run the 'get page' command (by id, or by path and locale)
pub async fn run_page_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::Page(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let (label, page) = match (args.id, args.path.as_deref()) {
        (Some(id), _) => {
            let spinner = create_spinner(&format!("Fetching page {}...", id), cli.batch);
            let page = client.get_page(id).await;
            finish_spinner(spinner);
            (id.to_string(), page?)
        }
        (None, Some(path)) => {
            let label = format!("{}/{}", args.locale, path);
            let spinner = create_spinner(&format!("Fetching page '{}'...", label), cli.batch);
            let page = client.get_page_by_path(path, &args.locale).await;
            finish_spinner(spinner);
            (label, page?)
        }
        (None, None) => return Err("Either a page id or --path is required".into()),
    };

    match page {
        Some(page) => {
            output_record(&page, args.output.output, cli.no_header);
            Ok(())
        }
        None => Err(format!("Page '{}' not found", label).into()),
    }
}
