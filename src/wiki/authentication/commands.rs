//! Authentication command handlers

use log::debug;

use crate::cli::{Cli, Command, GetResource};
use crate::output::{output_record, output_records, AuthStrategyView};
use crate::ui::{create_spinner, finish_spinner};
use crate::wiki::WikiClient;

/// Run the 'get auth-strategies' command
pub async fn run_auth_strategies_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::AuthStrategies(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner("Fetching authentication strategies...", cli.batch);
    let strategies = client.get_active_strategies().await;
    finish_spinner(spinner);

    let mut strategies = strategies?;
    strategies.sort_by_key(|s| s.order);

    let views = strategies
        .iter()
        .map(AuthStrategyView::try_from)
        .collect::<crate::error::Result<Vec<_>>>()?;

    debug!("Fetched {} authentication strategies", views.len());
    output_records(&views, args.output, cli.no_header);
    Ok(())
}

/// Run the 'get api' command
pub async fn run_api_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::Api(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let enabled = client.get_api_state().await?;
    output_record(
        &serde_json::json!({ "enabled": enabled }),
        args.output,
        cli.no_header,
    );
    Ok(())
}

/// Run the 'get api-keys' command
pub async fn run_api_keys_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::ApiKeys(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner("Fetching API keys...", cli.batch);
    let keys = client.get_api_keys().await;
    finish_spinner(spinner);
    let keys = keys?;

    if keys.is_empty() {
        eprintln!("No API keys found");
        return Ok(());
    }

    output_records(&keys, args.output, cli.no_header);
    Ok(())
}
