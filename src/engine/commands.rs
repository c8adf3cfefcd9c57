//! Plan/apply command handlers

use std::path::{Path, PathBuf};

use log::info;

use super::apply::import_target;
use super::{apply, destroy_plan, import, plan, refresh, validate_manifest, Manifest, StateStore};
use crate::cli::{ApplyArgs, Cli, Command, ImportArgs, ManifestArgs};
use crate::output::{output_plan, output_warnings, plan_is_empty};
use crate::ui::{confirm_changes, create_spinner, finish_spinner, finish_spinner_for};
use crate::wiki::Connection;

type CommandResult = std::result::Result<(), Box<dyn std::error::Error>>;

fn state_store(args: &ManifestArgs) -> StateStore {
    StateStore::new(PathBuf::from(&args.state))
}

/// Run the plan command
pub async fn run_plan_command(connection: &Connection, cli: &Cli) -> CommandResult {
    let Command::Plan(args) = &cli.command else {
        unreachable!()
    };

    let manifest = Manifest::load(Path::new(&args.file))?;
    validate_manifest(&manifest)?;
    let mut state = state_store(args).load(connection.site())?;
    let client = connection.connect().await?;

    let spinner = create_spinner("Refreshing state...", cli.batch);
    let changes = plan(&client, &manifest, &mut state).await;
    finish_spinner(spinner);

    output_plan(&changes?);
    Ok(())
}

/// Run the apply command
pub async fn run_apply_command(connection: &Connection, cli: &Cli) -> CommandResult {
    let Command::Apply(ApplyArgs {
        manifest: args,
        auto_approve,
    }) = &cli.command
    else {
        unreachable!()
    };

    let manifest = Manifest::load(Path::new(&args.file))?;
    validate_manifest(&manifest)?;
    let store = state_store(args);
    let mut state = store.load(connection.site())?;
    let client = connection.connect().await?;

    let spinner = create_spinner("Refreshing state...", cli.batch);
    let changes = plan(&client, &manifest, &mut state).await;
    finish_spinner(spinner);
    let changes = changes?;

    output_plan(&changes);
    if plan_is_empty(&changes) {
        // Refresh may still have dropped vanished resources
        store.save(&state)?;
        return Ok(());
    }
    if !confirm_changes("Apply these changes?", *auto_approve, cli.batch)? {
        println!("Apply cancelled.");
        return Ok(());
    }

    let spinner = create_spinner("Applying changes...", cli.batch);
    let report = apply(&client, &changes, &mut state, &store).await;
    finish_spinner_for(spinner, &report, "Changes applied");
    let report = report?;

    output_warnings(&report.warnings);
    println!("Apply complete: {} change(s).", report.changed);
    Ok(())
}

/// Run the refresh command
pub async fn run_refresh_command(connection: &Connection, cli: &Cli) -> CommandResult {
    let Command::Refresh(args) = &cli.command else {
        unreachable!()
    };

    let store = state_store(args);
    let mut state = store.load(connection.site())?;
    let client = connection.connect().await?;

    let spinner = create_spinner(
        &format!("Refreshing {} resource(s)...", state.resources.len()),
        cli.batch,
    );
    let gone = refresh(&client, &mut state).await;
    finish_spinner(spinner);
    let gone = gone?;

    store.save(&state)?;
    for address in &gone {
        println!("{} no longer exists and was removed from the state.", address);
    }
    info!("Refreshed {} resource(s)", state.resources.len());
    Ok(())
}

/// Run the destroy command
pub async fn run_destroy_command(connection: &Connection, cli: &Cli) -> CommandResult {
    let Command::Destroy(ApplyArgs {
        manifest: args,
        auto_approve,
    }) = &cli.command
    else {
        unreachable!()
    };

    let store = state_store(args);
    let mut state = store.load(connection.site())?;
    let changes = destroy_plan(&state)?;

    output_plan(&changes);
    if plan_is_empty(&changes) {
        return Ok(());
    }
    if !confirm_changes("Destroy every managed resource?", *auto_approve, cli.batch)? {
        println!("Destroy cancelled.");
        return Ok(());
    }

    let client = connection.connect().await?;
    let spinner = create_spinner("Destroying resources...", cli.batch);
    let report = apply(&client, &changes, &mut state, &store).await;
    finish_spinner_for(spinner, &report, "Resources removed");
    let report = report?;

    output_warnings(&report.warnings);
    println!("Destroy complete: {} resource(s) removed.", report.changed);
    Ok(())
}

/// Run the import command
pub async fn run_import_command(connection: &Connection, cli: &Cli) -> CommandResult {
    let Command::Import(ImportArgs {
        address,
        id,
        manifest: args,
    }) = &cli.command
    else {
        unreachable!()
    };

    let store = state_store(args);
    let mut state = store.load(connection.site())?;
    import_target(&state, address, *id)?;
    let client = connection.connect().await?;

    import(&client, &mut state, address, *id).await?;
    store.save(&state)?;
    println!("Imported {} ({}).", address, id);
    Ok(())
}
