//! Group command handlers

use log::debug;

use crate::cli::{Cli, Command, GetResource};
use crate::output::{output_record, output_records};
use crate::ui::{create_spinner, finish_spinner};
use crate::wiki::traits::WikiResource;
use crate::wiki::WikiClient;

/// Run the 'get groups' command
pub async fn run_groups_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::Groups(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner("Fetching groups...", cli.batch);
    let groups = client
        .get_groups(args.filter.as_deref(), args.order_by.as_deref())
        .await;
    finish_spinner(spinner);
    let groups = groups?;

    if groups.is_empty() {
        if args.filter.is_some() {
            eprintln!("No groups found matching filter");
        } else {
            eprintln!("No groups found");
        }
        return Ok(());
    }

    output_records(&groups, args.output.output, cli.no_header);
    Ok(())
}

/// Run the 'get group' command (by id or exact name)
pub async fn run_group_command(
    client: &WikiClient,
    cli: &Cli,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let Command::Get {
        resource: GetResource::Group(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner(&format!("Fetching group '{}'...", args.group), cli.batch);

    let id = match args.group.parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            debug!("'{}' is not an id, looking up by name", args.group);
            client
                .get_groups(None, None)
                .await?
                .into_iter()
                .find(|g| g.matches(&args.group))
                .map(|g| g.id)
        }
    };

    let group = match id {
        Some(id) => client.get_group(id).await?,
        None => None,
    };
    finish_spinner(spinner);

    match group {
        Some(group) => {
            output_record(&group, args.output.output, cli.no_header);
            Ok(())
        }
        None => Err(format!("Group '{}' not found", args.group).into()),
    }
}
