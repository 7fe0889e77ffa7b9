//! Command dispatch

use std::io;

use clap::CommandFactory;
use serde_json::json;
use tracing::{debug, instrument};

use crate::application::services::LinkView;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::RecordDraft;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::SelectionItem;
use crate::infrastructure::InfraError;

/// Load settings, wire services and run the requested command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load()?;
    if let Some(store) = &cli.store {
        settings = settings.with_store_path(store);
    }
    debug!("store: {}", settings.store_path.display());

    let container = ServiceContainer::new(settings);
    match &cli.command {
        Some(command) => run(&container, command),
        None => cmd_tree(&container, false),
    }
}

/// Run one command against an already wired container.
pub fn run(container: &ServiceContainer, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Add { name, url, parent } => cmd_add(
            container,
            RecordDraft {
                name: name.clone(),
                url: url.clone(),
                parent: parent.clone(),
            },
        ),
        Commands::Delete { name } => cmd_delete(container, name.as_deref()),
        Commands::Tree { json } => cmd_tree(container, *json),
        Commands::List { json } => cmd_list(container, *json),
        Commands::Edit => cmd_edit(container),
        Commands::Info => cmd_info(container),
        Commands::Config { command } => cmd_config(container, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(skip(container))]
fn cmd_add(container: &ServiceContainer, draft: RecordDraft) -> CliResult<()> {
    let (record, view) = container.link_service().add(&draft)?;
    output::success(&format!("added '{}'", record.name));
    render_tree(&view);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_delete(container: &ServiceContainer, name: Option<&str>) -> CliResult<()> {
    let service = container.link_service();
    let name = match name {
        Some(name) => name.to_string(),
        None => match select_deletable(container, &service.view()?)? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    let (record, view) = service.delete(&name)?;
    output::action("Deleted", &record.name);
    render_tree(&view);
    Ok(())
}

fn select_deletable(container: &ServiceContainer, view: &LinkView) -> CliResult<Option<String>> {
    let items: Vec<SelectionItem> = view
        .deletable()
        .into_iter()
        .map(|link| SelectionItem {
            display: link.label,
            value: link.name,
        })
        .collect();

    if items.is_empty() {
        return Err(CliError::Usage("no links to delete".into()));
    }

    let selected = container
        .selector
        .select_one(&items, "Delete link: ")
        .map_err(|message| InfraError::Selector { message })?;
    Ok(selected.map(|item| item.value))
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, json: bool) -> CliResult<()> {
    let view = container.link_service().view()?;
    if json {
        let doc = json!({
            "tree": view.tree.root(),
            "dropped": view.report.dropped,
        });
        output::info(&to_json(&doc)?);
        return Ok(());
    }
    render_tree(&view);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer, json: bool) -> CliResult<()> {
    let view = container.link_service().view()?;
    if json {
        output::info(&to_json(&view.entries)?);
        return Ok(());
    }
    for entry in &view.entries {
        output::info(&output::format_entry(entry));
    }
    output::dropped(&view.report);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_edit(container: &ServiceContainer) -> CliResult<()> {
    let service = container.link_service();
    // creates an empty store on first use
    service.load()?;
    container
        .editor
        .open(service.store_path())
        .map_err(|e| InfraError::Editor {
            message: e.to_string(),
        })?;
    render_tree(&service.view()?);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_info(container: &ServiceContainer) -> CliResult<()> {
    let service = container.link_service();
    let view = service.view()?;
    output::header("linktree");
    output::detail(&format!("store:   {}", service.store_path().display()));
    output::detail(&format!("links:   {}", view.tree.len() + view.report.dropped.len()));
    output::detail(&format!("shown:   {}", view.tree.len()));
    output::detail(&format!("depth:   {}", view.tree.depth()));
    output::detail(&format!("leaves:  {}", view.tree.leaf_names().len()));
    output::detail(&format!("dropped: {}", view.report.dropped.len()));
    output::detail(&format!("deletable: {}", view.deletable().len()));
    if !view.duplicates.is_empty() {
        output::warning(&format!("duplicate names: {}", view.duplicates.join(", ")));
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("config", &path.display()),
                None => output::warning("no config directory available"),
            }
            output::action("store", &container.settings.store_path.display());
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("no config directory available".into()))?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}

/// Tree drawing followed by warnings for anything left out.
fn render_tree(view: &LinkView) {
    if view.tree.is_empty() {
        output::info("No links shown. Add one with `linktree add <name>`.");
    } else {
        output::info(&view.tree.to_termtree());
    }
    output::dropped(&view.report);
}

fn to_json(value: &impl serde::Serialize) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        InfraError::io(
            "serialize json",
            io::Error::new(io::ErrorKind::InvalidData, e),
        )
        .into()
    })
}
