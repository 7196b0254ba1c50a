//! # CLI Layer
//!
//! Parses arguments, opens a [`FolioContext`] for the chosen data directory
//! and window, runs one command against it and prints the outcome.
//!
//! Library errors are wrapped in `anyhow` here and reported by `main`.

use super::render::{render_message, render_tree, render_views};
use super::setup::{Cli, Commands, ConfigCommands, FolderCommands, LinkCommands};
use anyhow::{bail, Context, Result};
use clap::Parser;
use confique::toml::FormatOptions;
use folioapp::config::{FolioConfig, CONFIG_FILE};
use folioapp::init::{initialize, load_config, resolve_data_dir, FolioContext};
use folioapp::organize::Node;
use folioapp::store::fs_backend::FsBackend;
use folioapp::workbench::{OpenOptions, WorkbenchPosition, MIN_VIEW_SIZE_RATIO};
use std::path::Path;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    // Config commands work on the file directly, no stores needed
    if let Some(Commands::Config { action }) = &cli.command {
        let data_dir = resolve_data_dir(cli.data.clone())?;
        return handle_config_command(action.as_ref(), &data_dir);
    }

    let mut ctx = initialize(cli.data.clone(), cli.window.clone())
        .context("failed to open folio data directory")?;

    match cli.command {
        None => {
            print!("{}", render_tree(&ctx.organize.walk()?));
            println!();
            print_views(&ctx);
        }
        Some(command) => dispatch(&mut ctx, command)?,
    }
    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("folioapp=debug,folio=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    // Logs go to stderr so command output stays pipeable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch(ctx: &mut FolioContext, command: Commands) -> Result<()> {
    match command {
        Commands::Tree => print!("{}", render_tree(&ctx.organize.walk()?)),
        Commands::Folder { action } => handle_folder(ctx, action)?,
        Commands::Link { action } => handle_link(ctx, action)?,
        Commands::Views => print_views(ctx),
        Commands::Open { to, at, replace } => {
            ctx.workbench.open(to.as_str(), open_options(at, replace))?;
            print_views(ctx);
        }
        Commands::OpenDoc {
            doc,
            block,
            at,
            replace,
        } => {
            ctx.workbench
                .open_doc(&doc, block.as_deref(), open_options(at, replace))?;
            print_views(ctx);
        }
        Commands::Activate { index } => {
            if index >= ctx.workbench.views().len() {
                tracing::warn!(index, "view index out of range, clamping");
            }
            ctx.workbench.active(index)?;
            print_views(ctx);
        }
        Commands::Close { view } => {
            ensure_view(ctx, &view)?;
            if ctx.workbench.views().len() == 1 {
                print!("{}", render_message("Keeping the last view open"));
            }
            ctx.workbench.close(&view)?;
            print_views(ctx);
        }
        Commands::CloseOthers { view } => {
            ensure_view(ctx, &view)?;
            ctx.workbench.close_others(&view)?;
            print_views(ctx);
        }
        Commands::MoveView { from, to } => {
            ctx.workbench.move_view(from, to)?;
            print_views(ctx);
        }
        Commands::Resize { index, fraction } => {
            if !ctx.workbench.resize(index, fraction) {
                bail!(
                    "Cannot resize view {} by {}: no view after it, or a pane would drop below {:.0}%",
                    index,
                    fraction,
                    MIN_VIEW_SIZE_RATIO * 100.0
                );
            }
            print_views(ctx);
        }
        Commands::Basename { value } => match value {
            Some(value) => {
                ctx.workbench.set_basename(&value)?;
                println!("{}", ctx.workbench.basename()?);
            }
            None => println!("{}", ctx.workbench.basename()?),
        },
        Commands::Pin => {
            ctx.workbench.provider_mut().set_pinned(true)?;
            print!("{}", render_message("Pinned"));
        }
        Commands::Unpin => {
            ctx.workbench.provider_mut().set_pinned(false)?;
            print!("{}", render_message("Unpinned"));
        }
        Commands::Config { action } => handle_config_command(action.as_ref(), &ctx.data_dir)?,
    }
    Ok(())
}

fn handle_folder(ctx: &FolioContext, action: FolderCommands) -> Result<()> {
    match action {
        FolderCommands::Create { name, parent } => {
            let parent = match parent {
                Some(id) => ctx.organize.node(&id),
                None => ctx.organize.root_folder(),
            };
            let folder = parent.create_folder(&name)?;
            println!("{}", folder.id().unwrap_or_default());
        }
        FolderCommands::Rename { id, name } => {
            ctx.organize.node(&id).rename(&name)?;
            print!("{}", render_message(&format!("Renamed to {}", name)));
        }
        FolderCommands::Remove { id } => {
            let folder = ctx.organize.node(&id);
            if !folder.is_folder()? {
                bail!("Folder not found");
            }
            let removed = remove_from_parent(ctx, &folder)?;
            print!(
                "{}",
                render_message(&format!("Removed {} record(s)", removed.len()))
            );
        }
    }
    Ok(())
}

fn handle_link(ctx: &FolioContext, action: LinkCommands) -> Result<()> {
    match action {
        LinkCommands::Create {
            parent,
            link_type,
            target,
        } => {
            let link = ctx.organize.node(&parent).create_link(link_type, &target)?;
            println!("{}", link.id().unwrap_or_default());
        }
        LinkCommands::Remove { id } => {
            let link = ctx.organize.node(&id);
            if !matches!(link.node_type()?, Some(t) if !t.is_folder()) {
                bail!("Link not found");
            }
            remove_from_parent(ctx, &link)?;
            print!("{}", render_message("Link removed"));
        }
    }
    Ok(())
}

/// Removes a node through its parent folder, the same path the sidebar takes.
fn remove_from_parent(ctx: &FolioContext, node: &Node<FsBackend>) -> Result<Vec<String>> {
    let parent = node
        .parent()?
        .unwrap_or_else(|| ctx.organize.root_folder());
    Ok(parent.remove_child(node)?)
}

fn open_options(at: WorkbenchPosition, replace: bool) -> OpenOptions {
    let options = OpenOptions::at(at);
    if replace {
        options.replacing()
    } else {
        options
    }
}

fn ensure_view(ctx: &FolioContext, view_id: &str) -> Result<()> {
    if ctx.workbench.view(view_id).is_none() {
        bail!("No view with id {}", view_id);
    }
    Ok(())
}

fn print_views(ctx: &FolioContext) {
    print!(
        "{}",
        render_views(ctx.workbench.views(), ctx.workbench.active_view_index())
    );
}

/// Handle the `folio config` subcommand.
///
/// Reads go through the same layered loading as a normal run. `set` edits the
/// data directory's `folio.toml`, leaving unrelated keys alone.
fn handle_config_command(action: Option<&ConfigCommands>, data_dir: &Path) -> Result<()> {
    let config = load_config(data_dir);
    let resolved = match toml::Value::try_from(&config).context("failed to render config")? {
        toml::Value::Table(t) => t,
        _ => bail!("config did not serialize to a table"),
    };

    match action {
        None => {
            for (k, v) in &resolved {
                println!("{} = {}", k, v);
            }
        }
        Some(ConfigCommands::Gen { output }) => {
            let template = confique::toml::template::<FolioConfig>(FormatOptions::default());
            match output {
                Some(path) => {
                    std::fs::write(path, template)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{template}"),
            }
        }
        Some(ConfigCommands::Get { key }) => match resolved.get(key.as_str()) {
            Some(toml::Value::String(s)) => println!("{s}"),
            Some(other) => println!("{other}"),
            None => bail!("Unknown config key '{}'", key),
        },
        Some(ConfigCommands::Set { key, value }) => {
            if !resolved.contains_key(key.as_str()) {
                bail!("Unknown config key '{}'", key);
            }
            let path = data_dir.join(CONFIG_FILE);
            let mut table = if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                content
                    .parse::<toml::Table>()
                    .with_context(|| format!("invalid toml in {}", path.display()))?
            } else {
                toml::Table::new()
            };
            table.insert(key.clone(), toml::Value::String(value.clone()));

            std::fs::create_dir_all(data_dir)
                .with_context(|| format!("failed to create {}", data_dir.display()))?;
            std::fs::write(&path, toml::to_string_pretty(&table)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{} = \"{}\"", key, value);
        }
    }
    Ok(())
}
