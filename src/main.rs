//! Stackwright - Entry Point
//!
//! Command line front end: loads an inventory snapshot, runs one engine
//! operation on it and writes it back.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use stackwright::config::{self, StackerConfig};
use stackwright::items::{Material, Slots, PLAYER_SLOTS, STORAGE_SLOTS};
use stackwright::save::{load_snapshot, save_snapshot, SnapshotData};
use stackwright::stacking::{ActionKind, ConsolidationReport, Stacker};

/// Item stack consolidation
#[derive(Parser)]
#[command(name = "stackwright")]
#[command(about = "Merge, unmerge and guard item stacks", long_about = None)]
#[command(version)]
struct Cli {
    /// Rules file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Consolidate the main storage of a snapshot
    Stack(SnapshotArgs),

    /// Reset every stack the engine changed
    Unstack(SnapshotArgs),

    /// Consolidate the inside of a container item
    StackContainer(ContainerArgs),

    /// Ask the usage guard about an action
    Check(CheckArgs),

    /// List the active stack rules
    Rules,

    /// Write the default rules file
    ExportConfig(ExportArgs),
}

#[derive(Args)]
struct SnapshotArgs {
    /// Snapshot file
    snapshot: PathBuf,
}

#[derive(Args)]
struct ContainerArgs {
    /// Snapshot file
    snapshot: PathBuf,
    /// Slot holding the container
    slot: usize,
}

#[derive(Args)]
struct CheckArgs {
    /// Snapshot file
    snapshot: PathBuf,
    /// Slot holding the item in hand
    slot: usize,
    /// Action, e.g. left-click-block
    action: ActionKind,
    /// The action targets a container block
    #[arg(long)]
    container: bool,
    /// Block the action targets, e.g. CHEST
    #[arg(long)]
    target: Option<Material>,
}

#[derive(Args)]
struct ExportArgs {
    /// Output path (defaults to --config or the user config directory)
    path: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::debug!("Starting Stackwright v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(config::default_config_path);

    match cli.command {
        Command::Stack(args) => stack(&config_path, &args),
        Command::Unstack(args) => unstack(&config_path, &args),
        Command::StackContainer(args) => stack_container(&config_path, &args),
        Command::Check(args) => check(&config_path, &args),
        Command::Rules => rules(&config_path),
        Command::ExportConfig(args) => {
            let path = args.path.unwrap_or(config_path);
            config::export_default_config(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default rules to {}", path.display());
            Ok(())
        }
    }
}

fn load_stacker(config_path: &Path) -> Stacker {
    Stacker::from_config(&config::load_or_default(config_path))
}

fn open(path: &Path) -> Result<SnapshotData> {
    load_snapshot(path).with_context(|| format!("Failed to load snapshot {}", path.display()))
}

fn store(snapshot: &SnapshotData, path: &Path) -> Result<()> {
    save_snapshot(snapshot, path).with_context(|| format!("Failed to save snapshot {}", path.display()))
}

fn print_report(report: &ConsolidationReport) {
    println!(
        "Stacked {} group(s) into {} stack(s); {} changed, {} dropped",
        report.groups, report.stacks, report.changed_groups, report.overflowed
    );
}

fn stack(config_path: &Path, args: &SnapshotArgs) -> Result<()> {
    let stacker = load_stacker(config_path);
    let mut snapshot = open(&args.snapshot)?;

    let report = {
        let SnapshotData {
            inventory, dropped, ..
        } = &mut snapshot;
        stacker.consolidate(&mut inventory.window(STORAGE_SLOTS), dropped)
    };

    store(&snapshot, &args.snapshot)?;
    print_report(&report);
    Ok(())
}

fn unstack(config_path: &Path, args: &SnapshotArgs) -> Result<()> {
    let stacker = load_stacker(config_path);
    let mut snapshot = open(&args.snapshot)?;

    let reset = stacker.reverse(&mut snapshot.inventory.window(0..PLAYER_SLOTS));

    store(&snapshot, &args.snapshot)?;
    println!("Reset {} stack(s)", reset);
    Ok(())
}

fn stack_container(config_path: &Path, args: &ContainerArgs) -> Result<()> {
    let stacker = load_stacker(config_path);
    let mut snapshot = open(&args.snapshot)?;

    let report = {
        let SnapshotData {
            inventory, dropped, ..
        } = &mut snapshot;
        let Some(container) = inventory.get_mut(args.slot) else {
            bail!("Slot {} is empty", args.slot);
        };
        stacker.consolidate_contents(container, dropped)?
    };

    store(&snapshot, &args.snapshot)?;
    print_report(&report);
    Ok(())
}

fn check(config_path: &Path, args: &CheckArgs) -> Result<()> {
    let stacker = load_stacker(config_path);
    let snapshot = open(&args.snapshot)?;

    let item = snapshot.inventory.get(args.slot);
    let target_is_container =
        args.container || args.target.is_some_and(|block| block.opens_container());
    let verdict = stacker.guard_check(item, args.action, target_is_container);
    match verdict.message() {
        Some(message) => println!("blocked: {}", message),
        None => println!("allowed"),
    }
    Ok(())
}

fn rules(config_path: &Path) -> Result<()> {
    let config = if config_path.exists() {
        config::load_config(config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?
    } else {
        StackerConfig::default()
    };
    let policy = config.policy();

    for (material, size) in policy.targets() {
        println!("{:<24} {:>3}  (default {})", material.name(), size, material.max_stack_size());
    }
    for rejection in policy.rejections() {
        println!("skipped: {}", rejection);
    }
    Ok(())
}
