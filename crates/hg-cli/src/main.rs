use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("hgd error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = bootstrap::load_config(&flags)?;
    context::warn_unconfigured(&config);
    let state_path = bootstrap::resolve_state_path(&flags, &config)?;

    let command = cli.command;
    let write_lock = match write_lock_label(&command) {
        Some(label) => Some(write_lock::acquire_for_state(&state_path, label).await?),
        None => None,
    };

    if let cli::Commands::Init(args) = &command {
        let result = commands::init::handle(args, &config, &state_path, &flags).await;
        drop(write_lock);
        return result;
    }

    let ctx = context::AppContext::open(config, state_path)
        .context("failed to open healthguard state")?;

    let result = commands::dispatch::dispatch(command, &ctx, &flags).await;
    ctx.settle().await;
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("HEALTHGUARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// The lock-holder label for commands that write the state file, `None`
/// for read-only commands.
const fn write_lock_label(command: &cli::Commands) -> Option<&'static str> {
    use crate::cli::subcommands::{AlertCommands, HouseholdCommands, SensorCommands};

    match command {
        cli::Commands::Init(_) => Some("init"),
        cli::Commands::Household {
            action: HouseholdCommands::Submit(_),
        } => Some("household submit"),
        cli::Commands::Sensor {
            action: SensorCommands::Reading { .. },
        } => Some("sensor reading"),
        cli::Commands::Alert {
            action: AlertCommands::Create(_),
        } => Some("alert create"),
        cli::Commands::Alert {
            action: AlertCommands::Resolve { .. },
        } => Some("alert resolve"),
        cli::Commands::Household { .. }
        | cli::Commands::Sensor { .. }
        | cli::Commands::Alert { .. }
        | cli::Commands::Analytics => None,
    }
}
