use clap::{Args, Subcommand};

use crate::cli::subcommands::{AlertCommands, HouseholdCommands, SensorCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the state file and seed the default sensor fleet.
    Init(InitArgs),
    /// Household health observations.
    Household {
        #[command(subcommand)]
        action: HouseholdCommands,
    },
    /// IoT sensors.
    Sensor {
        #[command(subcommand)]
        action: SensorCommands,
    },
    /// Alerts.
    Alert {
        #[command(subcommand)]
        action: AlertCommands,
    },
    /// Aggregate risk, symptom, water source, and sensor metrics.
    Analytics,
}

/// Arguments for `hgd init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing state file.
    #[arg(long)]
    pub force: bool,
}
