use clap::{Args, Subcommand};

/// Alert commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AlertCommands {
    /// Create an alert and dispatch its notifications.
    Create(AlertCreateArgs),
    /// Resolve an active alert.
    Resolve { id: String },
    /// List alerts, newest first.
    List {
        /// active or resolved
        #[arg(long)]
        status: Option<String>,
    },
}

#[derive(Clone, Debug, Args)]
pub struct AlertCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub message: String,
    /// low, medium, high, critical
    #[arg(long)]
    pub severity: String,
    #[arg(long)]
    pub location: String,
    /// SMS, WhatsApp, Email, Dashboard (repeatable)
    #[arg(long)]
    pub channel: Vec<String>,
    /// manual, iot, system
    #[arg(long)]
    pub source: Option<String>,
}
