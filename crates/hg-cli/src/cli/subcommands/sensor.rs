use clap::Subcommand;

/// Sensor commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SensorCommands {
    /// List registered sensors.
    List,
    /// Ingest a reading for a sensor.
    Reading {
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Reading time as RFC 3339 (defaults to now).
        #[arg(long)]
        at: Option<String>,
    },
}
