use clap::{Args, Subcommand};

/// Household observation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum HouseholdCommands {
    /// Submit a household observation; scores it and raises an alert at high risk.
    Submit(HouseholdSubmitArgs),
    /// List health records, newest first.
    List,
}

#[derive(Clone, Debug, Args)]
pub struct HouseholdSubmitArgs {
    #[arg(long)]
    pub household_id: String,
    #[arg(long)]
    pub location: String,
    /// Reporting ASHA worker.
    #[arg(long)]
    pub agent: String,
    /// Observed symptom (repeatable).
    #[arg(long)]
    pub symptom: Vec<String>,
    /// well, river, pond, piped, rainwater, other
    #[arg(long)]
    pub water_source: Option<String>,
    /// private-toilet, shared-toilet, community-toilet, open-defecation
    #[arg(long)]
    pub sanitation: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}
