use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Household { action } => commands::household::handle(&action, ctx, flags).await,
        Commands::Sensor { action } => commands::sensor::handle(&action, ctx, flags).await,
        Commands::Alert { action } => commands::alert::handle(&action, ctx, flags).await,
        Commands::Analytics => commands::analytics::handle(ctx, flags).await,
        Commands::Init(_) => unreachable!("init is pre-dispatched in main"),
    }
}
