mod list;
mod reading;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SensorCommands;
use crate::context::AppContext;

/// Handle `hgd sensor`.
pub async fn handle(action: &SensorCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SensorCommands::List => list::run(ctx, flags).await,
        SensorCommands::Reading { id, value, at } => {
            reading::run(id, *value, at.as_deref(), ctx, flags).await
        }
    }
}
