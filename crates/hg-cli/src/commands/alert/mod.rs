mod create;
mod list;
mod resolve;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AlertCommands;
use crate::context::AppContext;

/// Handle `hgd alert`.
pub async fn handle(action: &AlertCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AlertCommands::Create(args) => create::run(args, ctx, flags).await,
        AlertCommands::Resolve { id } => resolve::run(id, ctx, flags).await,
        AlertCommands::List { status } => list::run(status.as_deref(), ctx, flags).await,
    }
}
