mod list;
mod submit;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HouseholdCommands;
use crate::context::AppContext;

/// Handle `hgd household`.
pub async fn handle(
    action: &HouseholdCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        HouseholdCommands::Submit(args) => submit::run(args, ctx, flags).await,
        HouseholdCommands::List => list::run(ctx, flags).await,
    }
}
