use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let alert = ctx.service.resolve_alert(id).await?;
    ctx.persist().await?;
    output(&alert, flags.format)
}
