use crate::cli::GlobalFlags;
use crate::commands::shared::limit::{effective_limit, newest_first};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    let records = newest_first(ctx.service.list_records().await, limit);
    output(&records, flags.format)
}
