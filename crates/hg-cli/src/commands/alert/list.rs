use hg_core::enums::AlertStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::{effective_limit, newest_first};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(status: Option<&str>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = status
        .map(|value| parse_enum::<AlertStatus>(value, "status"))
        .transpose()?;
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    let alerts = newest_first(ctx.service.list_alerts(status).await, limit);
    output(&alerts, flags.format)
}
