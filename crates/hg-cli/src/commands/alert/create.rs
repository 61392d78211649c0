use std::collections::BTreeSet;

use hg_core::entities::NewAlert;
use hg_core::enums::{AlertSource, Channel, Severity};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AlertCreateArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &AlertCreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let new_alert = new_alert_from(args)?;
    let alert = ctx.service.create_alert(new_alert).await?;
    ctx.persist().await?;
    output(&alert, flags.format)
}

fn new_alert_from(args: &AlertCreateArgs) -> anyhow::Result<NewAlert> {
    let severity = parse_enum::<Severity>(&args.severity, "severity")?;
    let source = args
        .source
        .as_deref()
        .map(|value| parse_enum::<AlertSource>(value, "source"))
        .transpose()?
        .unwrap_or(AlertSource::Manual);
    let channels = args
        .channel
        .iter()
        .map(|raw| raw.parse::<Channel>())
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(NewAlert {
        title: args.title.clone(),
        message: args.message.clone(),
        severity,
        location: args.location.clone(),
        channels,
        source,
    })
}
