use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_timestamp;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    value: f64,
    at: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let timestamp = at.map(parse_timestamp).transpose()?;
    let sensor = ctx
        .service
        .submit_sensor_reading(id, value, timestamp)
        .await?;
    ctx.persist().await?;
    output(&sensor, flags.format)
}
