use std::collections::BTreeSet;

use hg_core::entities::HouseholdObservation;
use hg_core::enums::{SanitationAccess, Symptom, WaterSource};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HouseholdSubmitArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    args: &HouseholdSubmitArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let observation = observation_from(args)?;
    let record = ctx.service.submit_household(observation).await?;
    ctx.persist().await?;
    output(&record, flags.format)
}

fn observation_from(args: &HouseholdSubmitArgs) -> anyhow::Result<HouseholdObservation> {
    let symptoms = args
        .symptom
        .iter()
        .map(|raw| raw.parse::<Symptom>())
        .collect::<Result<BTreeSet<_>, _>>()?;
    let water_source = args
        .water_source
        .as_deref()
        .map(str::parse::<WaterSource>)
        .transpose()?
        .unwrap_or_default();
    let sanitation_access = args
        .sanitation
        .as_deref()
        .map(str::parse::<SanitationAccess>)
        .transpose()?
        .unwrap_or_default();

    Ok(HouseholdObservation {
        household_id: args.household_id.clone(),
        location: args.location.clone(),
        asha_worker: args.agent.clone(),
        symptoms,
        water_source,
        sanitation_access,
        notes: args.notes.clone().unwrap_or_default(),
    })
}
