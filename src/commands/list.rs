//! `raze list` — show instances in the zone without touching them.

use anyhow::Result;

use crate::gcutil::Gcutil;
use crate::output::{self, OutputContext};
use crate::{config, inventory};

/// Run `raze list`.
///
/// # Errors
///
/// Returns an error if the zone cannot be resolved or the listing fails.
pub async fn run(
    gc: &impl Gcutil,
    out: &OutputContext,
    json: bool,
    zone_flag: Option<&str>,
) -> Result<()> {
    let zone = config::resolve_zone(zone_flag)?;
    let names = inventory::list_instances(gc, &zone).await?;

    if json {
        println!("{}", output::json::listing(&zone, &names)?);
        return Ok(());
    }

    if names.is_empty() {
        out.info(&format!("No instances in zone {zone}."));
        return Ok(());
    }

    out.header(&format!("Instances in {zone}:"));
    for name in &names {
        println!("  {name}");
    }
    Ok(())
}
