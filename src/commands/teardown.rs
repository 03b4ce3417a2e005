//! `raze teardown` — force-delete every instance in the zone.

use anyhow::Result;

use crate::gcutil::Gcutil;
use crate::output::{self, OutputContext, progress};
use crate::{config, inventory, teardown};

/// Run `raze teardown`.
///
/// Lists the zone, prints the instance names, and issues one batch
/// force-delete if any exist. An empty zone is a success, not an error.
///
/// # Errors
///
/// Returns an error if the zone cannot be resolved, the listing fails, or
/// the deletion fails.
pub async fn run(
    gc: &impl Gcutil,
    out: &OutputContext,
    json: bool,
    zone_flag: Option<&str>,
) -> Result<()> {
    let zone = config::resolve_zone(zone_flag)?;
    let names = inventory::list_instances(gc, &zone).await?;

    // The pre-delete listing is the only audit trail: it always goes to
    // stdout before anything destructive happens.
    if json {
        println!("{}", output::json::listing(&zone, &names)?);
    } else {
        out.header(&format!("Currently running in {zone}:"));
        for name in &names {
            println!("  {name}");
        }
    }

    if names.is_empty() {
        if !json {
            out.info("No instances to tear down.");
        }
        return Ok(());
    }

    let count = names.len();
    let noun = if count == 1 { "instance" } else { "instances" };
    let msg = format!("Deleting {count} {noun}...");

    let pb = (!json && out.show_progress()).then(|| progress::spinner(&msg));
    let result = teardown::delete_instances(gc, &zone, &names).await;
    match &pb {
        Some(pb) if result.is_ok() => progress::finish_ok(pb, &msg),
        Some(pb) => pb.finish_and_clear(),
        None => {}
    }
    result?;

    if !json {
        out.success(&format!("Deleted {count} {noun} from zone {zone}."));
    }
    Ok(())
}
