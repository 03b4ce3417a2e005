//! Batch instance deletion.

use anyhow::{Context, Result};

use crate::error::TeardownError;
use crate::gcutil::Gcutil;

/// Force-delete all `names` in `zone` with one batch call.
///
/// The caller decides whether there is anything to delete; this function
/// refuses an empty batch rather than issuing a no-op deletion command.
/// There is no partial-success reporting: the batch either succeeds or the
/// whole error is surfaced.
///
/// # Errors
///
/// Fails with [`TeardownError`] if the deletion command exits non-zero.
pub async fn delete_instances(gc: &impl Gcutil, zone: &str, names: &[String]) -> Result<()> {
    anyhow::ensure!(!names.is_empty(), "refusing to issue an empty deletion batch");

    let output = gc
        .delete_instances(zone, names)
        .await
        .context("deleting instances")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(TeardownError::CommandFailed { stderr }.into());
    }
    Ok(())
}
