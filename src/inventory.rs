//! Instance inventory: typed parsing of the cloud listing.

use std::collections::HashMap;

use anyhow::Result;

use serde::Deserialize;

use crate::error::{InventoryError, ZoneNotFoundError};
use crate::gcutil::Gcutil;

/// Top-level shape of `gcutil listinstances --format=json`.
///
/// Only the fields this tool reads are modelled; everything else in the
/// response is ignored.
#[derive(Debug, Deserialize)]
pub struct InstanceListing {
    /// Keyed by `zones/<zone>`.
    #[serde(default)]
    pub items: HashMap<String, ZoneItems>,
}

/// One zone's entry in the listing.
#[derive(Debug, Default, Deserialize)]
pub struct ZoneItems {
    /// Absent when the zone has no instances.
    #[serde(default)]
    pub instances: Vec<InstanceRecord>,
}

/// A single instance entry. Only the name is needed.
#[derive(Debug, Deserialize)]
pub struct InstanceRecord {
    pub name: String,
}

/// Key under which a zone appears in the listing's `items` map.
#[must_use]
pub fn zone_key(zone: &str) -> String {
    format!("zones/{zone}")
}

/// List the names of all instances in `zone`, in listed order.
///
/// Read-only; the only side effect is the inventory subprocess itself.
///
/// # Errors
///
/// Fails with [`InventoryError`] if the listing command exits non-zero,
/// emits malformed JSON, or contains an instance with an empty name; fails
/// with [`ZoneNotFoundError`] if the response lacks the expected zone key.
pub async fn list_instances(gc: &impl Gcutil, zone: &str) -> Result<Vec<String>> {
    let output = gc.list_instances().await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(InventoryError::CommandFailed { stderr }.into());
    }

    let listing: InstanceListing =
        serde_json::from_slice(&output.stdout).map_err(InventoryError::MalformedJson)?;

    let Some(items) = listing.items.get(&zone_key(zone)) else {
        return Err(ZoneNotFoundError {
            zone: zone.to_string(),
        }
        .into());
    };

    let names: Vec<String> = items.instances.iter().map(|i| i.name.clone()).collect();
    if names.iter().any(String::is_empty) {
        return Err(InventoryError::EmptyInstanceName.into());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use std::os::unix::process::ExitStatusExt;
    use std::process::{ExitStatus, Output};

    use anyhow::Result;

    use super::*;
    use crate::error::{InventoryError, ZoneNotFoundError};
    use crate::gcutil::Gcutil;

    fn ok(stdout: &[u8]) -> Output {
        Output {
            status: ExitStatus::from_raw(0),
            stdout: stdout.to_vec(),
            stderr: Vec::new(),
        }
    }

    fn fail(stderr: &[u8]) -> Output {
        Output {
            status: ExitStatus::from_raw(1 << 8),
            stdout: Vec::new(),
            stderr: stderr.to_vec(),
        }
    }

    /// Mock gcutil with a configurable `list_instances()` output.
    struct GcutilListStub(Output);

    impl Gcutil for GcutilListStub {
        async fn list_instances(&self) -> Result<Output> {
            Ok(Output {
                status: self.0.status,
                stdout: self.0.stdout.clone(),
                stderr: self.0.stderr.clone(),
            })
        }

        async fn delete_instances(&self, _: &str, _: &[String]) -> Result<Output> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn missing_zone_key_is_zone_not_found() {
        let gc = GcutilListStub(ok(br#"{"items":{"zones/other-zone":{"instances":[]}}}"#));
        let err = list_instances(&gc, "us-central1-a")
            .await
            .expect_err("should fail");
        let zone_err = err
            .downcast_ref::<ZoneNotFoundError>()
            .expect("ZoneNotFoundError");
        assert_eq!(zone_err.zone, "us-central1-a");
    }

    #[tokio::test]
    async fn missing_items_map_is_zone_not_found() {
        let gc = GcutilListStub(ok(b"{}"));
        let err = list_instances(&gc, "us-central1-a")
            .await
            .expect_err("should fail");
        assert!(err.downcast_ref::<ZoneNotFoundError>().is_some());
    }

    #[tokio::test]
    async fn zone_without_instances_field_is_empty() {
        let gc = GcutilListStub(ok(br#"{"items":{"zones/us-central1-a":{}}}"#));
        let names = list_instances(&gc, "us-central1-a").await.expect("list");
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn names_are_returned_in_listed_order() {
        let gc = GcutilListStub(ok(
            br#"{"items":{"zones/us-central1-a":{"instances":[{"name":"vm-a"},{"name":"vm-b"}]}}}"#,
        ));
        let names = list_instances(&gc, "us-central1-a").await.expect("list");
        assert_eq!(names, vec!["vm-a", "vm-b"]);
    }

    #[tokio::test]
    async fn command_failure_is_inventory_error() {
        let gc = GcutilListStub(fail(b"permission denied\n"));
        let err = list_instances(&gc, "us-central1-a")
            .await
            .expect_err("should fail");
        match err.downcast_ref::<InventoryError>() {
            Some(InventoryError::CommandFailed { stderr }) => {
                assert_eq!(stderr, "permission denied");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_inventory_error() {
        let gc = GcutilListStub(ok(b"not json"));
        let err = list_instances(&gc, "us-central1-a")
            .await
            .expect_err("should fail");
        assert!(matches!(
            err.downcast_ref::<InventoryError>(),
            Some(InventoryError::MalformedJson(_))
        ));
    }

    #[tokio::test]
    async fn empty_instance_name_is_inventory_error() {
        let gc = GcutilListStub(ok(
            br#"{"items":{"zones/us-central1-a":{"instances":[{"name":""}]}}}"#,
        ));
        let err = list_instances(&gc, "us-central1-a")
            .await
            .expect_err("should fail");
        assert!(matches!(
            err.downcast_ref::<InventoryError>(),
            Some(InventoryError::EmptyInstanceName)
        ));
    }

    #[tokio::test]
    async fn extra_json_fields_are_ignored() {
        let gc = GcutilListStub(ok(
            br#"{"kind":"compute#instanceAggregatedList","items":{"zones/us-central1-a":{"instances":[{"name":"vm-a","status":"RUNNING"}]}}}"#,
        ));
        let names = list_instances(&gc, "us-central1-a").await.expect("list");
        assert_eq!(names, vec!["vm-a"]);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Extraction preserves listing order for any set of names.
        #[test]
        fn prop_parse_preserves_order(names in proptest::collection::vec("[a-z][a-z0-9-]{0,10}", 0..8)) {
            let instances: Vec<_> = names
                .iter()
                .map(|n| serde_json::json!({ "name": n }))
                .collect();
            let doc = serde_json::json!({
                "items": { "zones/us-central1-a": { "instances": instances } }
            });

            let listing: InstanceListing =
                serde_json::from_value(doc).expect("parse listing");
            let extracted: Vec<String> = listing
                .items
                .get(&zone_key("us-central1-a"))
                .expect("zone present")
                .instances
                .iter()
                .map(|i| i.name.clone())
                .collect();

            prop_assert_eq!(extracted, names);
        }
    }
}
