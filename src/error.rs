//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator. Command handlers never recover from
//! these locally; they surface as a diagnostic and a non-zero exit.

use thiserror::Error;

// ── Inventory errors ──────────────────────────────────────────────────────────

/// Errors raised while listing instances.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Instance listing failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("Instance listing returned malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Instance listing contains an instance with an empty name.")]
    EmptyInstanceName,
}

// ── Zone lookup ───────────────────────────────────────────────────────────────

/// The expected zone key was absent from the inventory response.
#[derive(Debug, Error)]
#[error("Zone '{zone}' not found in the instance listing. Check the zone name or pass --zone.")]
pub struct ZoneNotFoundError {
    pub zone: String,
}

// ── Teardown errors ───────────────────────────────────────────────────────────

/// Errors raised while deleting instances. The deletion is a single batch
/// call, so there is no per-instance failure reporting.
#[derive(Debug, Error)]
pub enum TeardownError {
    #[error("Instance deletion failed: {stderr}")]
    CommandFailed { stderr: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid zone '{zone}': must be lowercase letters, digits, and hyphens (e.g. us-central1-a)")]
    InvalidZone { zone: String },

    #[error("No zone configured. Pass --zone, set RAZE_ZONE, or run: raze config set zone <zone>")]
    ZoneUnset,
}

/// Stable machine-readable code for the `--json` error object.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<ZoneNotFoundError>().is_some() {
        "zone_not_found"
    } else if err.downcast_ref::<InventoryError>().is_some() {
        "inventory_failed"
    } else if err.downcast_ref::<TeardownError>().is_some() {
        "teardown_failed"
    } else if err.downcast_ref::<ConfigError>().is_some() {
        "config"
    } else {
        "internal"
    }
}
