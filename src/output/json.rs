//! JSON output helpers.
//!
//! Provides the listing formatter for `--json` mode and the error-object
//! formatter used by all `--json` code paths when a command fails.

use anyhow::{Context, Result};

/// Format an instance listing as a pretty-printed JSON object:
/// `{"zone": "...", "instances": ["...", ...]}`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice — `serde_json` only fails on non-finite floats and maps with
/// non-string keys, neither of which appear here).
pub fn listing(zone: &str, instances: &[String]) -> Result<String> {
    let obj = serde_json::json!({
        "zone": zone,
        "instances": instances,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format a JSON error object:
///
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (see [`listing`]).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
