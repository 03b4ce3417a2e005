//! Zone configuration: schema, validation, and YAML persistence.
//!
//! The zone is resolved once at dispatch time and passed explicitly into the
//! lister and the executor; nothing in this crate reads it from global state.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["zone"];

/// Cloud zone names are lowercase alphanumeric with hyphens, starting with a
/// letter and never ending with a hyphen (e.g. `us-central1-a`).
pub static ZONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern — cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z](?:[-a-z0-9]*[a-z0-9])?$").expect("valid regex")
});

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.raze/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RazeConfig {
    /// Target cloud zone, e.g. `us-central1-a`.
    pub zone: Option<String>,
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a zone name.
///
/// # Errors
///
/// Returns an error if the zone is empty or does not match [`ZONE_RE`].
pub fn validate_zone(zone: &str) -> Result<()> {
    if !ZONE_RE.is_match(zone) {
        return Err(ConfigError::InvalidZone {
            zone: zone.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Resolve the target zone: `--zone` flag (or `RAZE_ZONE` env, handled by
/// clap) wins over the config file.
///
/// # Errors
///
/// Returns an error if no zone is set anywhere, or the zone is invalid.
pub fn resolve_zone(flag: Option<&str>) -> Result<String> {
    let zone = match flag {
        Some(z) => z.to_string(),
        None => load()?.zone.ok_or(ConfigError::ZoneUnset)?,
    };
    validate_zone(&zone)?;
    Ok(zone)
}

// ── Persistence ──────────────────────────────────────────────────────────────

/// Path to the config file: `RAZE_CONFIG` env override, else
/// `~/.raze/config.yaml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn path() -> Result<PathBuf> {
    if let Ok(val) = std::env::var("RAZE_CONFIG") {
        return Ok(PathBuf::from(val));
    }
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.join(".raze").join("config.yaml"))
}

/// Load the configuration, falling back to defaults if the file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load() -> Result<RazeConfig> {
    load_from(&path()?)
}

/// Save the configuration, creating the parent directory as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &RazeConfig) -> Result<()> {
    save_to(&path()?, config)
}

pub(crate) fn load_from(path: &Path) -> Result<RazeConfig> {
    if !path.exists() {
        return Ok(RazeConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}

pub(crate) fn save_to(path: &Path, config: &RazeConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let content = serde_yaml::to_string(config).context("cannot serialize config")?;
    std::fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("cannot set permissions on {}", path.display()))?;
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────


#[cfg(test)]
#[allow(clippy::expect_used)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Strings shaped like real zone names always validate.
        #[test]
        fn prop_validate_zone_accepts_zone_shapes(zone in "[a-z](?:[-a-z0-9]{0,20}[a-z0-9])?") {
            prop_assert!(validate_zone(&zone).is_ok(), "{zone} should be valid");
        }

        /// Any string with a character outside [-a-z0-9] is rejected.
        #[test]
        fn prop_validate_zone_rejects_foreign_chars(
            prefix in "[a-z]{1,5}",
            bad in "[A-Z ;$/.]{1}",
            suffix in "[a-z0-9]{0,5}",
        ) {
            let zone = format!("{prefix}{bad}{suffix}");
            prop_assert!(validate_zone(&zone).is_err(), "{zone} should be rejected");
        }

        /// resolve_zone with a valid flag returns it verbatim.
        #[test]
        fn prop_resolve_zone_returns_flag_verbatim(zone in "[a-z](?:[-a-z0-9]{0,20}[a-z0-9])?") {
            let resolved = resolve_zone(Some(&zone)).expect("resolve");
            prop_assert_eq!(resolved, zone);
        }
    }
}
