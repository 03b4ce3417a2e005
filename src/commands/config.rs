//! `raze config` — show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::config;
use crate::output::OutputContext;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read, validated, or
/// written.
pub fn run(out: &OutputContext, json: bool, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(out, json),
        ConfigCommand::Set { key, value } => set(out, &key, &value),
    }
}

fn show(out: &OutputContext, json: bool) -> Result<()> {
    let cfg = config::load()?;
    let path = config::path()?;

    if json {
        let obj = serde_json::json!({
            "zone": cfg.zone,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(());
    }

    out.kv("zone", cfg.zone.as_deref().unwrap_or("(unset)"));
    out.kv("file", &path.display().to_string());
    Ok(())
}

fn set(out: &OutputContext, key: &str, value: &str) -> Result<()> {
    config::validate_config_key(key)?;

    let mut cfg = config::load()?;
    match key {
        "zone" => {
            config::validate_zone(value)?;
            cfg.zone = Some(value.to_string());
        }
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    config::save(&cfg)?;

    out.success(&format!("Set {key} = {value}"));
    Ok(())
}
