//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::error::error_code;
use crate::gcutil::GcutilCli;
use crate::output::{self, OutputContext};

/// Tear down every compute instance in a cloud zone
#[derive(Parser)]
#[command(
    name = "raze",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Target zone (overrides the configured zone)
    #[arg(long, global = true, env = "RAZE_ZONE")]
    pub zone: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List instances in the zone
    List,

    /// Force-delete every instance in the zone
    Teardown,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            zone,
            command,
        } = self;

        let result = match command {
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
            Command::List => {
                let ctx = OutputContext::new(no_color, quiet);
                let gc = GcutilCli::default_runner();
                commands::list::run(&gc, &ctx, json, zone.as_deref()).await
            }
            Command::Teardown => {
                let ctx = OutputContext::new(no_color, quiet);
                let gc = GcutilCli::default_runner();
                commands::teardown::run(&gc, &ctx, json, zone.as_deref()).await
            }
            Command::Config(cmd) => {
                let ctx = OutputContext::new(no_color, quiet);
                commands::config::run(&ctx, json, cmd)
            }
        };

        // In JSON mode failures also emit a machine-readable error object on
        // stdout; the human diagnostic still goes to stderr in main.
        if json && let Err(e) = &result {
            println!(
                "{}",
                output::json::format_error(&format!("{e:#}"), error_code(e))?
            );
        }
        result
    }
}
