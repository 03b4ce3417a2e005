//! Cloud CLI abstraction — enables test doubles for all `gcutil` commands.

use std::process::Output;

use anyhow::{Context, Result};

use crate::command_runner::{
    CommandRunner, DEFAULT_CMD_TIMEOUT, DELETE_CMD_TIMEOUT, TokioCommandRunner,
};

/// Binary name of the cloud CLI.
pub const GCUTIL_BIN: &str = "gcutil";

/// Abstraction over the cloud CLI, enabling test doubles.
///
/// Exactly the two operations the tool needs. The production implementation
/// delegates to the `gcutil` binary through a [`CommandRunner`].
#[allow(async_fn_in_trait)]
pub trait Gcutil {
    /// Run `gcutil listinstances --format=json`.
    ///
    /// Scoped implicitly to the current project; the caller narrows the
    /// result down to one zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    async fn list_instances(&self) -> Result<Output>;

    /// Run `gcutil deleteinstance --force --zone=<zone> <names...>`.
    ///
    /// One batch call covering all names; there is no per-instance variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    async fn delete_instances(&self, zone: &str, names: &[String]) -> Result<Output>;
}

/// Production implementation — routes all `gcutil` calls through a
/// `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct GcutilCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> GcutilCli<R> {
    /// Create a `GcutilCli` with an explicit runner instance.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl GcutilCli<TokioCommandRunner> {
    /// Convenience constructor for production use, backed by
    /// `TokioCommandRunner` with the default timeout.
    #[must_use]
    pub fn default_runner() -> Self {
        Self {
            runner: TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT),
        }
    }
}

impl<R: CommandRunner> Gcutil for GcutilCli<R> {
    async fn list_instances(&self) -> Result<Output> {
        self.runner
            .run(GCUTIL_BIN, &["listinstances", "--format=json"])
            .await
            .context("failed to run gcutil listinstances")
    }

    async fn delete_instances(&self, zone: &str, names: &[String]) -> Result<Output> {
        let zone_flag = format!("--zone={zone}");
        let mut args: Vec<&str> = vec!["deleteinstance", "--force", &zone_flag];
        args.extend(names.iter().map(String::as_str));
        self.runner
            .run_with_timeout(GCUTIL_BIN, &args, DELETE_CMD_TIMEOUT)
            .await
            .context("failed to run gcutil deleteinstance")
    }
}
