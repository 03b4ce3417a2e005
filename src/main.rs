//! Raze CLI - tear down every compute instance in a cloud zone

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;

use raze_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
