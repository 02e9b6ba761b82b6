// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pattrn developer CLI.
//!
//! Runs the map core headless over a dataset file: which schema fields carry
//! data, the markers a layer would place, and the detail panel a selection
//! would produce. Settings come from the same JSON blobs a deployment uses
//! (`settings.json`, `palette.json`, `metadata.json`, `layers.json`).

mod cli;
mod commands;
mod host;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli, &mut out)
}

/// Logs go to stderr so command output stays machine-readable.
/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
