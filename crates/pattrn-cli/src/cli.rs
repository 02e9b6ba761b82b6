// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(
    name = "pattrn",
    author,
    version,
    about = "Pattrn map developer CLI: classify, markers, inspect",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding settings.json, palette.json, metadata.json and
    /// layers.json. Defaults to the user config directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show which schema fields carry data, grouped by type.
    Classify {
        /// Dataset and layer selection.
        #[command(flatten)]
        source: SourceArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print the marker descriptors of a layer as JSON.
    Markers {
        /// Dataset and layer selection.
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Select one record and print the detail panel it produces.
    Inspect {
        /// Dataset and layer selection.
        #[command(flatten)]
        source: SourceArgs,

        /// Record index (marker id).
        #[arg(long)]
        index: usize,
    },
}

/// Dataset file, schema file and layer ids.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// GeoJSON FeatureCollection or JSON array of rows.
    pub dataset: PathBuf,

    /// Variable schema: a descriptor list or lists keyed by type.
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Layer group id.
    #[arg(long, default_value = "default")]
    pub group: String,

    /// Data layer id.
    #[arg(long, default_value = "default")]
    pub layer: String,
}

/// Output format for tabular commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// Pretty-printed JSON.
    Json,
}
