//! Command-line definitions.

pub mod setup;

use crate::io::output::OutputFormat;
use crate::matcher::ReceiverPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "implens")]
#[command(about = "Finds which concrete types implement which interfaces", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute implementation edges and lens labels
    Analyze {
        /// Symbol table files (toml, json, yaml); merged into one program
        #[arg(required = true)]
        symbols: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .implens.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Match interfaces sequentially
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Worker threads (0 = all cores)
        #[arg(short = 'j', long = "jobs")]
        jobs: Option<usize>,

        /// Which receiver forms count toward a method set
        #[arg(long = "receiver-policy", value_enum)]
        receiver_policy: Option<ReceiverPolicy>,

        /// Increase log verbosity (-v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Report every duplicate, cycle and unresolved type in the input
    Check {
        /// Symbol table files (toml, json, yaml); merged into one program
        #[arg(required = true)]
        symbols: Vec<PathBuf>,

        /// Increase log verbosity (-v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}
