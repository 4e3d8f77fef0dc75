use anyhow::Result;
use clap::Parser;
use implens::cli::setup::init_tracing;
use implens::cli::{Cli, Commands};
use implens::commands::{handle_analyze, handle_check, AnalyzeConfig};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbols,
            format,
            output,
            config,
            no_parallel,
            jobs,
            receiver_policy,
            verbosity,
        } => {
            init_tracing(verbosity);
            handle_analyze(AnalyzeConfig {
                symbols,
                format,
                output,
                config,
                no_parallel,
                jobs,
                receiver_policy,
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { symbols, verbosity } => {
            init_tracing(verbosity);
            let problems = handle_check(&symbols)?;
            Ok(if problems == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
