use crate::errors::Error;
use crate::matcher::SignatureMatcher;
use crate::symbols::load_program;
use anyhow::{Context, Result};
use colored::*;
use std::io::Write;
use std::path::PathBuf;

/// Print one line per problem, with its error code.
pub fn write_problems<W: Write>(out: &mut W, problems: &[Error]) -> Result<()> {
    for problem in problems {
        writeln!(out, "{} [{}] {problem}", "error".red().bold(), problem.code())?;
    }
    if problems.is_empty() {
        writeln!(out, "{} no problems found", "ok".green().bold())?;
    } else {
        writeln!(out, "{} problem(s) found", problems.len())?;
    }
    Ok(())
}

/// Validate the merged program and report every problem on stdout.
/// Returns the number of problems found.
pub fn handle_check(symbols: &[PathBuf]) -> Result<usize> {
    let program = load_program(symbols).context("loading symbol tables")?;
    let problems = SignatureMatcher::new(&program).validate();
    tracing::debug!(problems = problems.len(), "validation complete");

    let mut out = std::io::stdout().lock();
    write_problems(&mut out, &problems)?;
    out.flush()?;
    Ok(problems.len())
}
