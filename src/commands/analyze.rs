use crate::cli::setup::configure_thread_pool;
use crate::config::{load_config, load_config_from, ImplensConfig};
use crate::io::{create_writer, open_destination, AnalysisReport, OutputFormat};
use crate::lens::collect_lenses;
use crate::matcher::{ReceiverPolicy, SignatureMatcher};
use crate::symbols::load_program;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Options of one `analyze` invocation, flags not yet merged with the
/// config file.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub symbols: Vec<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_parallel: bool,
    pub jobs: Option<usize>,
    pub receiver_policy: Option<ReceiverPolicy>,
}

impl AnalyzeConfig {
    /// Load the config file and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<ImplensConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => load_config(),
        };

        if self.no_parallel {
            config.parallel.enabled = false;
        }
        if let Some(jobs) = self.jobs {
            config.parallel.max_concurrency = (jobs > 0).then_some(jobs);
        }
        if let Some(policy) = self.receiver_policy {
            config.matching.receiver_policy = policy;
        }
        Ok(config)
    }
}

/// Build the report for `analyze` without writing it.
pub fn build_report(analyze: &AnalyzeConfig, config: &ImplensConfig) -> Result<AnalysisReport> {
    let program = load_program(&analyze.symbols).context("loading symbol tables")?;
    tracing::info!(
        interfaces = program.interfaces.len(),
        types = program.types.len(),
        methods = program.methods.len(),
        "program loaded"
    );

    let matcher = SignatureMatcher::with_options(&program, config.match_options());
    let edges = matcher.compute_edges().map_err(|e| {
        let code = e.code();
        anyhow::Error::new(e).context(format!("matching failed [{code}]"))
    })?;

    let lenses = collect_lenses(&edges, &config.lens);
    Ok(AnalysisReport::new(&edges, lenses))
}

pub fn handle_analyze(analyze: AnalyzeConfig) -> Result<()> {
    let config = analyze.resolve_config()?;
    configure_thread_pool(config.parallel.effective_concurrency());

    let report = build_report(&analyze, &config)?;
    let destination = open_destination(analyze.output.as_deref())?;
    let mut writer = create_writer(analyze.format, destination);
    writer.write_report(&report)?;
    Ok(())
}
