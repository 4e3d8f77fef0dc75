use crate::lens::Lens;
use crate::matcher::{EdgeSet, EdgeStatistics};
use colored::*;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// One implementation edge, with symbols spelled out by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImplementationRecord {
    pub interface: String,
    #[serde(rename = "type")]
    pub concrete: String,
    pub needs_pointer: bool,
    /// `(interface method, Type.Method)` pairs.
    pub methods: Vec<(String, String)>,
}

/// Everything an `analyze` run reports.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub statistics: EdgeStatistics,
    pub implementations: Vec<ImplementationRecord>,
    pub lenses: Vec<Lens>,
}

impl AnalysisReport {
    pub fn new(edges: &EdgeSet, lenses: Vec<Lens>) -> Self {
        let implementations = edges
            .edges()
            .iter()
            .map(|edge| {
                let concrete = &edges.concrete(edge.concrete).name;
                ImplementationRecord {
                    interface: edges.interface(edge.interface).name.clone(),
                    concrete: concrete.clone(),
                    needs_pointer: edge.needs_pointer,
                    methods: edge
                        .methods
                        .iter()
                        .map(|link| {
                            let method = &edges.method(link.method).signature.name;
                            (link.interface_method.clone(), format!("{concrete}.{method}"))
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            statistics: edges.statistics(),
            implementations,
            lenses,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Interface Implementation Report")?;
        writeln!(self.writer)?;
        self.write_summary(&report.statistics)?;
        self.write_implementations(&report.implementations)?;
        self.write_unimplemented(&report.statistics)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_summary(&mut self, stats: &EdgeStatistics) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_summary_row("Interfaces", stats.interfaces)?;
        self.write_summary_row("Concrete Types", stats.types)?;
        self.write_summary_row("Implementations", stats.edges)?;
        self.write_summary_row("Via Pointer Receivers", stats.pointer_edges)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary_row(&mut self, metric: &str, value: usize) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} |")?;
        Ok(())
    }

    fn write_implementations(&mut self, records: &[ImplementationRecord]) -> anyhow::Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Implementations")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Interface | Type | Receiver |")?;
        writeln!(self.writer, "|-----------|------|----------|")?;
        for record in records {
            let receiver = if record.needs_pointer { "pointer" } else { "value" };
            writeln!(
                self.writer,
                "| `{}` | `{}` | {receiver} |",
                record.interface, record.concrete
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_unimplemented(&mut self, stats: &EdgeStatistics) -> anyhow::Result<()> {
        if stats.unimplemented_interfaces.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Interfaces Without Implementations")?;
        writeln!(self.writer)?;
        for name in &stats.unimplemented_interfaces {
            writeln!(self.writer, "- `{name}`")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Interface Implementation Report".bold().blue())?;
        writeln!(self.writer, "{}", "===============================".blue())?;
        writeln!(self.writer)?;

        let stats = &report.statistics;
        writeln!(self.writer, "{}", "Summary:".bold())?;
        writeln!(self.writer, "  Interfaces: {}", stats.interfaces)?;
        writeln!(self.writer, "  Concrete types: {}", stats.types)?;
        writeln!(
            self.writer,
            "  Implementations: {} ({} via pointer receivers)",
            stats.edges.to_string().green(),
            stats.pointer_edges
        )?;
        writeln!(self.writer)?;

        if !report.lenses.is_empty() {
            writeln!(self.writer, "{}", "Lenses:".bold())?;
            for lens in &report.lenses {
                let location = lens
                    .location
                    .as_ref()
                    .map(|location| format!("{location} "))
                    .unwrap_or_default();
                writeln!(
                    self.writer,
                    "  {}{} {}",
                    location.dimmed(),
                    lens_subject(lens).yellow(),
                    lens.label
                )?;
            }
            writeln!(self.writer)?;
        }

        if !stats.unimplemented_interfaces.is_empty() {
            writeln!(
                self.writer,
                "{} {}",
                "Unimplemented:".red(),
                stats.unimplemented_interfaces.join(", ")
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn lens_subject(lens: &Lens) -> String {
    use crate::lens::LensTarget;
    match &lens.target {
        LensTarget::Interface { name } | LensTarget::Type { name } => name.clone(),
        LensTarget::InterfaceMethod { interface, method } => format!("{interface}.{method}"),
        LensTarget::TypeMethod { receiver, method } => format!("{receiver}.{method}"),
    }
}

pub fn create_writer<'a>(format: OutputFormat, out: Box<dyn Write + 'a>) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out)),
    }
}
