use crate::config::RunConfig;
use crate::errors::Result;
use crate::rewriter::{LineChange, RewriteOutcome};
use crate::walker::RunCounters;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Stderr, Stdout, Write};
use std::path::Path;

/// Defines the possible output formats for the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Progress notices as files are processed, then a summary block.
    Text,
    /// A single JSON document printed once the walk is complete.
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    tool: ToolInfo,
    run_time: DateTime<Utc>,
    directory: String,
    old_path: &'a str,
    new_path: &'a str,
    dry_run: bool,
    files_checked: usize,
    files_modified: usize,
    files: &'a [JsonFile],
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct JsonFile {
    path: String,
    status: &'static str,
    replacements: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    lines: Vec<LineChange>,
}

/// Writes the run report: header, per-file notices and summary.
///
/// Notices go to `out` and per-file diagnostics go to `err`. In JSON mode the
/// notices are collected and emitted as one document by `write_summary`.
pub struct OutputFormatter<W: Write, E: Write> {
    format: OutputFormat,
    out: W,
    err: E,
    started: DateTime<Utc>,
    files: Vec<JsonFile>,
}

impl OutputFormatter<Stdout, Stderr> {
    /// Creates a formatter bound to the process's standard streams.
    pub fn stdio(format: OutputFormat) -> Self {
        Self::new(format, io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> OutputFormatter<W, E> {
    /// Creates a new `OutputFormatter` writing to the given streams.
    pub fn new(format: OutputFormat, out: W, err: E) -> Self {
        Self {
            format,
            out,
            err,
            started: Utc::now(),
            files: Vec::new(),
        }
    }

    /// Prints the directory being processed and the old to new mapping.
    pub fn write_header(&mut self, config: &RunConfig) -> Result<()> {
        if self.format != OutputFormat::Text {
            return Ok(());
        }
        writeln!(
            self.out,
            "Processing directory: {}",
            config.absolute_root().display()
        )?;
        writeln!(
            self.out,
            "Replacing: '{}' → '{}'",
            config.old_path, config.new_path
        )?;
        if config.dry_run {
            writeln!(self.out, "*** DRY RUN MODE - No files will be modified ***")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Reports the outcome for one file.
    pub fn write_outcome(&mut self, outcome: &RewriteOutcome) -> Result<()> {
        match outcome {
            RewriteOutcome::Errored { path, message } => {
                writeln!(self.err, "Error processing {}: {}", path.display(), message)?;
            }
            RewriteOutcome::NotModified | RewriteOutcome::Skipped => {}
            RewriteOutcome::Modified { path, replacements } => match self.format {
                OutputFormat::Text => writeln!(self.out, "Modified: {}", path.display())?,
                OutputFormat::Json => self.files.push(JsonFile {
                    path: path.display().to_string(),
                    status: "modified",
                    replacements: *replacements,
                    lines: Vec::new(),
                }),
            },
            RewriteOutcome::WouldModify {
                path,
                replacements,
                lines,
            } => match self.format {
                OutputFormat::Text => {
                    writeln!(self.out, "[DRY RUN] Would modify: {}", path.display())?;
                    for line in lines {
                        writeln!(self.out, "  Line {}: {}", line.line_number, line.before)?;
                        writeln!(self.out, "  →        {}", line.after)?;
                    }
                }
                OutputFormat::Json => self.files.push(JsonFile {
                    path: path.display().to_string(),
                    status: "would_modify",
                    replacements: *replacements,
                    lines: lines.clone(),
                }),
            },
        }
        Ok(())
    }

    /// Reports a directory entry that could not be read during traversal.
    pub fn write_walk_error(&mut self, path: Option<&Path>, error: &walkdir::Error) -> Result<()> {
        match path {
            Some(p) => writeln!(self.err, "Error reading {}: {}", p.display(), error)?,
            None => writeln!(self.err, "Error reading directory entry: {}", error)?,
        }
        Ok(())
    }

    /// Consumes the formatter, returning its output and error streams.
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    /// Prints the final counts.
    pub fn write_summary(&mut self, config: &RunConfig, counters: &RunCounters) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out)?;
                writeln!(self.out, "Summary:")?;
                writeln!(self.out, "  Files checked: {}", counters.files_checked)?;
                if config.dry_run {
                    writeln!(
                        self.out,
                        "  Files that would be modified: {}",
                        counters.files_modified
                    )?;
                } else {
                    writeln!(self.out, "  Files modified: {}", counters.files_modified)?;
                }
            }
            OutputFormat::Json => {
                let report = JsonReport {
                    tool: ToolInfo {
                        name: env!("CARGO_PKG_NAME"),
                        version: env!("CARGO_PKG_VERSION"),
                    },
                    run_time: self.started,
                    directory: config.absolute_root().display().to_string(),
                    old_path: &config.old_path,
                    new_path: &config.new_path,
                    dry_run: config.dry_run,
                    files_checked: counters.files_checked,
                    files_modified: counters.files_modified,
                    files: &self.files,
                };
                serde_json::to_writer_pretty(&mut self.out, &report)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}
