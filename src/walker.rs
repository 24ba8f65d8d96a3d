use crate::classifier;
use crate::config::RunConfig;
use crate::errors::Result;
use crate::output_formatter::{OutputFormat, OutputFormatter};
use crate::rewriter::{self, RewriteOutcome};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Running totals for one walk.
///
/// Only ever incremented, and `files_modified` never exceeds `files_checked`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunCounters {
    /// Text files that were examined.
    pub files_checked: usize,
    /// Files that were (or in a dry run, would be) rewritten.
    pub files_modified: usize,
}

impl RunCounters {
    /// Folds one file's outcome into the totals. Skipped files are not counted.
    pub fn record(&mut self, outcome: &RewriteOutcome) {
        if matches!(outcome, RewriteOutcome::Skipped) {
            return;
        }
        self.files_checked += 1;
        if outcome.is_modified() {
            self.files_modified += 1;
        }
    }
}

/// Walks `root` and rewrites every text file, reporting to stdout and stderr.
///
/// This is a convenience wrapper around `walk_with` using the text format.
pub fn walk(root: &Path, old: &str, new: &str, dry_run: bool) -> Result<RunCounters> {
    let config = RunConfig::new(root, old, new, dry_run)?;
    let mut formatter = OutputFormatter::stdio(OutputFormat::Text);
    walk_with(&config, &mut formatter)
}

/// Walks the configured root, classifying and processing each regular file in
/// the order the directory listing yields them.
///
/// Neither unreadable entries nor per-file failures stop the walk. The only
/// errors returned are failures to write the report itself.
pub fn walk_with<W: Write, E: Write>(
    config: &RunConfig,
    formatter: &mut OutputFormatter<W, E>,
) -> Result<RunCounters> {
    let mut counters = RunCounters::default();
    info!(root = %config.root.display(), dry_run = config.dry_run, "walk started");

    for entry in WalkDir::new(&config.root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                formatter.write_walk_error(e.path(), &e)?;
                continue;
            }
        };
        // Links to files are followed, links to directories are not descended.
        let path = entry.path();
        if !entry.file_type().is_file() && !(entry.path_is_symlink() && path.is_file()) {
            continue;
        }

        let outcome = if classifier::is_text(path) {
            rewriter::process(path, &config.old_path, &config.new_path, config.dry_run)
        } else {
            debug!(path = %path.display(), "skipping non-text file");
            RewriteOutcome::Skipped
        };

        counters.record(&outcome);
        formatter.write_outcome(&outcome)?;
    }

    info!(
        files_checked = counters.files_checked,
        files_modified = counters.files_modified,
        "walk finished"
    );
    Ok(counters)
}
