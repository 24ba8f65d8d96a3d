use crate::config::{DEFAULT_NEW_PATH, DEFAULT_OLD_PATH};
use crate::output_formatter::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Rewrite a path prefix across every text file in a directory tree.
///
/// `pathmig` is meant for one-time migrations when infrastructure moves, such as a
/// renamed mount point. Each text file under the directory is searched for the old
/// path as a literal string and every occurrence is replaced with the new path.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Replace /share/siegellab/ with /quobyte/jbsiegelgrp/ in all files",
    long_about = "pathmig - Rewrite a literal path prefix in every text file of a directory tree.

Binary files are detected and left alone. Replacement is plain text, not a regex.

QUICK EXAMPLES:
  pathmig --dry-run .                              # Preview the default migration
  pathmig /data/projects                           # Rewrite files in place
  pathmig --old-path /mnt/old/ --new-path /mnt/new/ .
  pathmig --dry-run --format json . | jq '.files[]'"
)]
pub struct Args {
    /// Directory to process (default: current directory).
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Show what would be changed without modifying files.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to replace.
    #[arg(long, default_value = DEFAULT_OLD_PATH)]
    pub old_path: String,

    /// Replacement path.
    #[arg(long, default_value = DEFAULT_NEW_PATH)]
    pub new_path: String,

    /// The output format for the run report (`text` or `json`).
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log classification and traversal details to stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["pathmig"]).unwrap();
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(!args.dry_run);
        assert_eq!(args.old_path, "/share/siegellab/");
        assert_eq!(args.new_path, "/quobyte/jbsiegelgrp/");
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "pathmig",
            "data",
            "--dry-run",
            "--old-path",
            "/mnt/a/",
            "--new-path",
            "/mnt/b/",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.directory, PathBuf::from("data"));
        assert!(args.dry_run);
        assert_eq!(args.old_path, "/mnt/a/");
        assert_eq!(args.new_path, "/mnt/b/");
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.verbose);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["pathmig", "-v", "-q"]).is_err());
    }
}
