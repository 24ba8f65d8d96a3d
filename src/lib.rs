//! `pathmig` is a library for one-time path prefix migrations across a directory tree.
//!
//! It provides the core logic for the `pathmig` command-line tool but can also be used
//! as a standalone library. The main components are:
//!
//! - `classifier`: Decides whether a file is text (eligible for rewriting) or binary.
//! - `rewriter`: Replaces a literal string in one file, or previews the change.
//! - `walker`: Recursively visits a directory and accumulates `RunCounters`.
//! - `output_formatter`: Renders the run report as text or JSON.
//! - `config`: The validated, immutable settings for one run.
//!
//! Everything runs on a single thread with blocking I/O. Each file is read fully into
//! memory and, unless in a dry run, rewritten in place.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod errors;
pub mod output_formatter;
pub mod rewriter;
pub mod walker;

// Re-export main types for easier access by library users.
pub use config::RunConfig;
pub use errors::{Error, Result};
pub use output_formatter::{OutputFormat, OutputFormatter};
pub use rewriter::RewriteOutcome;
pub use walker::RunCounters;
