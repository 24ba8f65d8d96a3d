use crate::cli::Args;
use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};

/// Path prefix replaced when `--old-path` is not given.
pub const DEFAULT_OLD_PATH: &str = "/share/siegellab/";

/// Replacement prefix used when `--new-path` is not given.
pub const DEFAULT_NEW_PATH: &str = "/quobyte/jbsiegelgrp/";

/// Immutable settings for one migration run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The directory tree to rewrite.
    pub root: PathBuf,
    /// The literal text to search for. Never empty.
    pub old_path: String,
    /// The literal replacement text.
    pub new_path: String,
    /// If `true`, changes are reported but nothing is written.
    pub dry_run: bool,
}

impl RunConfig {
    /// Builds and validates a `RunConfig`.
    ///
    /// Fails with `Error::DirectoryNotFound` when `root` is missing or is not a
    /// directory, and with `Error::Config` when `old_path` is empty.
    pub fn new(
        root: impl Into<PathBuf>,
        old_path: impl Into<String>,
        new_path: impl Into<String>,
        dry_run: bool,
    ) -> Result<Self> {
        let root = root.into();
        let old_path = old_path.into();

        if !root.is_dir() {
            return Err(Error::DirectoryNotFound(root));
        }
        if old_path.is_empty() {
            return Err("Old path must not be empty".into());
        }

        Ok(Self {
            root,
            old_path,
            new_path: new_path.into(),
            dry_run,
        })
    }

    /// Builds a `RunConfig` from parsed command-line arguments.
    pub fn from_args(args: &Args) -> Result<Self> {
        Self::new(
            args.directory.clone(),
            args.old_path.clone(),
            args.new_path.clone(),
            args.dry_run,
        )
    }

    /// The root as an absolute path, for display.
    ///
    /// Falls back to the path as given if the current directory cannot be read.
    pub fn absolute_root(&self) -> PathBuf {
        absolute(&self.root)
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
