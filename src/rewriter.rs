use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single line affected by a replacement, as shown in a dry-run preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChange {
    /// The 1-based line number.
    #[serde(rename = "line")]
    pub line_number: usize,
    /// The original line, trimmed for display.
    pub before: String,
    /// The line after replacement, trimmed for display.
    pub after: String,
}

/// The result of processing a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The file was rewritten with the new content.
    Modified { path: PathBuf, replacements: usize },
    /// Dry run: the file contains the old path and would be rewritten.
    WouldModify {
        path: PathBuf,
        replacements: usize,
        lines: Vec<LineChange>,
    },
    /// The old path does not occur in the file.
    NotModified,
    /// The file was classified as binary and never opened for rewriting.
    Skipped,
    /// Reading, decoding or writing the file failed.
    Errored { path: PathBuf, message: String },
}

impl RewriteOutcome {
    /// `true` if the file was (or in a dry run, would be) modified.
    pub fn is_modified(&self) -> bool {
        matches!(
            self,
            RewriteOutcome::Modified { .. } | RewriteOutcome::WouldModify { .. }
        )
    }
}

/// Replaces every occurrence of `old` with `new` in the file at `path`.
///
/// The whole file is read as UTF-8. If `old` is absent nothing happens. In a dry
/// run the affected lines are collected for preview; otherwise the file is
/// truncated and rewritten with the new content. The write is not atomic.
///
/// Failures are never propagated: they come back as `RewriteOutcome::Errored`
/// carrying the underlying description.
pub fn process(path: &Path, old: &str, new: &str, dry_run: bool) -> RewriteOutcome {
    match try_process(path, old, new, dry_run) {
        Ok(outcome) => outcome,
        Err(e) => RewriteOutcome::Errored {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    }
}

fn try_process(path: &Path, old: &str, new: &str, dry_run: bool) -> io::Result<RewriteOutcome> {
    let content = fs::read_to_string(path)?;

    let replacements = content.matches(old).count();
    if replacements == 0 {
        return Ok(RewriteOutcome::NotModified);
    }

    if dry_run {
        return Ok(RewriteOutcome::WouldModify {
            path: path.to_path_buf(),
            replacements,
            lines: preview_lines(&content, old, new),
        });
    }

    let new_content = content.replace(old, new);
    fs::write(path, new_content)?;

    Ok(RewriteOutcome::Modified {
        path: path.to_path_buf(),
        replacements,
    })
}

/// Lists every line of `content` containing `old`, before and after replacement.
///
/// Lines are split on `'\n'` only, so a `'\r'` left by CRLF endings is removed by
/// the display trim rather than by the split.
pub fn preview_lines(content: &str, old: &str, new: &str) -> Vec<LineChange> {
    content
        .split('\n')
        .enumerate()
        .filter(|(_, line)| line.contains(old))
        .map(|(idx, line)| LineChange {
            line_number: idx + 1,
            before: line.trim().to_string(),
            after: line.replace(old, new).trim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const OLD: &str = "/share/siegellab/";
    const NEW: &str = "/quobyte/jbsiegelgrp/";

    #[test]
    fn test_absent_old_path_is_not_modified() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "nothing to see\n").unwrap();

        assert_eq!(process(&file, OLD, NEW, false), RewriteOutcome::NotModified);
        assert_eq!(fs::read_to_string(&file).unwrap(), "nothing to see\n");
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("paths.conf");
        fs::write(
            &file,
            "a=/share/siegellab/x\nb=/share/siegellab/y /share/siegellab/z\nc=/other/\n",
        )
        .unwrap();

        let outcome = process(&file, OLD, NEW, false);
        assert_eq!(
            outcome,
            RewriteOutcome::Modified {
                path: file.clone(),
                replacements: 3
            }
        );
        assert!(outcome.is_modified());

        let written = fs::read_to_string(&file).unwrap();
        assert_eq!(
            written,
            "a=/quobyte/jbsiegelgrp/x\nb=/quobyte/jbsiegelgrp/y /quobyte/jbsiegelgrp/z\nc=/other/\n"
        );
        assert_eq!(written.matches(OLD).count(), 0);
        assert_eq!(written.matches(NEW).count(), 3);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("upper.txt");
        fs::write(&file, "/SHARE/SIEGELLAB/data\n").unwrap();
        assert_eq!(process(&file, OLD, NEW, false), RewriteOutcome::NotModified);
    }

    #[test]
    fn test_non_overlapping_leftmost_first() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("aaa.txt");
        fs::write(&file, "aaa").unwrap();

        let outcome = process(&file, "aa", "b", false);
        assert!(matches!(outcome, RewriteOutcome::Modified { replacements: 1, .. }));
        assert_eq!(fs::read_to_string(&file).unwrap(), "ba");
    }

    #[test]
    fn test_dry_run_previews_without_writing() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        let content = "header\n   path is /share/siegellab/data  \nfooter\n";
        fs::write(&file, content).unwrap();
        let before = fs::metadata(&file).unwrap().modified().unwrap();

        let outcome = process(&file, OLD, NEW, true);
        match &outcome {
            RewriteOutcome::WouldModify {
                path,
                replacements,
                lines,
            } => {
                assert_eq!(path, &file);
                assert_eq!(*replacements, 1);
                assert_eq!(
                    lines,
                    &vec![LineChange {
                        line_number: 2,
                        before: "path is /share/siegellab/data".to_string(),
                        after: "path is /quobyte/jbsiegelgrp/data".to_string(),
                    }]
                );
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(outcome.is_modified());
        assert_eq!(fs::read_to_string(&file).unwrap(), content);
        assert_eq!(fs::metadata(&file).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_preview_reports_each_matching_line() {
        let content = "/share/siegellab/a\nskip\r\n\t/share/siegellab/b\r\n";
        let lines = preview_lines(content, OLD, NEW);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 1);
        assert_eq!(lines[1].line_number, 3);
        assert_eq!(lines[1].before, "/share/siegellab/b");
        assert_eq!(lines[1].after, "/quobyte/jbsiegelgrp/b");
    }

    #[test]
    fn test_invalid_utf8_is_errored() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("broken.txt");
        fs::write(&file, b"/share/siegellab/\xff\xfe").unwrap();

        match process(&file, OLD, NEW, false) {
            RewriteOutcome::Errored { path, message } => {
                assert_eq!(path, file);
                assert_eq!(message, "stream did not contain valid UTF-8");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(fs::read(&file).unwrap(), b"/share/siegellab/\xff\xfe");
    }

    #[test]
    fn test_missing_file_is_errored() {
        let dir = TempDir::new().unwrap();
        let outcome = process(&dir.path().join("vanished.txt"), OLD, NEW, false);
        assert!(matches!(outcome, RewriteOutcome::Errored { .. }));
        assert!(!outcome.is_modified());
    }

    #[test]
    fn test_second_pass_finds_nothing() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("twice.txt");
        fs::write(&file, "/share/siegellab/\n").unwrap();

        assert!(process(&file, OLD, NEW, false).is_modified());
        assert_eq!(process(&file, OLD, NEW, false), RewriteOutcome::NotModified);
    }
}
