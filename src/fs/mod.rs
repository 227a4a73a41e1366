//! Workspace filesystem helpers
//!
//! The ignore filter delegates to `git check-ignore` so the index
//! always agrees with the repository's own ignore rules, and prunes
//! `.git` itself. Only files whose extension is in the language
//! registry participate in walking and watching.

pub mod watcher;

pub use watcher::WorkspaceWatcher;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use tokio_util::sync::CancellationToken;
use walkdir::WalkDir;

use crate::error::{Result, SourcererError};

/// Decides whether a path participates in walking and watching
pub struct FileFilter {
    workspace_root: PathBuf,
    supported_exts: HashSet<String>,
}

impl FileFilter {
    /// `supported_exts` are lowercased extensions without the dot
    pub fn new(workspace_root: impl AsRef<Path>, supported_exts: &[&str]) -> Self {
        Self {
            workspace_root: workspace_root.as_ref().to_path_buf(),
            supported_exts: supported_exts.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// True when the path should not be indexed or watched: the
    /// basename is `.git`, git ignores it, or its extension is not
    /// supported.
    pub fn should_ignore(&self, path: &Path) -> bool {
        if self.is_ignored_dir(path) {
            return true;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        !self.supported_exts.contains(&ext)
    }

    /// Directory-level check: `.git` basename or git-ignored. Used to
    /// prune traversal without consulting the extension set.
    pub fn is_ignored_dir(&self, path: &Path) -> bool {
        if path.file_name().is_some_and(|name| name == ".git") {
            return true;
        }

        self.git_ignored(path)
    }

    fn git_ignored(&self, path: &Path) -> bool {
        Command::new("git")
            .arg("check-ignore")
            .arg(path)
            .current_dir(&self.workspace_root)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

/// Walk the workspace, invoking `callback` with the workspace-relative
/// forward-slashed path of every supported, non-ignored file.
///
/// Ignored directories are pruned from traversal. Cancellation is
/// checked between entries.
pub fn walk_source_files(
    workspace_root: impl AsRef<Path>,
    supported_exts: &[&str],
    cancel: &CancellationToken,
    mut callback: impl FnMut(&str),
) -> Result<()> {
    let workspace_root = workspace_root.as_ref();
    let filter = FileFilter::new(workspace_root, supported_exts);

    let walker = WalkDir::new(workspace_root).into_iter().filter_entry(|entry| {
        if entry.file_type().is_dir() {
            !filter.is_ignored_dir(entry.path())
        } else {
            true
        }
    });

    for entry in walker {
        if cancel.is_cancelled() {
            return Err(SourcererError::Cancelled);
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        if filter.should_ignore(entry.path()) {
            continue;
        }

        let rel = relative_path(workspace_root, entry.path());
        callback(&rel);
    }

    Ok(())
}

/// Workspace-relative, forward-slashed rendering of `path`
pub fn relative_path(workspace_root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(workspace_root).unwrap_or(path);
    let rendered = rel.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        rendered.into_owned()
    } else {
        rendered.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
