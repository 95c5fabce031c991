//! Changed-file discovery through the `git` command line.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::{should_include_file, BundleConfig};
use crate::errors::{BundleError, Result};

/// Returns the top-level directory of the repository containing `dir`.
pub fn repo_root(dir: &Path) -> Result<PathBuf> {
    let output = run_git(dir, &["rev-parse", "--show-toplevel"])?;
    let root = output.trim();
    if root.is_empty() {
        return Err(BundleError::Git {
            message: format!("no repository found at '{}'", dir.display()),
        });
    }
    Ok(PathBuf::from(root))
}

/// Returns the raw `git diff --name-only` output for the working tree.
pub fn changed_files(repo_root: &Path) -> Result<String> {
    run_git(repo_root, &["diff", "--name-only"])
}

/// Picks bundling candidates out of `git diff --name-only` output.
///
/// Each non-empty line is a repository-relative path; it is kept when the
/// configuration includes it and mapped to an absolute path under
/// `repo_root`. Order follows the diff output.
pub fn select_changed_sources(
    diff_output: &str,
    repo_root: &Path,
    config: &BundleConfig,
) -> Vec<PathBuf> {
    diff_output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| should_include_file(line, config))
        .map(|line| repo_root.join(line))
        .collect()
}

fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| BundleError::Git {
            message: format!("failed to run git {}: {}", args.join(" "), e),
        })?;

    if !output.status.success() {
        return Err(BundleError::Git {
            message: format!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
