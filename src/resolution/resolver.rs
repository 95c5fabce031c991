use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Extensions probed when resolving a relative import, in priority order.
pub const RESOLVE_EXTENSIONS: [&str; 4] = [".ts", ".tsx", ".js", ".jsx"];

/// File stem probed inside a directory once direct-file probing fails.
pub const INDEX_STEM: &str = "index";

/// Returns `true` if the specifier refers to a project-local file.
///
/// Anything not starting with `.` is treated as a package import.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with('.')
}

/// Maps a relative import specifier to an existing file.
///
/// Probing happens in two phases. First each extension in
/// [`RESOLVE_EXTENSIONS`] is appended directly to the target path; only if
/// none of those is a file is `index` plus each extension probed inside the
/// target treated as a directory. The first existing candidate wins.
///
/// Returns `None` for package imports and for specifiers with no candidate
/// on disk.
pub fn resolve_import(from_file: &Path, specifier: &str) -> Option<PathBuf> {
    if !is_relative_specifier(specifier) {
        return None;
    }

    let from_dir = from_file.parent().unwrap_or_else(|| Path::new(""));
    let base = absolutize(&from_dir.join(specifier));

    candidate_paths(&base).into_iter().find(|p| p.is_file())
}

/// Returns the ordered probe list for an already computed target path.
pub fn candidate_paths(base: &Path) -> Vec<PathBuf> {
    let direct = RESOLVE_EXTENSIONS.iter().map(|ext| with_suffix(base, ext));
    let index = RESOLVE_EXTENSIONS
        .iter()
        .map(|ext| base.join(format!("{INDEX_STEM}{ext}")));
    direct.chain(index).collect()
}

/// Makes a path absolute against the current directory and collapses `.`
/// and `..` components lexically.
///
/// Two specifiers naming the same file produce the same identity.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize_path(&cwd.join(path)),
        Err(_) => normalize_path(path),
    }
}

/// Collapses `.` and `..` components without touching the file system.
///
/// `..` above the root is dropped, as path resolution does on POSIX.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Appends a literal suffix to the final component (`foo` -> `foo.ts`).
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = base.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order() {
        let candidates = candidate_paths(Path::new("/p/src/utils"));
        let expected: Vec<PathBuf> = [
            "/p/src/utils.ts",
            "/p/src/utils.tsx",
            "/p/src/utils.js",
            "/p/src/utils.jsx",
            "/p/src/utils/index.ts",
            "/p/src/utils/index.tsx",
            "/p/src/utils/index.js",
            "/p/src/utils/index.jsx",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();
        assert_eq!(candidates, expected);
    }

    #[test]
    fn test_suffix_is_appended_not_replaced() {
        let candidates = candidate_paths(Path::new("/p/Button.jsx"));
        assert_eq!(candidates[0], PathBuf::from("/p/Button.jsx.ts"));
    }

    #[test]
    fn test_normalize_collapses_dots() {
        assert_eq!(
            normalize_path(Path::new("/p/src/./components/../utils")),
            PathBuf::from("/p/src/utils")
        );
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_path(Path::new("../a/./b")), PathBuf::from("../a/b"));
    }

    #[test]
    fn test_relative_marker() {
        assert!(is_relative_specifier("./a"));
        assert!(is_relative_specifier("../a"));
        assert!(is_relative_specifier("."));
        assert!(!is_relative_specifier("react"));
        assert!(!is_relative_specifier("@/components/Button"));
        assert!(!is_relative_specifier("/abs/path"));
    }
}
