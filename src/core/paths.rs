//! core::paths
//!
//! Path helpers and the directory-tree locator.
//!
//! # Conventions
//!
//! Every path handed back to callers is absolute and uses forward slashes,
//! regardless of host platform. Internally paths are `PathBuf` until the
//! final normalization step.
//!
//! # Example
//!
//! ```
//! use tsproj::core::paths::{consistent_path, remove_trailing_slash};
//!
//! assert_eq!(consistent_path("C:\\work\\app.ts"), "C:/work/app.ts");
//! assert_eq!(remove_trailing_slash("/work/"), "/work");
//! ```

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::core::project::ProjectError;

/// Convert every backslash to a forward slash.
pub fn consistent_path(path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Strip a single trailing `/`, if any.
pub fn remove_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Whether a module specifier is relative (`.`, `./x`, `../x`).
pub fn path_is_relative(specifier: &str) -> bool {
    specifier.starts_with('.')
}

/// Resolve `rel` against `base` lexically.
///
/// Absolute `rel` replaces `base`. `.` components are dropped and `..` pops
/// the previous component. Symlinks are not followed and the result is not
/// required to exist.
pub fn resolve_path(base: &Path, rel: impl AsRef<Path>) -> PathBuf {
    let joined = base.join(rel);
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never pop past the root or a drive prefix.
                if matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Make an absolute path for `path`, resolving relative input against the
/// current working directory.
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(resolve_path(path, ""))
    } else {
        Ok(resolve_path(&std::env::current_dir()?, path))
    }
}

/// Express `path` relative to `folder`, slash-normalized and `./`-prefixed.
///
/// Both inputs are expected to be absolute.
pub fn make_relative_path(folder: &Path, path: &Path) -> String {
    let folder_buf = resolve_path(folder, "");
    let target_buf = resolve_path(path, "");
    let folder: Vec<_> = folder_buf.components().collect();
    let target: Vec<_> = target_buf.components().collect();

    let common = folder
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..folder.len() {
        rel.push("..");
    }
    for component in &target[common..] {
        rel.push(component.as_os_str());
    }

    let rel = consistent_path(rel);
    if rel.starts_with('.') {
        rel
    } else {
        format!("./{}", rel)
    }
}

/// The directory a path designates: itself for directories, else its parent.
pub fn containing_dir(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf())
    }
}

/// Walk upward from `start_dir` looking for `file_name`.
///
/// Returns the full path to the first match. Fails with
/// [`ProjectError::NoProjectFound`] once the filesystem root has been
/// checked without a match. A relative `start_dir` is taken from the
/// current working directory, so the cwd's ancestors are searched too.
pub fn find_ancestor_file(start_dir: &Path, file_name: &str) -> Result<PathBuf, ProjectError> {
    let not_found = || ProjectError::NoProjectFound {
        searched_from: start_dir.to_path_buf(),
    };
    let mut current = absolute(start_dir).map_err(|_| not_found())?;

    loop {
        let candidate = current.join(file_name);
        debug!(candidate = %candidate.display(), "checking for descriptor");
        if candidate.is_file() {
            return Ok(candidate);
        }

        // `pop` returns false at the root, whose parent is itself.
        if !current.pop() {
            return Err(not_found());
        }
    }
}
