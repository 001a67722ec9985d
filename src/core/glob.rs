//! core::glob
//!
//! Expansion of ordered `filesGlob` patterns into concrete files.
//!
//! # Semantics
//!
//! Patterns are applied in order against the files under a base directory:
//! - a plain pattern adds every matching regular file not yet selected
//! - a `!`-prefixed pattern removes every selected file it matches
//!
//! A leading `./` on a pattern is ignored. `*` does not cross `/`; use `**`
//! for any depth. Each plain pattern walks from its literal directory
//! prefix, which may lie outside the base (`../shared/**/*.ts`). Symlinks
//! are followed, and entries that cannot be read are skipped.
//!
//! Results are forward-slash paths relative to the base directory,
//! `./`-prefixed unless they start with `../`, ordered by pattern then by
//! sorted walk order.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tsproj::core::glob::{GlobExpander, WalkGlobExpander, DEFAULT_FILES_GLOB};
//!
//! let patterns: Vec<String> = DEFAULT_FILES_GLOB.iter().map(|s| s.to_string()).collect();
//! let files = WalkGlobExpander.expand(Path::new("/work/app"), &patterns).unwrap();
//! for file in files {
//!     println!("{}", file);
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::paths::{consistent_path, resolve_path};

/// Patterns used when a descriptor names neither `files` nor `filesGlob`.
pub const DEFAULT_FILES_GLOB: &[&str] = &["./**/*.ts", "!./node_modules/**/*.ts"];

/// Errors from glob expansion.
#[derive(Debug, Error)]
pub enum GlobError {
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to walk '{path}': {message}")]
    Walk { path: PathBuf, message: String },
}

/// Expands glob patterns relative to a base directory.
pub trait GlobExpander: Send + Sync {
    /// Return the files selected by `patterns`, relative to `base`.
    fn expand(&self, base: &Path, patterns: &[String]) -> Result<Vec<String>, GlobError>;
}

/// Filesystem-walking expander built on `globset` and `walkdir`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkGlobExpander;

struct CompiledPattern {
    negated: bool,
    /// Literal directory prefix the pattern can only match beneath.
    root: String,
    matcher: GlobMatcher,
}

fn is_glob_component(component: &str) -> bool {
    component.contains(|c| matches!(c, '*' | '?' | '[' | '{'))
}

/// Leading directory components of `pattern` that contain no glob syntax.
///
/// The final component always names files, so it is never part of the root.
fn literal_root(pattern: &str) -> String {
    let mut components: Vec<&str> = pattern.split('/').collect();
    components.pop();
    components
        .into_iter()
        .take_while(|c| !is_glob_component(c))
        .collect::<Vec<_>>()
        .join("/")
}

fn compile(pattern: &str) -> Result<CompiledPattern, GlobError> {
    let (negated, body) = match pattern.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };
    let body = body.strip_prefix("./").unwrap_or(body);

    let glob = GlobBuilder::new(body)
        .literal_separator(true)
        .build()
        .map_err(|e| GlobError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

    Ok(CompiledPattern {
        negated,
        root: literal_root(body),
        matcher: glob.compile_matcher(),
    })
}

/// Every regular file under `base/root`, as slash-normalized paths relative
/// to `base` (so `root` may climb out of `base` with `..`).
///
/// Symlinks are followed. A missing root yields nothing; entries that cannot
/// be read below the root are skipped.
fn walk_files(base: &Path, root: &str) -> Result<Vec<String>, GlobError> {
    let dir = resolve_path(base, root);
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "glob root does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&dir).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(GlobError::Walk {
                    path: dir.clone(),
                    message: e.to_string(),
                })
            }
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = consistent_path(entry.path().strip_prefix(&dir).unwrap_or(entry.path()));
        files.push(if root.is_empty() {
            rel
        } else {
            format!("{}/{}", root, rel)
        });
    }
    Ok(files)
}

impl GlobExpander for WalkGlobExpander {
    fn expand(&self, base: &Path, patterns: &[String]) -> Result<Vec<String>, GlobError> {
        let compiled = patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;

        let mut walks: HashMap<&str, Vec<String>> = HashMap::new();
        let mut selected: Vec<String> = Vec::new();

        for pattern in &compiled {
            if pattern.negated {
                selected.retain(|file| !pattern.matcher.is_match(file));
                continue;
            }

            if !walks.contains_key(pattern.root.as_str()) {
                let files = walk_files(base, &pattern.root)?;
                debug!(
                    base = %base.display(),
                    root = %pattern.root,
                    candidates = files.len(),
                    "walked glob root"
                );
                walks.insert(pattern.root.as_str(), files);
            }
            for file in &walks[pattern.root.as_str()] {
                if pattern.matcher.is_match(file) && !selected.contains(file) {
                    selected.push(file.clone());
                }
            }
        }

        Ok(selected
            .into_iter()
            .map(|f| {
                if f.starts_with("../") {
                    f
                } else {
                    format!("./{}", f)
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn patterns(p: &[&str]) -> Vec<String> {
        p.iter().map(|s| s.to_string()).collect()
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn default_glob_excludes_node_modules() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "app.ts");
        touch(temp.path(), "src/lib.ts");
        touch(temp.path(), "src/readme.md");
        touch(temp.path(), "node_modules/dep/index.ts");

        let files = WalkGlobExpander
            .expand(temp.path(), &patterns(DEFAULT_FILES_GLOB))
            .unwrap();

        assert_eq!(files, vec!["./app.ts", "./src/lib.ts"]);
    }

    #[test]
    fn star_does_not_cross_directories() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "top.ts");
        touch(temp.path(), "nested/inner.ts");

        let files = WalkGlobExpander
            .expand(temp.path(), &patterns(&["*.ts"]))
            .unwrap();

        assert_eq!(files, vec!["./top.ts"]);
    }

    #[test]
    fn later_positive_pattern_readds() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.ts");
        touch(temp.path(), "b.ts");

        let files = WalkGlobExpander
            .expand(temp.path(), &patterns(&["*.ts", "!a.ts", "a.ts"]))
            .unwrap();

        assert_eq!(files, vec!["./b.ts", "./a.ts"]);
    }

    #[test]
    fn no_duplicates_across_patterns() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.ts");

        let files = WalkGlobExpander
            .expand(temp.path(), &patterns(&["*.ts", "**/*.ts"]))
            .unwrap();

        assert_eq!(files, vec!["./a.ts"]);
    }

    #[test]
    fn literal_root_stops_at_glob_component() {
        assert_eq!(literal_root("**/*.ts"), "");
        assert_eq!(literal_root("a.ts"), "");
        assert_eq!(literal_root("src/*.ts"), "src");
        assert_eq!(literal_root("../shared/**/x/*.ts"), "../shared");
        assert_eq!(literal_root("lib/{a,b}/c.ts"), "lib");
    }

    #[test]
    fn pattern_outside_base() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "proj/app.ts");
        touch(temp.path(), "shared/util.ts");
        touch(temp.path(), "shared/deep/more.ts");
        let proj = temp.path().join("proj");

        let files = WalkGlobExpander
            .expand(&proj, &patterns(&["./*.ts", "../shared/*.ts"]))
            .unwrap();
        assert_eq!(files, vec!["./app.ts", "../shared/util.ts"]);

        let files = WalkGlobExpander
            .expand(&proj, &patterns(&["../shared/**/*.ts", "!../shared/deep/*.ts"]))
            .unwrap();
        assert_eq!(files, vec!["../shared/util.ts"]);
    }

    #[test]
    fn missing_literal_root_matches_nothing() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.ts");

        let files = WalkGlobExpander
            .expand(temp.path(), &patterns(&["gone/**/*.ts", "*.ts"]))
            .unwrap();
        assert_eq!(files, vec!["./a.ts"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_included() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "proj/app.ts");
        touch(temp.path(), "elsewhere/shared.ts");
        std::os::unix::fs::symlink(
            temp.path().join("elsewhere/shared.ts"),
            temp.path().join("proj/shared.ts"),
        )
        .unwrap();

        let files = WalkGlobExpander
            .expand(&temp.path().join("proj"), &patterns(&["**/*.ts"]))
            .unwrap();
        assert_eq!(files, vec!["./app.ts", "./shared.ts"]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_entries_skipped() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "app.ts");
        fs::create_dir_all(temp.path().join("node_modules/dep")).unwrap();
        std::os::unix::fs::symlink(
            temp.path().join("missing.ts"),
            temp.path().join("node_modules/dep/broken.ts"),
        )
        .unwrap();
        std::os::unix::fs::symlink(temp.path(), temp.path().join("node_modules/loop")).unwrap();

        let files = WalkGlobExpander
            .expand(temp.path(), &patterns(DEFAULT_FILES_GLOB))
            .unwrap();
        assert_eq!(files, vec!["./app.ts"]);
    }

    #[test]
    fn invalid_pattern_reported() {
        let temp = TempDir::new().unwrap();
        let err = WalkGlobExpander
            .expand(temp.path(), &patterns(&["src/[.ts"]))
            .unwrap_err();
        assert!(matches!(err, GlobError::InvalidPattern { .. }));
    }
}
