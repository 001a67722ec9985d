//! core::closure
//!
//! Transitive file-set construction.
//!
//! # Algorithm
//!
//! Starting from the seed files, each file is read once, its references and
//! imports are extracted and resolved relative to the file's directory, and
//! every newly found file is appended to the result and queued for its own
//! scan. The loop ends when the queue is empty, which is the same fixed point
//! a full re-scan would reach because extraction depends only on file
//! content.
//!
//! # Resolution
//!
//! - references try `p`, `p.ts`, `p.d.ts`
//! - imports are followed only when relative, trying `p.ts`, `p.d.ts`
//! - candidates that do not exist as files are dropped
//!
//! Files that cannot be read (missing, removed mid-scan, not UTF-8)
//! contribute nothing. They are never an error.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::extract::ReferenceExtractor;
use crate::core::paths::{path_is_relative, resolve_path};

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

fn resolve_reference(dir: &Path, specifier: &str) -> Option<PathBuf> {
    let base = resolve_path(dir, specifier);
    [base.clone(), with_suffix(&base, ".ts"), with_suffix(&base, ".d.ts")]
        .into_iter()
        .find(|candidate| candidate.is_file())
}

fn resolve_import(dir: &Path, specifier: &str) -> Option<PathBuf> {
    if !path_is_relative(specifier) {
        return None;
    }
    let base = resolve_path(dir, specifier);
    [with_suffix(&base, ".ts"), with_suffix(&base, ".d.ts")]
        .into_iter()
        .find(|candidate| candidate.is_file())
}

/// The files `file` references or imports, resolved to existing paths.
///
/// Returns an empty list when `file` cannot be read.
pub fn direct_dependencies(file: &Path, extractor: &dyn ReferenceExtractor) -> Vec<PathBuf> {
    let text = match fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            debug!(file = %file.display(), error = %e, "skipping unreadable file");
            return Vec::new();
        }
    };

    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let info = extractor.extract(&text);

    info.referenced_files
        .iter()
        .filter_map(|r| resolve_reference(dir, r))
        .chain(
            info.imported_files
                .iter()
                .filter_map(|i| resolve_import(dir, i)),
        )
        .collect()
}

/// Grow `seed` until it contains every file reachable through references
/// and relative imports.
///
/// The seed files keep their order and come first; discovered files follow
/// in discovery order. Seeds are assumed to be absolute.
pub fn close_over_references(
    seed: Vec<PathBuf>,
    extractor: &dyn ReferenceExtractor,
) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = seed.iter().cloned().collect();
    let mut queue: VecDeque<PathBuf> = seed.iter().cloned().collect();
    let mut files = seed;

    while let Some(file) = queue.pop_front() {
        for dep in direct_dependencies(&file, extractor) {
            if seen.insert(dep.clone()) {
                debug!(from = %file.display(), found = %dep.display(), "discovered file");
                files.push(dep.clone());
                queue.push_back(dep);
            }
        }
    }

    debug!(files = files.len(), "reference closure complete");
    files
}
