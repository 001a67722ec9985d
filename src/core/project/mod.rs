//! core::project
//!
//! Project resolution: the entry points that turn a path into a fully
//! resolved project.
//!
//! # Entry points
//!
//! - [`Resolver::get_project`] - find the nearest `tsconfig.json` above a
//!   path and resolve it
//! - [`Resolver::create_project`] - write a new `tsconfig.json` next to a
//!   path, then resolve it
//! - [`Resolver::get_default_project`] - resolve a single file without any
//!   descriptor
//!
//! # Resolution steps
//!
//! 1. Locate the descriptor by walking up the directory tree
//! 2. Read and parse it
//! 3. Expand `filesGlob` (defaulted when neither `files` nor `filesGlob` is
//!    given) into `files`, rewriting the descriptor if its canonical text
//!    changed
//! 4. Validate `compilerOptions` and reject `out`
//! 5. Convert options to internal form
//! 6. Close the file list over references and relative imports
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tsproj::core::project::get_project;
//!
//! let location = get_project(Path::new("src/app.ts")).unwrap();
//! println!("project file: {}", location.project_file_path);
//! for file in &location.project.files {
//!     println!("  {}", file);
//! }
//! ```

mod errors;

pub use errors::{ErrorKind, ProjectError};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::core::closure::close_over_references;
use crate::core::descriptor::{self, RawDescriptor, DESCRIPTOR_VERSION, PROJECT_FILE_NAME};
use crate::core::extract::{PreProcessor, ReferenceExtractor};
use crate::core::format::FormatCodeOptions;
use crate::core::glob::{GlobExpander, WalkGlobExpander, DEFAULT_FILES_GLOB};
use crate::core::options::{
    default_compiler_options, internal_to_persisted, raw_to_internal, validate_compiler_options,
    CompilerOptions,
};
use crate::core::paths::{
    absolute, consistent_path, containing_dir, find_ancestor_file, remove_trailing_slash,
    resolve_path,
};

/// Message used when a descriptor sets `compilerOptions.out`.
const OUT_UNSUPPORTED: &str = "We don't support --out because it will hurt you in the long run.";

/// A resolved project.
///
/// # Invariants
///
/// - `files` has no duplicates
/// - every entry in `files` is absolute and uses forward slashes
/// - `compiler_options` is in internal form (enum codes, absolute paths)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProject {
    pub compiler_options: CompilerOptions,
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_glob: Option<Vec<String>>,
    pub format_code_options: FormatCodeOptions,
    pub compile_on_save: bool,
}

/// A resolved project together with where its descriptor lives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLocation {
    /// Absolute, slash-normalized, no trailing slash.
    pub project_file_directory: String,
    /// `project_file_directory` joined with `tsconfig.json`.
    pub project_file_path: String,
    pub project: NormalizedProject,
}

impl ProjectLocation {
    fn new(dir: &Path, project: NormalizedProject) -> Self {
        let project_file_directory = remove_trailing_slash(&consistent_path(dir)).to_string();
        let project_file_path = format!("{}/{}", project_file_directory, PROJECT_FILE_NAME);
        Self {
            project_file_directory,
            project_file_path,
            project,
        }
    }
}

/// Resolves and creates projects.
///
/// Holds the glob expander and reference extractor used for every call.
/// No other state is kept between calls.
pub struct Resolver {
    globber: Box<dyn GlobExpander>,
    extractor: Box<dyn ReferenceExtractor>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Box::new(WalkGlobExpander), Box::new(PreProcessor))
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

fn existing_absolute(path: &Path) -> Option<PathBuf> {
    absolute(path).ok().filter(|p| p.exists())
}

/// Slash-normalize and drop duplicates, keeping first occurrences.
fn normalize_files(files: Vec<PathBuf>) -> Vec<String> {
    let mut seen = HashSet::new();
    files
        .into_iter()
        .map(|f| consistent_path(&f))
        .filter(|f| seen.insert(f.clone()))
        .collect()
}

impl Resolver {
    /// Create a resolver from custom collaborators.
    pub fn new(globber: Box<dyn GlobExpander>, extractor: Box<dyn ReferenceExtractor>) -> Self {
        Self { globber, extractor }
    }

    /// Resolve the project that owns `path_or_file`.
    ///
    /// `path_or_file` may be a source file or a directory; the search for
    /// `tsconfig.json` starts at the directory it designates.
    ///
    /// # Errors
    ///
    /// - [`ProjectError::InvalidPath`] if the path does not exist
    /// - [`ProjectError::NoProjectFound`] if no descriptor is found upward
    /// - [`ProjectError::FailedToOpenProjectFile`] if it cannot be read
    /// - [`ProjectError::JsonParseFailed`] if it is not a valid descriptor
    /// - [`ProjectError::GlobExpandFailed`] if `filesGlob` cannot be expanded
    /// - [`ProjectError::WriteFailed`] if the descriptor rewrite fails
    /// - [`ProjectError::InvalidOptions`] if options are invalid or `out` is set
    pub fn get_project(&self, path_or_file: &Path) -> Result<ProjectLocation, ProjectError> {
        let path = existing_absolute(path_or_file).ok_or_else(|| ProjectError::InvalidPath {
            path: path_or_file.to_path_buf(),
        })?;

        let project_file = find_ancestor_file(&containing_dir(&path), PROJECT_FILE_NAME)?;
        let project_dir = containing_dir(&project_file);
        debug!(project_file = %project_file.display(), "found project file");

        let (text, mut raw) = descriptor::read(&project_file)?;

        if raw.files.is_none() && raw.files_glob.is_none() {
            raw.files_glob = Some(DEFAULT_FILES_GLOB.iter().map(|s| s.to_string()).collect());
        }

        if let Some(glob) = &raw.files_glob {
            let files = self.globber.expand(&project_dir, glob).map_err(|e| {
                ProjectError::GlobExpandFailed {
                    path: project_file.clone(),
                    glob: glob.clone(),
                    source: e,
                }
            })?;
            raw.files = Some(files);
            descriptor::write_if_changed(&project_file, &raw, &text)?;
        }

        let files: Vec<PathBuf> = raw
            .files
            .iter()
            .flatten()
            .map(|f| resolve_path(&project_dir, f))
            .collect();

        validate_compiler_options(&raw.compiler_options).map_err(|message| {
            ProjectError::InvalidOptions {
                path: project_file.clone(),
                message,
            }
        })?;
        if raw.compiler_options.contains_key("out") {
            return Err(ProjectError::InvalidOptions {
                path: project_file,
                message: OUT_UNSUPPORTED.to_string(),
            });
        }

        let project = NormalizedProject {
            compiler_options: raw_to_internal(&raw.compiler_options, &project_dir),
            files: normalize_files(close_over_references(files, self.extractor.as_ref())),
            files_glob: raw.files_glob,
            format_code_options: FormatCodeOptions::from_raw(raw.format_code_options.as_ref()),
            compile_on_save: raw.compile_on_save.unwrap_or(true),
        };

        Ok(ProjectLocation::new(&project_dir, project))
    }

    /// Create a `tsconfig.json` in the directory designated by `src`, then
    /// resolve it.
    ///
    /// `default_options` are internal-form options; the built-in defaults
    /// are used when `None`.
    ///
    /// # Errors
    ///
    /// - [`ProjectError::CreateFileMustExist`] if `src` does not exist
    /// - [`ProjectError::ProjectAlreadyExists`] if a descriptor is already there
    /// - [`ProjectError::WriteFailed`] if the descriptor cannot be written
    /// - any error from [`Resolver::get_project`]
    pub fn create_project(
        &self,
        src: &Path,
        default_options: Option<&CompilerOptions>,
    ) -> Result<ProjectLocation, ProjectError> {
        let src = existing_absolute(src).ok_or_else(|| ProjectError::CreateFileMustExist {
            path: src.to_path_buf(),
        })?;

        let project_file = containing_dir(&src).join(PROJECT_FILE_NAME);
        if project_file.exists() {
            return Err(ProjectError::ProjectAlreadyExists { path: project_file });
        }

        let raw = RawDescriptor {
            version: Some(DESCRIPTOR_VERSION.to_string()),
            compiler_options: internal_to_persisted(
                default_options.unwrap_or(default_compiler_options()),
            ),
            files_glob: Some(DEFAULT_FILES_GLOB.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        };
        descriptor::write(&project_file, &raw)?;
        info!(project_file = %project_file.display(), "created project");

        self.get_project(&src)
    }

    /// Resolve `src_file` as a project of its own, without a descriptor.
    ///
    /// Uses the default compiler options and the reference closure of the
    /// single file. Nothing is written.
    ///
    /// # Errors
    ///
    /// [`ProjectError::InvalidPath`] if `src_file` does not exist.
    pub fn get_default_project(&self, src_file: &Path) -> Result<ProjectLocation, ProjectError> {
        let src = existing_absolute(src_file).ok_or_else(|| ProjectError::InvalidPath {
            path: src_file.to_path_buf(),
        })?;
        let dir = containing_dir(&src);

        let project = NormalizedProject {
            compiler_options: default_compiler_options().clone(),
            files: normalize_files(close_over_references(vec![src], self.extractor.as_ref())),
            files_glob: None,
            format_code_options: FormatCodeOptions::default(),
            compile_on_save: true,
        };

        Ok(ProjectLocation::new(&dir, project))
    }
}

/// [`Resolver::get_project`] with the built-in collaborators.
pub fn get_project(path_or_file: &Path) -> Result<ProjectLocation, ProjectError> {
    Resolver::default().get_project(path_or_file)
}

/// [`Resolver::create_project`] with the built-in collaborators.
pub fn create_project(
    src: &Path,
    default_options: Option<&CompilerOptions>,
) -> Result<ProjectLocation, ProjectError> {
    Resolver::default().create_project(src, default_options)
}

/// [`Resolver::get_default_project`] with the built-in collaborators.
pub fn get_default_project(src_file: &Path) -> Result<ProjectLocation, ProjectError> {
    Resolver::default().get_default_project(src_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::FileReferences;
    use crate::core::glob::GlobError;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, text: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    struct FixedGlob(Vec<String>);

    impl GlobExpander for FixedGlob {
        fn expand(&self, _base: &Path, _patterns: &[String]) -> Result<Vec<String>, GlobError> {
            Ok(self.0.clone())
        }
    }

    struct FailingGlob;

    impl GlobExpander for FailingGlob {
        fn expand(&self, _base: &Path, patterns: &[String]) -> Result<Vec<String>, GlobError> {
            Err(GlobError::InvalidPattern {
                pattern: patterns[0].clone(),
                message: "boom".into(),
            })
        }
    }

    struct NoRefs;

    impl ReferenceExtractor for NoRefs {
        fn extract(&self, _text: &str) -> FileReferences {
            FileReferences::default()
        }
    }

    #[test]
    fn explicit_files_are_not_rewritten() {
        let temp = TempDir::new().unwrap();
        let text = r#"{"files": ["a.ts"]}"#;
        write(temp.path(), "tsconfig.json", text);
        write(temp.path(), "a.ts", "");

        let location = get_project(temp.path()).unwrap();
        assert_eq!(
            location.project.files,
            vec![consistent_path(temp.path().join("a.ts"))]
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("tsconfig.json")).unwrap(),
            text
        );
    }

    #[test]
    fn location_paths_are_normalized() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "tsconfig.json", r#"{"files": []}"#);
        let nested = write(temp.path(), "src/deep/x.ts", "");

        let location = get_project(&nested).unwrap();
        let dir = consistent_path(temp.path());
        assert_eq!(location.project_file_directory, dir);
        assert_eq!(location.project_file_path, format!("{}/tsconfig.json", dir));
        assert!(!location.project_file_directory.ends_with('/'));
    }

    #[test]
    fn custom_glob_expander_is_used() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "tsconfig.json", r#"{"filesGlob": ["whatever"]}"#);

        let resolver = Resolver::new(
            Box::new(FixedGlob(vec!["./chosen.ts".into()])),
            Box::new(NoRefs),
        );
        let location = resolver.get_project(temp.path()).unwrap();
        assert_eq!(
            location.project.files,
            vec![consistent_path(temp.path().join("chosen.ts"))]
        );

        let (_, raw) = descriptor::read(&temp.path().join("tsconfig.json")).unwrap();
        assert_eq!(raw.files, Some(vec!["./chosen.ts".to_string()]));
    }

    #[test]
    fn glob_failure_carries_patterns() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "tsconfig.json", r#"{"filesGlob": ["bad["]}"#);

        let resolver = Resolver::new(Box::new(FailingGlob), Box::new(NoRefs));
        let err = resolver.get_project(temp.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GlobFailure);
        assert_eq!(err.details()["glob"], json!(["bad["]));
    }

    #[test]
    fn out_rejected() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "tsconfig.json",
            r#"{"files": [], "compilerOptions": {"out": "bundle.js"}}"#,
        );

        let err = get_project(temp.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert!(err.to_string().contains("--out"));
    }

    #[test]
    fn out_with_wrong_type_rejected() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "tsconfig.json",
            r#"{"files": [], "compilerOptions": {"out": 3}}"#,
        );

        let err = get_project(temp.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    #[test]
    fn compile_on_save_and_format_options() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "tsconfig.json",
            r#"{"files": [], "compileOnSave": false, "formatCodeOptions": {"indentSize": 2}}"#,
        );

        let project = get_project(temp.path()).unwrap().project;
        assert!(!project.compile_on_save);
        assert_eq!(project.format_code_options.indent_size, 2);
        assert!(project.files_glob.is_none());
    }

    #[test]
    fn default_project_for_file() {
        let temp = TempDir::new().unwrap();
        let a = write(temp.path(), "a.ts", "import b from \"./b\";\n");
        write(temp.path(), "b.ts", "");

        let location = get_default_project(&a).unwrap();
        assert_eq!(
            location.project.files,
            vec![
                consistent_path(temp.path().join("a.ts")),
                consistent_path(temp.path().join("b.ts")),
            ]
        );
        assert_eq!(location.project_file_directory, consistent_path(temp.path()));
        assert_eq!(&location.project.compiler_options, default_compiler_options());
        assert!(!temp.path().join("tsconfig.json").exists());
    }

    #[test]
    fn default_project_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = get_default_project(&temp.path().join("nope.ts")).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidPath { .. }));
    }

    #[test]
    fn create_with_custom_options() {
        let temp = TempDir::new().unwrap();
        let src = write(temp.path(), "main.ts", "");

        let mut options = default_compiler_options().clone();
        options.insert("module".into(), json!(2));
        options.insert("declaration".into(), json!(true));

        let location = create_project(&src, Some(&options)).unwrap();
        assert_eq!(location.project.compiler_options["module"], json!(2));
        assert_eq!(location.project.compiler_options["declaration"], json!(true));

        let (_, raw) = descriptor::read(&temp.path().join("tsconfig.json")).unwrap();
        assert_eq!(raw.compiler_options["module"], json!("amd"));
        assert_eq!(raw.version.as_deref(), Some(DESCRIPTOR_VERSION));
    }
}
