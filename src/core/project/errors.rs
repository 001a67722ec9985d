//! core::project::errors
//!
//! Error types for project resolution and creation.
//!
//! # Design
//!
//! Every failure carries a stable identifier ([`ProjectError::code`]), a
//! coarse category ([`ProjectError::kind`]) and structured details
//! ([`ProjectError::details`]) so callers can branch on the failure without
//! parsing messages. All paths in messages and details are slash-normalized.
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use tsproj::core::project::{ErrorKind, ProjectError};
//!
//! let err = ProjectError::InvalidPath { path: PathBuf::from("/nope") };
//! assert_eq!(err.code(), "GET_PROJECT_INVALID_PATH");
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! ```

use std::path::PathBuf;

use serde_json::{json, Value};
use thiserror::Error;

use crate::core::glob::GlobError;
use crate::core::paths::consistent_path;

/// Coarse failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A path or descriptor does not exist.
    NotFound,
    /// A descriptor exists but could not be read or written.
    IoFailure,
    /// A descriptor is not well-formed.
    ParseFailure,
    /// Glob expansion failed.
    GlobFailure,
    /// Compiler options are invalid or unsupported.
    ValidationFailure,
    /// A descriptor is already present where one would be created.
    AlreadyExists,
    /// An input required for creation is missing.
    PreconditionFailed,
}

/// Errors from project operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Invalid Path: '{}' does not exist", consistent_path(.path))]
    InvalidPath { path: PathBuf },

    #[error("No Project Found (searched upward from '{}')", consistent_path(.searched_from))]
    NoProjectFound { searched_from: PathBuf },

    #[error("Failed to read the project file '{}': {source}", consistent_path(.path))]
    FailedToOpenProjectFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse the project file '{}': {message}", consistent_path(.path))]
    JsonParseFailed { path: PathBuf, message: String },

    #[error("Failed to expand filesGlob in the project file '{}': {source}", consistent_path(.path))]
    GlobExpandFailed {
        path: PathBuf,
        glob: Vec<String>,
        source: GlobError,
    },

    #[error("Project file '{}' contains invalid options: {message}", consistent_path(.path))]
    InvalidOptions { path: PathBuf, message: String },

    #[error("Failed to write the project file '{}': {source}", consistent_path(.path))]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("To create a project the file must exist: '{}'", consistent_path(.path))]
    CreateFileMustExist { path: PathBuf },

    #[error("Project file already exists: '{}'", consistent_path(.path))]
    ProjectAlreadyExists { path: PathBuf },
}

impl ProjectError {
    /// Stable identifier for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            ProjectError::InvalidPath { .. } => "GET_PROJECT_INVALID_PATH",
            ProjectError::NoProjectFound { .. } => "GET_PROJECT_NO_PROJECT_FOUND",
            ProjectError::FailedToOpenProjectFile { .. } => {
                "GET_PROJECT_FAILED_TO_OPEN_PROJECT_FILE"
            }
            ProjectError::JsonParseFailed { .. } => "GET_PROJECT_JSON_PARSE_FAILED",
            ProjectError::GlobExpandFailed { .. } => "GET_PROJECT_GLOB_EXPAND_FAILED",
            ProjectError::InvalidOptions { .. } => "GET_PROJECT_PROJECT_FILE_INVALID_OPTIONS",
            ProjectError::WriteFailed { .. } => "PROJECT_FILE_WRITE_FAILED",
            ProjectError::CreateFileMustExist { .. } => "CREATE_FILE_MUST_EXIST",
            ProjectError::ProjectAlreadyExists { .. } => "CREATE_PROJECT_ALREADY_EXISTS",
        }
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProjectError::InvalidPath { .. } | ProjectError::NoProjectFound { .. } => {
                ErrorKind::NotFound
            }
            ProjectError::FailedToOpenProjectFile { .. } | ProjectError::WriteFailed { .. } => {
                ErrorKind::IoFailure
            }
            ProjectError::JsonParseFailed { .. } => ErrorKind::ParseFailure,
            ProjectError::GlobExpandFailed { .. } => ErrorKind::GlobFailure,
            ProjectError::InvalidOptions { .. } => ErrorKind::ValidationFailure,
            ProjectError::ProjectAlreadyExists { .. } => ErrorKind::AlreadyExists,
            ProjectError::CreateFileMustExist { .. } => ErrorKind::PreconditionFailed,
        }
    }

    /// Structured details for this failure.
    pub fn details(&self) -> Value {
        match self {
            ProjectError::InvalidPath { path }
            | ProjectError::CreateFileMustExist { path } => {
                json!({ "path": consistent_path(path) })
            }
            ProjectError::NoProjectFound { searched_from } => {
                json!({ "searchedFrom": consistent_path(searched_from) })
            }
            ProjectError::ProjectAlreadyExists { path } => {
                json!({ "projectFilePath": consistent_path(path) })
            }
            ProjectError::FailedToOpenProjectFile { path, source }
            | ProjectError::WriteFailed { path, source } => json!({
                "projectFilePath": consistent_path(path),
                "error": source.to_string(),
            }),
            ProjectError::JsonParseFailed { path, message } => json!({
                "projectFilePath": consistent_path(path),
                "error": message,
            }),
            ProjectError::GlobExpandFailed { path, glob, source } => json!({
                "glob": glob,
                "projectFilePath": consistent_path(path),
                "errorMessage": source.to_string(),
            }),
            ProjectError::InvalidOptions { path, message } => json!({
                "projectFilePath": consistent_path(path),
                "errorMessage": message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let err = ProjectError::NoProjectFound {
            searched_from: PathBuf::from("/a"),
        };
        assert_eq!(err.code(), "GET_PROJECT_NO_PROJECT_FOUND");
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = ProjectError::ProjectAlreadyExists {
            path: PathBuf::from("/a/tsconfig.json"),
        };
        assert_eq!(err.code(), "CREATE_PROJECT_ALREADY_EXISTS");
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn invalid_options_details() {
        let err = ProjectError::InvalidOptions {
            path: PathBuf::from("/work/tsconfig.json"),
            message: "bad target".into(),
        };
        let details = err.details();
        assert_eq!(details["projectFilePath"], "/work/tsconfig.json");
        assert_eq!(details["errorMessage"], "bad target");
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert!(err.to_string().contains("bad target"));
    }

    #[test]
    fn glob_details_carry_patterns() {
        let err = ProjectError::GlobExpandFailed {
            path: PathBuf::from("/work/tsconfig.json"),
            glob: vec!["src/[".into()],
            source: GlobError::InvalidPattern {
                pattern: "src/[".into(),
                message: "unclosed character class".into(),
            },
        };
        assert_eq!(err.details()["glob"][0], "src/[");
        assert_eq!(err.kind(), ErrorKind::GlobFailure);
    }

    #[test]
    fn create_precondition_kind() {
        let err = ProjectError::CreateFileMustExist {
            path: PathBuf::from("/missing.ts"),
        };
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
        assert_eq!(err.details()["path"], "/missing.ts");
    }
}
