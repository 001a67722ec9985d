//! core::descriptor
//!
//! The persisted project descriptor (`tsconfig.json`): schema, reading,
//! canonical serialization, and atomic writes.
//!
//! # Canonical form
//!
//! The descriptor is serialized as JSON with 4-space indentation and the
//! platform line ending, with no trailing newline. Top-level keys keep the
//! order they were read in. Keys the file did not have yet are appended in
//! field order (`version`, `compilerOptions`, `files`, `filesGlob`,
//! `formatCodeOptions`, `compileOnSave`, then unknown keys).
//!
//! The canonical text is used twice: compared against the file's current
//! text to decide whether a write is needed, and as the written content.
//! The descriptor is an owned value tree, so it cannot contain reference
//! cycles and serialization always terminates.
//!
//! # Example
//!
//! ```
//! use tsproj::core::descriptor::{canonicalize, RawDescriptor};
//!
//! let descriptor = RawDescriptor {
//!     version: Some("1.4.1".into()),
//!     files_glob: Some(vec!["./**/*.ts".into()]),
//!     ..Default::default()
//! };
//! let text = canonicalize(&descriptor).unwrap();
//! assert!(text.starts_with("{"));
//! assert!(text.contains("    \"version\": \"1.4.1\""));
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::info;

use crate::core::format::EOL;
use crate::core::project::ProjectError;

/// Canonical descriptor file name.
pub const PROJECT_FILE_NAME: &str = "tsconfig.json";

/// Version string stamped into newly created descriptors.
pub const DESCRIPTOR_VERSION: &str = "1.4.1";

/// On-disk project descriptor.
///
/// # Example
///
/// ```json
/// {
///     "version": "1.4.1",
///     "compilerOptions": {
///         "target": "es5",
///         "module": "commonjs"
///     },
///     "filesGlob": [
///         "./**/*.ts",
///         "!./node_modules/**/*.ts"
///     ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Raw compiler options; `null` or absent reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub compiler_options: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_glob: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_code_options: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile_on_save: Option<bool>,

    /// Keys this crate does not interpret, preserved across rewrites.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Top-level keys in the order they were read.
    #[serde(skip)]
    pub key_order: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse descriptor text. A leading byte-order mark is ignored.
pub fn parse(path: &Path, text: &str) -> Result<RawDescriptor, ProjectError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let parse_failed = |e: serde_json::Error| ProjectError::JsonParseFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut descriptor: RawDescriptor = serde_json::from_str(text).map_err(parse_failed)?;
    let fields: Map<String, Value> = serde_json::from_str(text).map_err(parse_failed)?;
    descriptor.key_order = fields.keys().cloned().collect();
    Ok(descriptor)
}

/// Read a descriptor file, returning its raw text alongside the parsed form.
pub fn read(path: &Path) -> Result<(String, RawDescriptor), ProjectError> {
    let text = fs::read_to_string(path).map_err(|e| ProjectError::FailedToOpenProjectFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    let descriptor = parse(path, &text)?;
    Ok((text, descriptor))
}

/// Canonical text for a descriptor.
pub fn canonicalize(descriptor: &RawDescriptor) -> Result<String, serde_json::Error> {
    let fields = match serde_json::to_value(descriptor)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut ordered = Map::new();
    for key in &descriptor.key_order {
        if let Some(value) = fields.get(key) {
            ordered.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in fields {
        if !ordered.contains_key(&key) {
            ordered.insert(key, value);
        }
    }

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    Value::Object(ordered).serialize(&mut serializer)?;

    let text = String::from_utf8_lossy(&buf);
    Ok(if EOL == "\n" {
        text.into_owned()
    } else {
        text.replace('\n', EOL)
    })
}

/// Write a descriptor atomically (temp file in the same directory, then
/// rename).
pub fn write(path: &Path, descriptor: &RawDescriptor) -> Result<(), ProjectError> {
    let contents = canonicalize(descriptor).map_err(|e| ProjectError::WriteFailed {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    write_atomic(path, &contents)?;
    info!(path = %path.display(), "wrote project file");
    Ok(())
}

/// Rewrite `path` only when the canonical text differs from `current`.
///
/// Returns whether a write happened.
pub fn write_if_changed(
    path: &Path,
    descriptor: &RawDescriptor,
    current: &str,
) -> Result<bool, ProjectError> {
    let contents = canonicalize(descriptor).map_err(|e| ProjectError::WriteFailed {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    if contents == current {
        return Ok(false);
    }
    write_atomic(path, &contents)?;
    info!(path = %path.display(), "updated project file");
    Ok(true)
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), ProjectError> {
    let temp_path = path.with_extension("json.tmp");

    let result = write_temp(&temp_path, contents).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| ProjectError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, contents: &str) -> Result<(), ProjectError> {
    let mut file = fs::File::create(temp_path).map_err(|e| ProjectError::WriteFailed {
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ProjectError::WriteFailed {
            path: temp_path.to_path_buf(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ProjectError::WriteFailed {
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
