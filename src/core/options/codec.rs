//! core::options::codec
//!
//! Translation between the persisted (raw) and internal forms of
//! `compilerOptions`.
//!
//! # Forms
//!
//! - **Raw**: what the descriptor stores. Enum options are strings
//!   (`"es5"`, `"commonjs"`), deprecated lower-case key spellings are
//!   accepted, paths are relative to the project directory.
//! - **Internal**: enum options are integer codes, keys use their current
//!   spelling, `outDir`/`out` are absolute.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use std::path::Path;
//! use tsproj::core::options::{internal_to_raw, raw_to_internal};
//!
//! let raw = json!({ "target": "es5", "outdir": "./built" });
//! let internal = raw_to_internal(raw.as_object().unwrap(), Path::new("/work"));
//! assert_eq!(internal["target"], json!(1));
//! assert_eq!(internal["outDir"], json!("/work/built"));
//!
//! let back = internal_to_raw(&internal);
//! assert_eq!(back["target"], json!("es5"));
//! ```

use std::path::Path;
use std::sync::LazyLock;

use serde_json::{Map, Value};
use tracing::debug;

use super::schema::OptionSchema;
use crate::core::paths::{consistent_path, resolve_path};

/// Compiler options, keyed by option name, in either raw or internal form.
pub type CompilerOptions = Map<String, Value>;

/// Deprecated spelling → current spelling. Matched case-insensitively.
const DEPRECATED_KEYS: &[(&str, &str)] = &[
    ("outdir", "outDir"),
    ("noimplicitany", "noImplicitAny"),
    ("removecomments", "removeComments"),
    ("sourcemap", "sourceMap"),
    ("sourceroot", "sourceRoot"),
    ("maproot", "mapRoot"),
    ("nolib", "noLib"),
];

/// `target` names → codes. Later entries win on reverse lookup.
const TARGET_CODES: &[(&str, i64)] = &[("es3", 0), ("es5", 1), ("es6", 2), ("latest", 2)];

/// `module` names → codes.
const MODULE_CODES: &[(&str, i64)] = &[("none", 0), ("commonjs", 1), ("amd", 2)];

/// Options whose values are resolved against the project directory.
const PATH_OPTIONS: &[&str] = &["outDir", "out"];

static DEFAULTS: LazyLock<CompilerOptions> = LazyLock::new(|| {
    let mut defaults = Map::new();
    defaults.insert("target".into(), Value::from(1));
    defaults.insert("module".into(), Value::from(1));
    defaults.insert("declaration".into(), Value::Bool(false));
    defaults.insert("noImplicitAny".into(), Value::Bool(false));
    defaults.insert("removeComments".into(), Value::Bool(true));
    defaults.insert("noLib".into(), Value::Bool(false));
    defaults
});

/// The built-in internal defaults.
///
/// `target` is ES5 (code 1) and `module` is CommonJS (code 1).
pub fn default_compiler_options() -> &'static CompilerOptions {
    &DEFAULTS
}

/// Current spelling for `key`, rewriting deprecated spellings.
///
/// Keys that are not deprecated are returned unchanged.
pub fn current_key_name(key: &str) -> &str {
    DEPRECATED_KEYS
        .iter()
        .find(|(old, _)| old.eq_ignore_ascii_case(key))
        .map(|(_, current)| *current)
        .unwrap_or(key)
}

fn enum_table(key: &str) -> Option<&'static [(&'static str, i64)]> {
    match key {
        "target" => Some(TARGET_CODES),
        "module" => Some(MODULE_CODES),
        _ => None,
    }
}

fn code_for(table: &[(&str, i64)], name: &str) -> Option<i64> {
    let name = name.to_lowercase();
    table.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

/// Convert raw options into internal form.
///
/// Starts from [`default_compiler_options`] and layers each raw key on top.
/// Enum strings that have no code are dropped, leaving the default in place.
pub fn raw_to_internal(raw: &CompilerOptions, project_dir: &Path) -> CompilerOptions {
    let mut options = default_compiler_options().clone();

    for (key, value) in raw {
        let key = current_key_name(key);

        match enum_table(key) {
            Some(table) => match value.as_str().and_then(|s| code_for(table, s)) {
                Some(code) => {
                    options.insert(key.to_string(), Value::from(code));
                }
                None => debug!(key, %value, "dropping unrecognized enum value"),
            },
            None => {
                options.insert(key.to_string(), value.clone());
            }
        }
    }

    for key in PATH_OPTIONS {
        if let Some(Value::String(path)) = options.get(*key) {
            let resolved = consistent_path(resolve_path(project_dir, path));
            options.insert((*key).to_string(), Value::String(resolved));
        }
    }

    options
}

/// Convert internal options back into raw form.
///
/// Enum codes become their canonical names; when several names share a
/// code the last registered one is used (`2` → `"latest"` for `target`).
pub fn internal_to_raw(options: &CompilerOptions) -> CompilerOptions {
    rename_codes(options, |_, _| true)
}

/// Convert internal options into the form written to a new descriptor.
///
/// Like [`internal_to_raw`], except an enum code is written with the last
/// name the option schema accepts, so the result always passes
/// validation (`2` → `"es6"` for `target`).
pub fn internal_to_persisted(options: &CompilerOptions) -> CompilerOptions {
    let schema = OptionSchema::compiler_options();
    rename_codes(options, |key, name| {
        schema
            .get(key)
            .and_then(|spec| spec.valid_values)
            .map_or(true, |valid| valid.contains(&name))
    })
}

fn rename_codes(
    options: &CompilerOptions,
    accept: impl Fn(&str, &str) -> bool,
) -> CompilerOptions {
    let mut raw = options.clone();

    for key in ["target", "module"] {
        let Some(table) = enum_table(key) else {
            continue;
        };
        let Some(code) = raw.get(key).and_then(Value::as_i64) else {
            continue;
        };
        let name = table
            .iter()
            .rev()
            .find(|(n, c)| *c == code && accept(key, n))
            .or_else(|| table.iter().rev().find(|(_, c)| *c == code))
            .map(|(n, _)| *n);
        if let Some(name) = name {
            raw.insert(key.to_string(), Value::from(name));
        }
    }

    raw
}
