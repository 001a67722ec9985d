//! core::options::schema
//!
//! The table of recognized compiler options and the validator over it.
//!
//! # Validation
//!
//! Validation is fail-fast: the first unknown key, type mismatch, or value
//! outside a closed set ends the check with a single message. Keys are
//! visited in the order they appear in the descriptor. Deprecated spellings
//! (`outdir`, `nolib`, ...) are checked under their current name.

use std::fmt;

use serde_json::{Map, Value};

use super::codec::current_key_name;

/// Primitive type a compiler option must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Boolean,
    String,
    Number,
}

impl OptionKind {
    /// Whether `value` has this primitive type.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            OptionKind::Boolean => value.is_boolean(),
            OptionKind::String => value.is_string(),
            OptionKind::Number => value.is_number(),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Boolean => write!(f, "boolean"),
            OptionKind::String => write!(f, "string"),
            OptionKind::Number => write!(f, "number"),
        }
    }
}

/// Declared shape of one compiler option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Expected primitive type.
    pub kind: OptionKind,
    /// Closed set of accepted strings, if restricted.
    pub valid_values: Option<&'static [&'static str]>,
}

impl OptionSpec {
    const fn of(kind: OptionKind) -> Self {
        Self {
            kind,
            valid_values: None,
        }
    }

    const fn one_of(kind: OptionKind, values: &'static [&'static str]) -> Self {
        Self {
            kind,
            valid_values: Some(values),
        }
    }
}

/// Outcome of validating a raw options mapping.
///
/// `Err` carries a message describing the first violation.
pub type ValidationResult = Result<(), String>;

const COMPILER_OPTION_SPECS: &[(&str, OptionSpec)] = &[
    ("allowNonTsExtensions", OptionSpec::of(OptionKind::Boolean)),
    ("charset", OptionSpec::of(OptionKind::String)),
    ("codepage", OptionSpec::of(OptionKind::Number)),
    ("declaration", OptionSpec::of(OptionKind::Boolean)),
    ("diagnostics", OptionSpec::of(OptionKind::Boolean)),
    ("emitBOM", OptionSpec::of(OptionKind::Boolean)),
    ("help", OptionSpec::of(OptionKind::Boolean)),
    ("locals", OptionSpec::of(OptionKind::String)),
    ("mapRoot", OptionSpec::of(OptionKind::String)),
    (
        "module",
        OptionSpec::one_of(OptionKind::String, &["commonjs", "amd"]),
    ),
    ("noEmitOnError", OptionSpec::of(OptionKind::Boolean)),
    ("noErrorTruncation", OptionSpec::of(OptionKind::Boolean)),
    ("noImplicitAny", OptionSpec::of(OptionKind::Boolean)),
    ("noLib", OptionSpec::of(OptionKind::Boolean)),
    ("noLibCheck", OptionSpec::of(OptionKind::Boolean)),
    ("noResolve", OptionSpec::of(OptionKind::Boolean)),
    ("out", OptionSpec::of(OptionKind::String)),
    ("outDir", OptionSpec::of(OptionKind::String)),
    ("preserveConstEnums", OptionSpec::of(OptionKind::Boolean)),
    ("removeComments", OptionSpec::of(OptionKind::Boolean)),
    ("sourceMap", OptionSpec::of(OptionKind::Boolean)),
    ("sourceRoot", OptionSpec::of(OptionKind::String)),
    (
        "suppressImplicitAnyIndexErrors",
        OptionSpec::of(OptionKind::Boolean),
    ),
    (
        "target",
        OptionSpec::one_of(OptionKind::String, &["es3", "es5", "es6"]),
    ),
    ("version", OptionSpec::of(OptionKind::Boolean)),
    ("watch", OptionSpec::of(OptionKind::Boolean)),
];

/// A read-only table of option specs.
///
/// Constructed once and shared by reference; nothing mutates it.
#[derive(Debug, Clone, Copy)]
pub struct OptionSchema {
    specs: &'static [(&'static str, OptionSpec)],
}

impl OptionSchema {
    /// The schema for `compilerOptions`.
    pub const fn compiler_options() -> Self {
        Self {
            specs: COMPILER_OPTION_SPECS,
        }
    }

    /// Look up the spec for a key (exact, case-sensitive).
    pub fn get(&self, key: &str) -> Option<&OptionSpec> {
        self.specs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, spec)| spec)
    }

    /// Recognized keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|(name, _)| *name)
    }

    /// Validate a raw options mapping against this schema.
    ///
    /// Returns the first violation found.
    pub fn validate(&self, raw: &Map<String, Value>) -> ValidationResult {
        for (key, value) in raw {
            let Some(spec) = self.get(current_key_name(key)) else {
                return Err(format!(
                    "Unknown option: '{}'. Valid options are: {}",
                    key,
                    self.keys().collect::<Vec<_>>().join(", ")
                ));
            };

            if !spec.kind.matches(value) {
                return Err(format!(
                    "Invalid type for option '{}': expected {}, got {}",
                    key,
                    spec.kind,
                    json_type_name(value)
                ));
            }

            if let (Some(valid), Some(s)) = (spec.valid_values, value.as_str()) {
                if !valid.contains(&s) {
                    return Err(format!(
                        "Invalid value '{}' for option '{}'. Valid values are: {}",
                        s,
                        key,
                        valid.join(", ")
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Default for OptionSchema {
    fn default() -> Self {
        Self::compiler_options()
    }
}

/// Validate raw `compilerOptions` against the built-in schema.
pub fn validate_compiler_options(raw: &Map<String, Value>) -> ValidationResult {
    OptionSchema::compiler_options().validate(raw)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
