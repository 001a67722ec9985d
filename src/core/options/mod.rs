//! core::options
//!
//! Compiler option schema, validation, and the raw/internal codec.
//!
//! # Modules
//!
//! - [`schema`] - Recognized keys, their types, and the fail-fast validator
//! - [`codec`] - Deprecated-key rewriting and enum translation in both
//!   directions
//!
//! All tables here are immutable statics. Nothing in this module touches the
//! filesystem.

pub mod codec;
pub mod schema;

pub use codec::{
    current_key_name, default_compiler_options, internal_to_persisted, internal_to_raw,
    raw_to_internal, CompilerOptions,
};
pub use schema::{
    validate_compiler_options, OptionKind, OptionSchema, OptionSpec, ValidationResult,
};
