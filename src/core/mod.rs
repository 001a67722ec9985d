//! core
//!
//! Project descriptor handling and file-set resolution.
//!
//! # Modules
//!
//! - [`paths`] - Path normalization and the upward descriptor search
//! - [`options`] - Compiler option schema, validation, and codec
//! - [`descriptor`] - `tsconfig.json` schema, canonical form, and writes
//! - [`format`] - Editor formatting options carried by a project
//! - [`glob`] - `filesGlob` expansion
//! - [`extract`] - Reference/import extraction from source text
//! - [`closure`] - Transitive file-set construction
//! - [`project`] - Resolution entry points tying the above together
//!
//! # Design Principles
//!
//! - Static tables are immutable and shared by reference
//! - Every call owns its state; nothing is cached between calls
//! - Output paths are absolute and slash-normalized

pub mod closure;
pub mod descriptor;
pub mod extract;
pub mod format;
pub mod glob;
pub mod options;
pub mod paths;
pub mod project;
