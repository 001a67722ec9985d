//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! Everything printed for the user goes through this module so quiet and
//! debug modes behave the same across commands. Diagnostics for developers
//! go through `tracing` instead.

pub mod output;
