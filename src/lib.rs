//! tsproj - Resolve `tsconfig.json` projects
//!
//! Given a source file or directory, tsproj finds the governing
//! `tsconfig.json`, validates and normalizes its compiler options, expands
//! its `filesGlob`, and closes the file list over `/// <reference>` tags and
//! relative imports.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, calls into core)
//! - [`core`] - Descriptor handling, option codec, and file-set resolution
//! - [`ui`] - User-facing output
//!
//! # Invariants
//!
//! 1. Resolved file lists are absolute, slash-normalized, and duplicate-free
//! 2. A descriptor is rewritten only when its canonical text changes
//! 3. Persisted options are always in raw (string) form, never enum codes

pub mod cli;
pub mod core;
pub mod ui;
