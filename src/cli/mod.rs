//! cli
//!
//! Command-line interface layer for tsproj.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT touch descriptors directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and calls into
//! [`crate::core::project`] for resolution. Every descriptor read and write
//! flows through the core.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::core::paths::resolve_path;
use crate::ui::output::Verbosity;

/// Execution context shared by command handlers.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Output verbosity for this invocation.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The directory commands run in.
    pub fn working_dir(&self) -> Result<PathBuf> {
        let current = std::env::current_dir().context("Failed to determine the current directory")?;
        Ok(match &self.cwd {
            Some(cwd) => resolve_path(&current, cwd),
            None => current,
        })
    }

    /// Resolve a path argument against the working directory.
    ///
    /// `None` designates the working directory itself.
    pub fn target_path(&self, path: Option<&Path>) -> Result<PathBuf> {
        let base = self.working_dir()?;
        Ok(match path {
            Some(path) => resolve_path(&base, path),
            None => base,
        })
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn target_path_joins_cwd_override() {
        let ctx = Context {
            cwd: Some(PathBuf::from("/work/app")),
            ..Default::default()
        };
        assert_eq!(
            ctx.target_path(Some(Path::new("src/../lib/a.ts"))).unwrap(),
            PathBuf::from("/work/app/lib/a.ts")
        );
        assert_eq!(ctx.target_path(None).unwrap(), PathBuf::from("/work/app"));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_argument_wins() {
        let ctx = Context {
            cwd: Some(PathBuf::from("/work/app")),
            ..Default::default()
        };
        assert_eq!(
            ctx.target_path(Some(Path::new("/elsewhere/x.ts"))).unwrap(),
            PathBuf::from("/elsewhere/x.ts")
        );
    }

    #[test]
    fn verbosity_from_flags() {
        let ctx = Context {
            quiet: true,
            debug: true,
            ..Default::default()
        };
        assert_eq!(ctx.verbosity(), Verbosity::Quiet);
    }
}
