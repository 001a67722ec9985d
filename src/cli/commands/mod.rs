//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves its path arguments against the working directory
//! 2. Calls into [`crate::core::project`]
//! 3. Formats and displays output
//!
//! Handlers do NOT read or write descriptors directly.

mod completion;
mod default;
mod init;
mod resolve;
mod validate;

pub use completion::completion;
pub use default::default_project;
pub use init::init;
pub use resolve::resolve;
pub use validate::validate;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::paths::make_relative_path;
use crate::core::project::ProjectLocation;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};
use std::path::Path;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Resolve { path, json } => resolve::resolve(ctx, path.as_deref(), json),
        Command::Init {
            path,
            target,
            module,
            declaration,
            no_implicit_any,
        } => init::init(
            ctx,
            path.as_deref(),
            target,
            module,
            declaration,
            no_implicit_any,
        ),
        Command::Default { file, json } => default::default_project(ctx, &file, json),
        Command::Validate { path } => validate::validate(ctx, path.as_deref()),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Print a resolved project.
///
/// With `json` the whole location is printed as pretty JSON regardless of
/// verbosity. Otherwise the project file path is followed by the file list,
/// relative to the project directory.
fn print_location(location: &ProjectLocation, json: bool, verbosity: Verbosity) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(location)
            .context("Failed to serialize resolved project")?;
        println!("{}", text);
        return Ok(());
    }

    let dir = Path::new(&location.project_file_directory);
    let files: Vec<String> = location
        .project
        .files
        .iter()
        .map(|f| make_relative_path(dir, Path::new(f)))
        .collect();

    output::print(&location.project_file_path, verbosity);
    if !files.is_empty() {
        output::print(output::format_list(&files, "  "), verbosity);
    }
    output::debug(format!("{} file(s) in project", files.len()), verbosity);
    Ok(())
}
