//! resolve command - Resolve the project that owns a file or directory

use crate::cli::Context;
use crate::core::paths::consistent_path;
use crate::core::project::get_project;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Resolve and print the project for `path` (or the working directory).
pub fn resolve(ctx: &Context, path: Option<&Path>, json: bool) -> Result<()> {
    let target = ctx.target_path(path)?;
    let location = get_project(&target).with_context(|| {
        format!(
            "Failed to resolve project for '{}'",
            consistent_path(&target)
        )
    })?;

    super::print_location(&location, json, ctx.verbosity())
}
