//! default command - Resolve a single file without any descriptor

use crate::cli::Context;
use crate::core::paths::consistent_path;
use crate::core::project::get_default_project;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Resolve `file` with the default options and print the result.
pub fn default_project(ctx: &Context, file: &Path, json: bool) -> Result<()> {
    let target = ctx.target_path(Some(file))?;
    let location = get_default_project(&target).with_context(|| {
        format!(
            "Failed to build default project for '{}'",
            consistent_path(&target)
        )
    })?;

    super::print_location(&location, json, ctx.verbosity())
}
