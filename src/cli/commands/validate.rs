//! validate command - Check that a project resolves cleanly

use crate::cli::Context;
use crate::core::project::get_project;
use crate::ui::output;
use anyhow::{bail, Result};
use std::path::Path;

/// Resolve the project for `path` and report `ok` or the failure code.
pub fn validate(ctx: &Context, path: Option<&Path>) -> Result<()> {
    let target = ctx.target_path(path)?;
    let verbosity = ctx.verbosity();

    match get_project(&target) {
        Ok(location) => {
            output::success(format!("ok: {}", location.project_file_path), verbosity);
            Ok(())
        }
        Err(e) => {
            output::debug(format!("details: {}", e.details()), verbosity);
            bail!("{} [{}]", e, e.code())
        }
    }
}
