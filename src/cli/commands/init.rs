//! init command - Create a tsconfig.json

use crate::cli::args::{ModuleKind, Target};
use crate::cli::Context;
use crate::core::options::{default_compiler_options, internal_to_raw, raw_to_internal};
use crate::core::paths::{consistent_path, containing_dir};
use crate::core::project::create_project;
use crate::ui::output;
use anyhow::{Context as _, Result};
use serde_json::Value;
use std::path::Path;

/// Create a project for `path` (or the working directory).
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `path` - File or directory the project is created for
/// * `target` - Override the default language target
/// * `module` - Override the default module system
/// * `declaration` - Enable declaration output
/// * `no_implicit_any` - Enable `noImplicitAny`
pub fn init(
    ctx: &Context,
    path: Option<&Path>,
    target: Option<Target>,
    module: Option<ModuleKind>,
    declaration: bool,
    no_implicit_any: bool,
) -> Result<()> {
    let src = ctx.target_path(path)?;

    let mut raw = internal_to_raw(default_compiler_options());
    if let Some(target) = target {
        raw.insert("target".into(), Value::from(target.as_str()));
    }
    if let Some(module) = module {
        raw.insert("module".into(), Value::from(module.as_str()));
    }
    if declaration {
        raw.insert("declaration".into(), Value::Bool(true));
    }
    if no_implicit_any {
        raw.insert("noImplicitAny".into(), Value::Bool(true));
    }
    let options = raw_to_internal(&raw, &containing_dir(&src));

    let location = create_project(&src, Some(&options))
        .with_context(|| format!("Failed to create project for '{}'", consistent_path(&src)))?;

    let verbosity = ctx.verbosity();
    output::success(format!("Created {}", location.project_file_path), verbosity);
    super::print_location(&location, false, verbosity)
}
