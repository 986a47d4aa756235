//! Command implementations for deploy-cli

pub mod graph;
pub mod resolve;

pub use graph::run_graph;
pub use resolve::run_resolve;

use std::path::Path;

use deploy_core::{ResolveOptions, ResolvedConfig};
use deploy_fs::NormalizedPath;

use crate::cli::SelectionArgs;
use crate::error::Result;

/// Build the options for a run: the options file (if any) first, then the
/// command-line flags on top.
///
/// A relative `configFile` inside an options file is taken relative to that
/// file's directory.
pub fn build_options(args: &SelectionArgs, cwd: &Path) -> Result<ResolveOptions> {
    let mut options = match &args.options {
        Some(path) => {
            let path = NormalizedPath::new(cwd).join(&path.to_string_lossy());
            let mut loaded = ResolveOptions::load(&path)?;
            if let Some(dir) = path.parent() {
                let file = dir.join(&loaded.config_file.to_string_lossy());
                loaded.config_file = file.to_native();
            }
            tracing::debug!(%path, "Loaded options file");
            loaded
        }
        None => ResolveOptions::default(),
    };

    if let Some(filename) = &args.filename {
        options.config_file = filename.clone();
    }
    options.merge(&ResolveOptions {
        profiles: args.profiles.clone(),
        configs: args.configs.clone(),
        ..ResolveOptions::default()
    });
    options.config_file = cwd.join(&options.config_file);
    Ok(options)
}

/// Resolve with the options built from `args`.
pub fn resolve_configs(args: &SelectionArgs, cwd: &Path) -> Result<Vec<ResolvedConfig>> {
    let options = build_options(args, cwd)?;
    Ok(deploy_core::resolve(&options)?)
}

pub(crate) fn display_name(config: &ResolvedConfig) -> &str {
    if config.name().is_empty() {
        "<unnamed>"
    } else {
        config.name()
    }
}
