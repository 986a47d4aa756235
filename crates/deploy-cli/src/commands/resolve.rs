//! Resolve command implementation

use std::path::Path;

use colored::Colorize;
use deploy_core::ResolvedConfig;

use super::display_name;
use crate::cli::SelectionArgs;
use crate::error::Result;

/// Run the resolve command
pub fn run_resolve(cwd: &Path, args: &SelectionArgs, json: bool) -> Result<()> {
    let resolved = super::resolve_configs(args, cwd)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        print!("{}", render(&resolved));
    }
    Ok(())
}

/// One line per config: `name  (document)  [profiles]`.
pub fn render(resolved: &[ResolvedConfig]) -> String {
    let mut out = String::new();
    for config in resolved {
        out.push_str(&format!(
            "{}  ({})",
            display_name(config).cyan(),
            config.document().to_string().dimmed()
        ));
        if !config.active_profiles.is_empty() {
            out.push_str(&format!("  {}", config.active_profiles.to_string().yellow()));
        }
        out.push('\n');
    }
    out
}
