//! Graph command implementation

use std::path::Path;

use colored::Colorize;
use deploy_core::{ProfileActivation, ResolvedConfig};

use super::display_name;
use crate::cli::SelectionArgs;
use crate::error::Result;

/// Run the graph command
pub fn run_graph(cwd: &Path, args: &SelectionArgs) -> Result<()> {
    let resolved = super::resolve_configs(args, cwd)?;
    print!("{}", render(&resolved));
    Ok(())
}

/// Each config followed by its direct requirements, indented.
pub fn render(resolved: &[ResolvedConfig]) -> String {
    let mut out = String::new();
    for config in resolved {
        out.push_str(&format!(
            "{} ({})\n",
            display_name(config).cyan().bold(),
            config.document().to_string().dimmed()
        ));
        for requirement in &config.requires {
            let targets = if requirement.configs.is_empty() {
                "<none>".to_string()
            } else {
                requirement.configs.join(", ")
            };
            out.push_str(&format!("  {} {} ({})", "->".green(), targets, requirement.path));
            if !requirement.active_profiles.is_empty() {
                out.push_str(&format!("  {}", rules(&requirement.active_profiles).yellow()));
            }
            out.push('\n');
        }
    }
    out
}

fn rules(activations: &[ProfileActivation]) -> String {
    let rendered: Vec<String> = activations
        .iter()
        .map(|rule| {
            if rule.activated_by.is_empty() {
                rule.name.clone()
            } else {
                format!("{} if {}", rule.name, rule.activated_by.join("|"))
            }
        })
        .collect();
    format!("[{}]", rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deploy_core::{ConfigId, Payload, ProfileSet, ResolvedRequirement};
    use deploy_fs::NormalizedPath;

    #[test]
    fn render_shows_requirements_and_rules() {
        colored::control::set_override(false);
        let resolved = vec![ResolvedConfig {
            id: ConfigId::new(NormalizedPath::new("/w/deploy.yaml"), "cfg00"),
            requires: vec![ResolvedRequirement {
                path: NormalizedPath::new("/w/doc1/deploy.yaml"),
                configs: vec!["cfg10".into()],
                active_profiles: vec![
                    ProfileActivation::always("pf0"),
                    ProfileActivation::when("pf1", ["pf0"]),
                ],
            }],
            active_profiles: ProfileSet::default(),
            payload: Payload::default(),
        }];

        assert_eq!(
            render(&resolved),
            "cfg00 (/w/deploy.yaml)\n  -> cfg10 (/w/doc1/deploy.yaml)  [pf0, pf1 if pf0]\n"
        );
    }
}
