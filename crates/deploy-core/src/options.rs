//! Options controlling a resolution run

use std::path::PathBuf;

use deploy_fs::{ConfigStore, DEFAULT_FILE_NAME, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::Result;

/// What to resolve and how.
///
/// Can be loaded from a TOML, JSON or YAML file; missing keys fall back to
/// the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Root document
    pub config_file: PathBuf,

    /// Profiles active on the root document's configs
    pub profiles: Vec<String>,

    /// Names to select; empty keeps everything reachable
    pub configs: Vec<String>,

    /// File looked up when a requirement path names a directory
    pub default_file_name: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_FILE_NAME),
            profiles: Vec::new(),
            configs: Vec::new(),
            default_file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl ResolveOptions {
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Merge `other` on top of these options.
    ///
    /// Non-default scalars in `other` win; profile and config lists are
    /// extended with values not already present.
    pub fn merge(&mut self, other: &ResolveOptions) {
        let defaults = Self::default();
        if other.config_file != defaults.config_file {
            self.config_file = other.config_file.clone();
        }
        if other.default_file_name != defaults.default_file_name {
            self.default_file_name = other.default_file_name.clone();
        }
        for profile in &other.profiles {
            if !self.profiles.contains(profile) {
                self.profiles.push(profile.clone());
            }
        }
        for config in &other.configs {
            if !self.configs.contains(config) {
                self.configs.push(config.clone());
            }
        }
    }
}
