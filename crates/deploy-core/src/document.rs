//! Configuration documents and the configs they declare
//!
//! A document is a YAML stream; every `---` separated entry declares one
//! config:
//!
//! ```yaml
//! apiVersion: deploy/v1
//! kind: Config
//! metadata:
//!   name: cfg00
//! requires:
//!   - path: doc1
//!     configs: [cfg10]
//!     activeProfiles:
//!       - name: pf0
//!         activatedBy: [pf0]
//! build:
//!   artifacts:
//!     - image: app
//! profiles:
//!   - name: pf0
//!     build:
//!       artifacts:
//!         - image: app-pf0
//! ```
//!
//! `metadata`, `requires` and `profiles` are interpreted here; every other
//! top-level key is payload and travels with the config untouched.

use std::collections::HashSet;

use deploy_fs::NormalizedPath;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::payload::Payload;
use crate::{Error, Result};

/// Instruction to enable a profile on the required config.
///
/// An empty `activated_by` activates the profile whenever the requirement is
/// followed; otherwise only when the requiring config has one of the listed
/// profiles active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileActivation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activated_by: Vec<String>,
}

impl ProfileActivation {
    pub fn always(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activated_by: Vec::new(),
        }
    }

    pub fn when<I, S>(name: impl Into<String>, activated_by: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            activated_by: activated_by.into_iter().map(Into::into).collect(),
        }
    }
}

/// One entry of a `requires` stanza.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// File or directory of the target document, relative to the requiring
    /// document. Absent means the requiring document itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Names to pull from the target document. Empty pulls all of them.
    #[serde(default)]
    pub configs: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_profiles: Vec<ProfileActivation>,
}

/// A named set of top-level payload sections replacing the base ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileDecl {
    pub name: String,
    #[serde(flatten)]
    pub overrides: Mapping,
}

/// A single config as declared in its document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigDecl {
    /// Empty only in a document holding exactly one config
    pub name: String,
    pub requires: Vec<Requirement>,
    pub payload: Payload,
    pub profiles: Vec<ProfileDecl>,
}

impl ConfigDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requires.push(requirement);
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_profile(mut self, profile: ProfileDecl) -> Self {
        self.profiles.push(profile);
        self
    }

    pub fn profile(&self, name: &str) -> Option<&ProfileDecl> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    requires: Vec<Requirement>,
    #[serde(default)]
    profiles: Vec<ProfileDecl>,
    #[serde(flatten)]
    payload: Mapping,
}

impl From<RawConfig> for ConfigDecl {
    fn from(raw: RawConfig) -> Self {
        Self {
            name: raw.metadata.name,
            requires: raw.requires,
            payload: Payload::new(raw.payload),
            profiles: raw.profiles,
        }
    }
}

/// The ordered configs declared in one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: NormalizedPath,
    configs: Vec<ConfigDecl>,
}

impl Document {
    /// Build a document, validating config and profile names.
    pub fn new(path: NormalizedPath, configs: Vec<ConfigDecl>) -> Result<Self> {
        let count = configs.len();
        let mut names = HashSet::new();
        for (index, config) in configs.iter().enumerate() {
            if config.name.is_empty() {
                if count > 1 {
                    return Err(Error::UnnamedConfig {
                        document: path.to_native(),
                        count,
                        index,
                    });
                }
            } else if !names.insert(config.name.as_str()) {
                return Err(Error::DuplicateConfig {
                    name: config.name.clone(),
                    document: path.to_native(),
                });
            }

            let mut profiles = HashSet::new();
            for profile in &config.profiles {
                if !profiles.insert(profile.name.as_str()) {
                    return Err(Error::DuplicateProfile {
                        name: config.name.clone(),
                        profile: profile.name.clone(),
                        document: path.to_native(),
                    });
                }
            }
        }
        Ok(Self { path, configs })
    }

    /// Parse a multi-config YAML stream. Empty entries are skipped.
    pub fn parse(path: NormalizedPath, content: &str) -> Result<Self> {
        let mut configs = Vec::new();
        for entry in serde_yaml::Deserializer::from_str(content) {
            let value = Value::deserialize(entry)
                .map_err(|e| Error::document_load(path.to_native(), e))?;
            if value.is_null() {
                continue;
            }
            let raw: RawConfig = serde_yaml::from_value(value)
                .map_err(|e| Error::document_load(path.to_native(), e))?;
            configs.push(ConfigDecl::from(raw));
        }
        Self::new(path, configs)
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn configs(&self) -> &[ConfigDecl] {
        &self.configs
    }

    pub fn get(&self, name: &str) -> Option<&ConfigDecl> {
        self.configs.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path() -> NormalizedPath {
        NormalizedPath::new("/work/deploy.yaml")
    }

    #[test]
    fn parse_splits_stream_into_configs() {
        let content = r#"
apiVersion: deploy/v1
kind: Config
metadata:
  name: cfg00
requires:
  - path: doc1
    configs: [cfg10]
    activeProfiles:
      - name: pf0
        activatedBy: [pf0]
build:
  artifacts:
    - image: image00
profiles:
  - name: pf0
    build:
      artifacts:
        - image: pf0image00
---
metadata:
  name: cfg01
"#;
        let doc = Document::parse(path(), content).unwrap();
        assert_eq!(doc.configs().len(), 2);

        let cfg00 = doc.get("cfg00").unwrap();
        assert_eq!(
            cfg00.requires,
            vec![Requirement {
                path: Some("doc1".into()),
                configs: vec!["cfg10".into()],
                active_profiles: vec![ProfileActivation::when("pf0", ["pf0"])],
            }]
        );
        assert!(cfg00.payload.get("build").is_some());
        assert!(cfg00.payload.get("kind").is_some());
        assert!(cfg00.payload.get("metadata").is_none());
        assert!(cfg00.payload.get("profiles").is_none());
        assert!(cfg00.profile("pf0").unwrap().overrides.contains_key("build"));

        assert!(doc.get("cfg01").unwrap().requires.is_empty());
    }

    #[test]
    fn parse_skips_empty_entries() {
        let doc = Document::parse(path(), "---\n---\nmetadata:\n  name: only\n---\n").unwrap();
        assert_eq!(doc.configs().len(), 1);
    }

    #[test]
    fn single_unnamed_config_is_allowed() {
        let doc = Document::parse(path(), "build: {}\n").unwrap();
        assert_eq!(doc.configs()[0].name, "");
    }

    #[test]
    fn unnamed_config_in_multi_config_document_is_rejected() {
        let err = Document::parse(path(), "metadata:\n  name: a\n---\nbuild: {}\n").unwrap_err();
        assert!(matches!(err, Error::UnnamedConfig { count: 2, index: 1, .. }), "got {err:?}");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Document::parse(path(), "metadata:\n  name: a\n---\nmetadata:\n  name: a\n")
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateConfig { .. }), "got {err:?}");
    }

    #[test]
    fn duplicate_profiles_are_rejected() {
        let content = "metadata:\n  name: a\nprofiles:\n  - name: p\n  - name: p\n";
        let err = Document::parse(path(), content).unwrap_err();
        assert!(matches!(err, Error::DuplicateProfile { .. }), "got {err:?}");
    }

    #[test]
    fn malformed_yaml_is_a_load_error() {
        let err = Document::parse(path(), "metadata: [unterminated\n").unwrap_err();
        assert!(matches!(err, Error::DocumentLoad { .. }), "got {err:?}");
    }
}
