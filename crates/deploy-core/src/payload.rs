//! Opaque config payloads and profile-variant selection

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::Result;
use crate::activation::ProfileSet;
use crate::document::ConfigDecl;

/// Top-level payload sections of a config, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Mapping);

impl Payload {
    pub fn new(sections: Mapping) -> Self {
        Self(sections)
    }

    pub fn get(&self, section: &str) -> Option<&Value> {
        self.0.get(section)
    }

    /// Set `section`, replacing an existing one in place.
    pub fn insert(&mut self, section: Value, value: Value) {
        self.0.insert(section, value);
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    pub fn into_inner(self) -> Mapping {
        self.0
    }
}

/// Chooses which payload variant a resolved config carries.
///
/// Called once per config, when it is emitted, with the profiles it was
/// resolved with.
pub trait PayloadSelector {
    fn select(&self, config: &ConfigDecl, profiles: &ProfileSet) -> Result<Payload>;
}

/// Applies active profiles in activation order, each replacing whole
/// top-level sections of the base payload.
///
/// Profiles the config does not declare are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileOverlay;

impl PayloadSelector for ProfileOverlay {
    fn select(&self, config: &ConfigDecl, profiles: &ProfileSet) -> Result<Payload> {
        let mut payload = config.payload.clone();
        for name in profiles.iter() {
            let Some(profile) = config.profile(name) else {
                tracing::trace!(config = %config.name, profile = name, "Profile not declared; skipping");
                continue;
            };
            for (section, value) in &profile.overrides {
                payload.insert(section.clone(), value.clone());
            }
        }
        Ok(payload)
    }
}
