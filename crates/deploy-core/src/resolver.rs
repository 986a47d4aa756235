//! Dependency-first resolution of configs across documents
//!
//! Resolution is a post-order depth-first walk starting from the root
//! document's configs in declaration order. Each config is visited at most
//! once per run: its active profiles are fixed on first visit and it is
//! emitted after everything it requires, so the output can be processed left
//! to right.
//!
//! A config reached again while it is still being resolved closes a cycle.
//! That edge is skipped without error; the visit that is already in progress
//! completes and emits the config as usual.

use std::collections::HashMap;
use std::path::Path;

use deploy_fs::{NormalizedPath, PathResolver};
use serde::Serialize;

use crate::activation::{ProfileSet, activate};
use crate::document::{ConfigDecl, Document, ProfileActivation};
use crate::options::ResolveOptions;
use crate::payload::{Payload, PayloadSelector, ProfileOverlay};
use crate::selection;
use crate::store::{DocumentSource, DocumentStore, FileSource};
use crate::{Error, Result};

/// Identity of a config: the canonical path of its document and its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConfigId {
    pub document: NormalizedPath,
    pub name: String,
}

impl ConfigId {
    pub fn new(document: NormalizedPath, name: impl Into<String>) -> Self {
        Self {
            document,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ConfigId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            write!(f, "<unnamed> ({})", self.document)
        } else {
            write!(f, "{} ({})", self.name, self.document)
        }
    }
}

/// A requirement edge with its target document resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRequirement {
    /// Canonical path of the target document
    pub path: NormalizedPath,
    /// Target names, with an empty declaration expanded to every config
    /// of the target document
    pub configs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_profiles: Vec<ProfileActivation>,
}

/// A config ready for execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    #[serde(flatten)]
    pub id: ConfigId,
    pub requires: Vec<ResolvedRequirement>,
    pub active_profiles: ProfileSet,
    pub payload: Payload,
}

impl ResolvedConfig {
    pub fn name(&self) -> &str {
        &self.id.name
    }

    pub fn document(&self) -> &NormalizedPath {
        &self.id.document
    }

    /// Identities of the configs this one directly requires.
    pub fn dependencies(&self) -> impl Iterator<Item = ConfigId> + '_ {
        self.requires.iter().flat_map(|requirement| {
            requirement
                .configs
                .iter()
                .map(|name| ConfigId::new(requirement.path.clone(), name.clone()))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Resolves a root document into an ordered, dependency-complete list.
///
/// The resolver itself holds no per-run state and can be reused; every call
/// to [`Resolver::resolve`] starts from an empty visitation map and an empty
/// document cache.
#[derive(Debug, Clone, Default)]
pub struct Resolver<S = FileSource, P = ProfileOverlay> {
    source: S,
    selector: P,
}

impl Resolver {
    /// Resolver reading documents from disk, with `default_file_name` taken
    /// from `options`.
    pub fn from_options(options: &ResolveOptions) -> Self {
        Self::with_parts(
            FileSource::new(PathResolver::new(options.default_file_name.clone())),
            ProfileOverlay,
        )
    }
}

impl<S: DocumentSource, P: PayloadSelector> Resolver<S, P> {
    pub fn with_parts(source: S, selector: P) -> Self {
        Self { source, selector }
    }

    /// Resolve every config reachable from `root`.
    ///
    /// `profiles` are active on the root document's configs only; they reach
    /// other configs solely through activation rules. A non-empty `filter`
    /// keeps the named configs plus everything they depend on.
    pub fn resolve<R, F>(
        &self,
        root: impl AsRef<Path>,
        profiles: &[R],
        filter: &[F],
    ) -> Result<Vec<ResolvedConfig>>
    where
        R: AsRef<str>,
        F: AsRef<str>,
    {
        let root = self.source.locate_root(root.as_ref())?;
        let global: ProfileSet = profiles.iter().map(|p| p.as_ref()).collect();
        tracing::debug!(%root, profiles = %global, "Resolving configs");

        let mut run = Run {
            store: DocumentStore::new(&self.source),
            selector: &self.selector,
            state: HashMap::new(),
            resolved: Vec::new(),
        };

        let document = run.store.load(&root)?;
        for config in document.configs() {
            run.visit(&document, config, global.clone())?;
        }

        tracing::debug!(
            configs = run.resolved.len(),
            documents = run.store.len(),
            "Resolved config graph"
        );

        if filter.is_empty() {
            return Ok(run.resolved);
        }
        let requested: Vec<String> = filter.iter().map(|f| f.as_ref().to_string()).collect();
        selection::select(run.resolved, &requested)
    }
}

/// State owned by a single resolution run.
struct Run<'a, S: DocumentSource, P: PayloadSelector> {
    store: DocumentStore<'a, S>,
    selector: &'a P,
    state: HashMap<ConfigId, VisitState>,
    resolved: Vec<ResolvedConfig>,
}

impl<S: DocumentSource, P: PayloadSelector> Run<'_, S, P> {
    fn visit(&mut self, document: &Document, config: &ConfigDecl, profiles: ProfileSet) -> Result<()> {
        let id = ConfigId::new(document.path().clone(), config.name.clone());
        match self.state.get(&id) {
            Some(VisitState::Done) => {
                tracing::trace!(%id, "Already resolved");
                return Ok(());
            }
            Some(VisitState::InProgress) => {
                tracing::trace!(%id, "Cycle detected; skipping edge");
                return Ok(());
            }
            None => {}
        }
        self.state.insert(id.clone(), VisitState::InProgress);
        tracing::debug!(%id, profiles = %profiles, "Visiting config");

        let mut requires = Vec::with_capacity(config.requires.len());
        for requirement in &config.requires {
            let target_path = self
                .store
                .source()
                .locate(document.path(), requirement.path.as_deref())?;
            let target = self.store.load(&target_path)?;

            let names: Vec<String> = if requirement.configs.is_empty() {
                target.configs().iter().map(|c| c.name.clone()).collect()
            } else {
                requirement.configs.clone()
            };
            let next = activate(&profiles, &requirement.active_profiles);

            for name in &names {
                // An unnamed config is only reachable through an empty target list
                let found = if requirement.configs.is_empty() || !name.is_empty() {
                    target.get(name)
                } else {
                    None
                };
                let required = found.ok_or_else(|| Error::NameNotFound {
                    name: name.clone(),
                    document: target_path.to_native(),
                    required_by: id.to_string(),
                })?;
                self.visit(&target, required, next.clone())?;
            }

            requires.push(ResolvedRequirement {
                path: target_path,
                configs: names,
                active_profiles: requirement.active_profiles.clone(),
            });
        }

        let payload = self.selector.select(config, &profiles)?;
        self.state.insert(id.clone(), VisitState::Done);
        self.resolved.push(ResolvedConfig {
            id,
            requires,
            active_profiles: profiles,
            payload,
        });
        Ok(())
    }
}
