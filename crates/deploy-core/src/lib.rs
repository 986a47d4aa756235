//! Configuration dependency resolution for deploy-graph
//!
//! A deployment is described by configs spread over many YAML documents.
//! Configs may *require* configs declared elsewhere, optionally activating
//! profiles on them. This crate turns a root document into a single ordered
//! list in which every config follows everything it requires:
//!
//! - **Documents** ([`document`]): parsing and validation of multi-config
//!   YAML streams
//! - **Sources** ([`store`]): where documents are located and read, with a
//!   per-run cache
//! - **Activation** ([`activation`]): which profiles a requirement enables
//! - **Payloads** ([`payload`]): picking the profile variant a config carries
//! - **Resolution** ([`resolver`]): cycle-safe dependency-first traversal
//! - **Selection** ([`selection`]): narrowing the result to requested names
//!   and their dependencies
//!
//! # Example
//!
//! ```no_run
//! use deploy_core::{ResolveOptions, resolve};
//!
//! let options = ResolveOptions {
//!     profiles: vec!["staging".into()],
//!     ..ResolveOptions::default()
//! };
//! for config in resolve(&options)? {
//!     println!("{}", config.id);
//! }
//! # Ok::<(), deploy_core::Error>(())
//! ```

pub mod activation;
pub mod document;
pub mod error;
pub mod options;
pub mod payload;
pub mod resolver;
pub mod selection;
pub mod store;

pub use activation::{ProfileSet, activate};
pub use document::{ConfigDecl, Document, ProfileActivation, ProfileDecl, Requirement};
pub use error::{Error, Result};
pub use options::ResolveOptions;
pub use payload::{Payload, PayloadSelector, ProfileOverlay};
pub use resolver::{ConfigId, ResolvedConfig, ResolvedRequirement, Resolver};
pub use selection::select;
pub use store::{DocumentSource, DocumentStore, FileSource, MemorySource};

/// Resolve the configs described by `options` from disk.
pub fn resolve(options: &ResolveOptions) -> Result<Vec<ResolvedConfig>> {
    Resolver::from_options(options).resolve(
        &options.config_file,
        &options.profiles,
        &options.configs,
    )
}
