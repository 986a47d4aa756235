//! Error types for deploy-core

use std::path::PathBuf;

/// Result type for deploy-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving configurations.
///
/// Every variant is fatal: resolution stops at the first error and no
/// partial result is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced document is missing or could not be parsed
    #[error("Failed to load configuration document {path}: {reason}")]
    DocumentLoad { path: PathBuf, reason: String },

    /// A requirement names a config its target document does not declare
    #[error("Did not find config '{name}' in {document} (required by {required_by})")]
    NameNotFound {
        name: String,
        document: PathBuf,
        required_by: String,
    },

    /// No resolved config matched the requested selection
    #[error("did not find any configs matching selection {}", bracketed(.requested))]
    SelectionNotFound { requested: Vec<String> },

    /// A multi-config document contains a config without a name
    #[error("Document {document} declares {count} configs but config #{index} has no metadata.name")]
    UnnamedConfig {
        document: PathBuf,
        count: usize,
        index: usize,
    },

    /// A config name appears twice in one document
    #[error("Config '{name}' is declared more than once in {document}")]
    DuplicateConfig { name: String, document: PathBuf },

    /// A profile name appears twice in one config
    #[error("Profile '{profile}' is declared more than once in config '{name}' ({document})")]
    DuplicateProfile {
        name: String,
        profile: String,
        document: PathBuf,
    },

    /// Filesystem error from deploy-fs
    #[error(transparent)]
    Fs(#[from] deploy_fs::Error),
}

impl Error {
    pub fn document_load(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::DocumentLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Classify a filesystem error raised while locating or reading a document.
    pub(crate) fn from_document_fs(err: deploy_fs::Error) -> Self {
        match err {
            deploy_fs::Error::NotFound { path } => Self::document_load(path, "file not found"),
            deploy_fs::Error::Io { path, source } => Self::document_load(path, source),
            other => Self::Fs(other),
        }
    }
}

fn bracketed(items: &[String]) -> String {
    format!("[{}]", items.join(" "))
}
