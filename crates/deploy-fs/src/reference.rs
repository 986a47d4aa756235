//! Resolution of cross-document references into canonical document paths

use std::path::Path;

use crate::{Error, NormalizedPath, Result};

/// File looked up when a reference points at a directory.
pub const DEFAULT_FILE_NAME: &str = "deploy.yaml";

/// Turns document references into canonical absolute document paths.
///
/// The canonical path is the document's identity: two references that reach
/// the same file through different spellings (`../doc2`, `./doc2/`, a
/// symlink) resolve to the same `NormalizedPath`.
#[derive(Debug, Clone)]
pub struct PathResolver {
    default_file_name: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl PathResolver {
    pub fn new(default_file_name: impl Into<String>) -> Self {
        Self {
            default_file_name: default_file_name.into(),
        }
    }

    pub fn default_file_name(&self) -> &str {
        &self.default_file_name
    }

    /// Resolve the root document path given by the user.
    ///
    /// Relative paths are taken against the current working directory.
    pub fn resolve_root(&self, path: impl AsRef<Path>) -> Result<NormalizedPath> {
        let path = path.as_ref();
        let absolute = if path.is_absolute() {
            NormalizedPath::new(path)
        } else {
            let cwd = std::env::current_dir().map_err(|e| Error::io(path, e))?;
            NormalizedPath::new(cwd.join(path))
        };
        self.to_document(absolute)
    }

    /// Resolve `reference` relative to the directory holding `document`.
    ///
    /// `None` refers to `document` itself.
    pub fn resolve(
        &self,
        document: &NormalizedPath,
        reference: Option<&str>,
    ) -> Result<NormalizedPath> {
        let Some(reference) = reference.filter(|r| !r.trim().is_empty()) else {
            return Ok(document.clone());
        };
        let base = document
            .parent()
            .unwrap_or_else(|| NormalizedPath::new("."));
        self.to_document(base.join(reference))
    }

    fn to_document(&self, path: NormalizedPath) -> Result<NormalizedPath> {
        let canonical = path.canonicalize()?;
        if canonical.is_dir() {
            tracing::trace!(dir = %canonical, file = %self.default_file_name, "Reference points at a directory");
            return canonical.join(&self.default_file_name).canonicalize();
        }
        Ok(canonical)
    }
}
