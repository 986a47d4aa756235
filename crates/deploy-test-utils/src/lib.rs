//! Document tree fixtures for resolver tests.
//!
//! Builds directory trees of multi-config documents in a temporary
//! directory. Every config rendered by [`DocumentTree::write`] carries a
//! `build` section naming an image unique to its position in the tree, plus
//! two profiles (`pf0`, `pf1`) that swap that image for a prefixed variant.
//! Tests can therefore tell from a resolved payload which profile, if any,
//! was applied.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// One config to render: its name and the raw YAML of its `requires`
/// stanza (empty for none).
#[derive(Debug, Clone, Copy)]
pub struct ConfigFixture<'a> {
    pub name: &'a str,
    pub requires: &'a str,
}

/// Shorthand for a [`ConfigFixture`].
pub const fn cfg<'a>(name: &'a str, requires: &'a str) -> ConfigFixture<'a> {
    ConfigFixture { name, requires }
}

/// Render one config with the standard build section and profiles.
pub fn render_config(name: &str, requires: &str, id: &str) -> String {
    format!(
        r#"
apiVersion: deploy/v1
kind: Config
metadata:
  name: {name}
{requires}
build:
  artifacts:
  - image: image{id}
profiles:
- name: pf0
  build:
    artifacts:
    - image: pf0image{id}
- name: pf1
  build:
    artifacts:
    - image: pf1image{id}
"#
    )
}

/// A temporary directory holding a tree of documents.
///
/// The directory is deleted when the tree is dropped.
pub struct DocumentTree {
    dir: TempDir,
    documents: usize,
}

impl DocumentTree {
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = TempDir::new()
            .unwrap_or_else(|e| panic!("DocumentTree: failed to create temp dir: {e}"));
        Self { dir, documents: 0 }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a document of rendered configs at `relative`.
    ///
    /// Documents are numbered in write order; config `j` of document `i`
    /// gets image id `{i}{j}`.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&mut self, relative: &str, configs: &[ConfigFixture<'_>]) -> PathBuf {
        let index = self.documents;
        self.documents += 1;
        let rendered: Vec<String> = configs
            .iter()
            .enumerate()
            .map(|(j, c)| render_config(c.name, c.requires, &format!("{index}{j}")))
            .collect();
        self.write_raw(relative, &rendered.join("\n---\n"))
    }

    /// Write `content` verbatim at `relative`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write_raw(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("DocumentTree: failed to create {}: {e}", parent.display())
            });
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("DocumentTree: failed to write {}: {e}", path.display()));
        path
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}
