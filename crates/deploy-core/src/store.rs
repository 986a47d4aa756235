//! Locating and loading configuration documents
//!
//! [`DocumentSource`] is the seam between the resolver and wherever
//! documents live. [`FileSource`] reads YAML files from disk and
//! [`MemorySource`] serves documents held in memory. [`DocumentStore`]
//! memoizes loads for the duration of one resolution run.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use deploy_fs::{DEFAULT_FILE_NAME, NormalizedPath, PathResolver, io};

use crate::document::Document;
use crate::{Error, Result};

/// Where documents live and how they are read.
pub trait DocumentSource {
    /// Identity of the root document named by the user.
    fn locate_root(&self, path: &Path) -> Result<NormalizedPath>;

    /// Identity of the document `reference` points at, relative to
    /// `document`. `None` refers to `document` itself.
    fn locate(&self, document: &NormalizedPath, reference: Option<&str>)
    -> Result<NormalizedPath>;

    /// Read and parse the document at a located path.
    fn load(&self, path: &NormalizedPath) -> Result<Document>;
}

/// Reads YAML documents from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    paths: PathResolver,
}

impl FileSource {
    pub fn new(paths: PathResolver) -> Self {
        Self { paths }
    }
}

impl DocumentSource for FileSource {
    fn locate_root(&self, path: &Path) -> Result<NormalizedPath> {
        self.paths
            .resolve_root(path)
            .map_err(Error::from_document_fs)
    }

    fn locate(
        &self,
        document: &NormalizedPath,
        reference: Option<&str>,
    ) -> Result<NormalizedPath> {
        self.paths
            .resolve(document, reference)
            .map_err(Error::from_document_fs)
    }

    fn load(&self, path: &NormalizedPath) -> Result<Document> {
        let content = io::read_text(path).map_err(Error::from_document_fs)?;
        Document::parse(path.clone(), &content)
    }
}

/// Serves documents from an in-memory map keyed by absolute path.
///
/// References are resolved lexically; a reference naming a directory
/// resolves to the default file inside it when that file is present.
#[derive(Debug, Clone)]
pub struct MemorySource {
    documents: HashMap<NormalizedPath, String>,
    default_file_name: String,
}

impl Default for MemorySource {
    fn default() -> Self {
        Self {
            documents: HashMap::new(),
            default_file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document. Relative paths are taken against `/`.
    pub fn with_document(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.documents.insert(absolute(path.as_ref()), content.into());
    }

    fn find(&self, candidate: NormalizedPath) -> Result<NormalizedPath> {
        if self.documents.contains_key(&candidate) {
            return Ok(candidate);
        }
        let in_dir = candidate.join(&self.default_file_name);
        if self.documents.contains_key(&in_dir) {
            return Ok(in_dir);
        }
        Err(Error::document_load(candidate.to_native(), "file not found"))
    }
}

fn absolute(path: &Path) -> NormalizedPath {
    let path = NormalizedPath::new(path);
    if path.is_absolute() {
        path
    } else {
        NormalizedPath::new("/").join(path.as_str())
    }
}

impl DocumentSource for MemorySource {
    fn locate_root(&self, path: &Path) -> Result<NormalizedPath> {
        self.find(absolute(path))
    }

    fn locate(
        &self,
        document: &NormalizedPath,
        reference: Option<&str>,
    ) -> Result<NormalizedPath> {
        let Some(reference) = reference.filter(|r| !r.trim().is_empty()) else {
            return Ok(document.clone());
        };
        let base = document
            .parent()
            .unwrap_or_else(|| NormalizedPath::new("/"));
        self.find(base.join(reference))
    }

    fn load(&self, path: &NormalizedPath) -> Result<Document> {
        let content = self
            .documents
            .get(path)
            .ok_or_else(|| Error::document_load(path.to_native(), "file not found"))?;
        Document::parse(path.clone(), content)
    }
}

/// Run-scoped cache of loaded documents.
///
/// Repeated loads of one path return the same parsed document, so a run
/// sees a consistent view even if files change underneath it.
pub struct DocumentStore<'a, S: DocumentSource + ?Sized> {
    source: &'a S,
    cache: HashMap<NormalizedPath, Rc<Document>>,
}

impl<'a, S: DocumentSource + ?Sized> DocumentStore<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    pub fn load(&mut self, path: &NormalizedPath) -> Result<Rc<Document>> {
        if let Some(document) = self.cache.get(path) {
            return Ok(Rc::clone(document));
        }
        tracing::debug!(%path, "Loading document");
        let document = Rc::new(self.source.load(path)?);
        self.cache.insert(path.clone(), Rc::clone(&document));
        Ok(document)
    }

    /// Number of distinct documents loaded so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    struct CountingSource {
        loads: Cell<usize>,
    }

    impl DocumentSource for CountingSource {
        fn locate_root(&self, path: &Path) -> Result<NormalizedPath> {
            Ok(NormalizedPath::new(path))
        }

        fn locate(&self, document: &NormalizedPath, _: Option<&str>) -> Result<NormalizedPath> {
            Ok(document.clone())
        }

        fn load(&self, path: &NormalizedPath) -> Result<Document> {
            self.loads.set(self.loads.get() + 1);
            Document::parse(path.clone(), "metadata:\n  name: a\n")
        }
    }

    #[test]
    fn store_loads_each_path_once() {
        let source = CountingSource { loads: Cell::new(0) };
        let mut store = DocumentStore::new(&source);
        let path = NormalizedPath::new("/work/deploy.yaml");

        let first = store.load(&path).unwrap();
        let second = store.load(&path).unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(source.loads.get(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_source_resolves_directories_and_parents() {
        let source = MemorySource::new()
            .with_document("deploy.yaml", "metadata:\n  name: a\n")
            .with_document("/doc1/deploy.yaml", "metadata:\n  name: b\n")
            .with_document("/doc1/extra.yaml", "metadata:\n  name: c\n");
        let root = source.locate_root(Path::new("deploy.yaml")).unwrap();
        assert_eq!(root.as_str(), "/deploy.yaml");

        let doc1 = source.locate(&root, Some("doc1")).unwrap();
        assert_eq!(doc1.as_str(), "/doc1/deploy.yaml");
        assert_eq!(source.locate(&doc1, Some("extra.yaml")).unwrap().as_str(), "/doc1/extra.yaml");
        assert_eq!(source.locate(&doc1, Some("../")).unwrap(), root);
        assert_eq!(source.locate(&doc1, None).unwrap(), doc1);
        assert!(source.locate(&doc1, Some("../doc2")).is_err());
    }

    #[test]
    fn file_source_reports_missing_documents() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("deploy.yaml"), "metadata:\n  name: a\n").unwrap();
        let source = FileSource::default();
        let root = source.locate_root(&temp.path().join("deploy.yaml")).unwrap();

        let err = source.locate(&root, Some("doc9")).unwrap_err();
        assert!(matches!(err, Error::DocumentLoad { .. }), "got {err:?}");
    }

    #[test]
    fn file_source_parses_documents() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("deploy.yaml"),
            "metadata:\n  name: a\n---\nmetadata:\n  name: b\n",
        )
        .unwrap();
        let source = FileSource::default();
        let root = source.locate_root(&temp.path().join("deploy.yaml")).unwrap();

        let document = source.load(&root).unwrap();
        assert_eq!(document.path(), &root);
        assert_eq!(document.configs().len(), 2);
    }
}
