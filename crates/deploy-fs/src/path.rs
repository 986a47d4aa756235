//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Construction lexically cleans the path: separators are unified, empty and
/// `.` components are dropped and `..` is folded into its parent where one
/// exists. Leading `..` components of a relative path are kept, since they
/// are meaningful once the path is joined onto a base directory.
///
/// Two `NormalizedPath`s compare equal when their cleaned text is equal, which
/// makes the type usable as a map key for document identity once the path has
/// been canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        Self { inner: clean(&raw) }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path is rooted (Unix root, drive letter or network share).
    pub fn is_absolute(&self) -> bool {
        !split_prefix(&self.inner).0.is_empty()
    }

    /// Join this path with a segment.
    ///
    /// A rooted segment replaces the base entirely, mirroring
    /// [`Path::join`].
    pub fn join(&self, segment: &str) -> Self {
        let segment = clean(segment);
        if !split_prefix(&segment).0.is_empty() {
            return Self { inner: segment };
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let (prefix, rest) = split_prefix(&self.inner);
        if rest.is_empty() {
            return None;
        }
        match rest.rfind('/') {
            Some(idx) => Some(Self {
                inner: format!("{prefix}{}", &rest[..idx]),
            }),
            None if !prefix.is_empty() => Some(Self {
                inner: prefix.to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let (_, rest) = split_prefix(&self.inner);
        rest.rsplit('/')
            .next()
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Resolve symlinks and relative components against the filesystem.
    ///
    /// Fails with [`Error::NotFound`] when the path does not exist.
    pub fn canonicalize(&self) -> Result<Self> {
        let native = self.to_native();
        dunce::canonicalize(&native)
            .map(Self::new)
            .map_err(|e| Error::io(native, e))
    }
}

/// Split a unified path into its root prefix and the remainder.
///
/// The prefix is `//` for network shares, `/` for Unix roots, `C:/` (or a
/// bare `C:`) for drive letters, and empty for relative paths.
fn split_prefix(path: &str) -> (&str, &str) {
    if path.starts_with("//") && !path.starts_with("///") {
        return ("//", &path[2..]);
    }
    if let Some(rest) = path.strip_prefix('/') {
        return ("/", rest);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        match bytes.get(2) {
            None => return (path, ""),
            Some(b'/') => return (&path[..3], &path[3..]),
            Some(_) => {}
        }
    }
    ("", path)
}

fn clean(raw: &str) -> String {
    let unified = raw.replace('\\', "/");
    let (prefix, rest) = split_prefix(&unified);
    let rooted = !prefix.is_empty();

    let mut parts: Vec<&str> = Vec::new();
    for component in rest.split('/') {
        match component {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // `..` above a root is the root itself
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return if rooted {
            prefix.to_string()
        } else {
            ".".to_string()
        };
    }
    format!("{prefix}{}", parts.join("/"))
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<NormalizedPath> for String {
    fn from(p: NormalizedPath) -> Self {
        p.inner
    }
}
