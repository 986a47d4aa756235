//! Text I/O for configuration documents

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_text_returns_content() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("deploy.yaml");
        fs::write(&file, "kind: Config\n").unwrap();

        let content = read_text(&NormalizedPath::new(&file)).unwrap();
        assert_eq!(content, "kind: Config\n");
    }

    #[test]
    fn read_text_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let file = NormalizedPath::new(temp.path().join("missing.yaml"));

        let err = read_text(&file).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }), "got: {err:?}");
    }
}
