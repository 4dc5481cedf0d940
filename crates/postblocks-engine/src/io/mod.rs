use crate::editing::DocumentStore;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document {path}: {source}")]
    InvalidDocument {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Document already exists: {0}")]
    AlreadyExists(PathBuf),
}

/// Read a document store from a JSON file
pub fn load_store(path: &Path) -> Result<DocumentStore, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(IoError::Io)?;
    serde_json::from_str(&content).map_err(|source| IoError::InvalidDocument {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document store as pretty JSON
pub fn save_store(path: &Path, store: &DocumentStore) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    let json = serde_json::to_string_pretty(store).map_err(|source| IoError::InvalidDocument {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json + "\n").map_err(IoError::Io)
}

/// Write a fresh default document, refusing to overwrite unless `force`
pub fn create_store(path: &Path, force: bool) -> Result<DocumentStore, IoError> {
    if path.exists() && !force {
        return Err(IoError::AlreadyExists(path.to_path_buf()));
    }
    let store = DocumentStore::default();
    save_store(path, &store)?;
    Ok(store)
}

/// Resolve a document name against a documents directory. Absolute paths
/// and paths with a directory component are used as given.
pub fn resolve_document_path(name: &Path, documents_dir: Option<&Path>) -> PathBuf {
    match documents_dir {
        Some(dir) if name.is_relative() && name.parent() == Some(Path::new("")) => dir.join(name),
        _ => name.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Cmd;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load_preserves_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/post.json");
        let mut store = DocumentStore::default();
        store.apply(Cmd::AddSection).unwrap();

        save_store(&path, &store).unwrap();
        let loaded = load_store(&path).unwrap();

        assert_eq!(loaded.languages(), store.languages());
        assert_eq!(loaded.current_language(), "en");
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let result = load_store(&path);

        assert!(matches!(result, Err(IoError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{\"languages\": []}").unwrap();

        let result = load_store(&path);

        assert!(matches!(result, Err(IoError::InvalidDocument { .. })));
    }

    #[test]
    fn test_load_rejects_section_without_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty-section.json");
        fs::write(
            &path,
            r#"{"languages":[{"code":"en","name":"English","sections":[{"id":"s1","columns":[]}]}]}"#,
        )
        .unwrap();

        let result = load_store(&path);

        assert!(matches!(result, Err(IoError::InvalidDocument { .. })));
    }

    #[test]
    fn test_create_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("post.json");

        create_store(&path, false).unwrap();
        assert!(matches!(
            create_store(&path, false),
            Err(IoError::AlreadyExists(_))
        ));
        assert!(create_store(&path, true).is_ok());
    }

    #[test]
    fn test_resolve_document_path() {
        let dir = Path::new("/docs");
        assert_eq!(
            resolve_document_path(Path::new("post.json"), Some(dir)),
            PathBuf::from("/docs/post.json")
        );
        assert_eq!(
            resolve_document_path(Path::new("./post.json"), Some(dir)),
            PathBuf::from("./post.json")
        );
        assert_eq!(
            resolve_document_path(Path::new("post.json"), None),
            PathBuf::from("post.json")
        );
    }
}
