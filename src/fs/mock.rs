use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone)]
pub enum MockEntry {
    Content(String),
    /// Raw bytes, decoded lossily on read like the real file system
    Bytes(Vec<u8>),
    /// Exists, but every read fails with this message
    Unreadable(String),
}

/// In-memory file system keyed by the exact path passed in.
///
/// Counts every call so tests can assert which paths touched the file system.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    exists_calls: AtomicUsize,
    read_calls: AtomicUsize,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.insert(path.as_ref(), MockEntry::Content(content.to_string()));
    }

    pub fn add_bytes(&self, path: impl AsRef<Path>, content: &[u8]) {
        self.insert(path.as_ref(), MockEntry::Bytes(content.to_vec()));
    }

    pub fn add_unreadable(&self, path: impl AsRef<Path>, message: &str) {
        self.insert(path.as_ref(), MockEntry::Unreadable(message.to_string()));
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), entry);
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    /// Total number of file system calls made so far
    pub fn total_calls(&self) -> usize {
        self.exists_calls() + self.read_calls()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        match files.get(path) {
            Some(MockEntry::Content(content)) => Ok(content.clone()),
            Some(MockEntry::Bytes(bytes)) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            Some(MockEntry::Unreadable(message)) => Err(anyhow!("{}: {:?}", message, path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file() {
        let fs = MockFileSystem::new();
        fs.add_file("/path/to/project.json", "{}");

        assert!(fs.exists(Path::new("/path/to/project.json")));
        assert!(!fs.exists(Path::new("project.json")));
        assert_eq!(fs.exists_calls(), 2);
    }

    #[test]
    fn test_read_to_string() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{\"name\": \"app\"}");

        let content = fs.read_to_string(Path::new("package.json")).unwrap();
        assert_eq!(content, "{\"name\": \"app\"}");
        assert_eq!(fs.read_calls(), 1);
    }

    #[test]
    fn test_bytes_decoded_lossily() {
        let fs = MockFileSystem::new();
        fs.add_bytes("package.json", b"{\"name\": \"caf\xe9\"}");

        let content = fs.read_to_string(Path::new("package.json")).unwrap();
        assert_eq!(content, "{\"name\": \"caf\u{FFFD}\"}");
    }

    #[test]
    fn test_unreadable_file() {
        let fs = MockFileSystem::new();
        fs.add_unreadable("project.json", "EACCES: permission denied");

        assert!(fs.exists(Path::new("project.json")));
        let err = fs.read_to_string(Path::new("project.json")).unwrap_err();
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_missing_file() {
        let fs = MockFileSystem::new();
        assert!(fs.read_to_string(Path::new("missing.json")).is_err());
        assert_eq!(fs.total_calls(), 1);
    }
}
