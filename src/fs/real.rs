use super::FileSystem;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than failing the read.
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).context(format!("Failed to read file {:?}", path))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exists() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();
        let fs = RealFileSystem::new();

        assert!(fs.exists(&temp.path().join("package.json")));
        assert!(!fs.exists(&temp.path().join("nonexistent")));
    }

    #[test]
    fn test_read_to_string() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("project.json"), "{\"frameworks\": {}}").unwrap();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("project.json")).unwrap();
        assert_eq!(content, "{\"frameworks\": {}}");
    }

    #[test]
    fn test_read_directory_fails() {
        let temp = TempDir::new().unwrap();
        let fs = RealFileSystem::new();

        assert!(fs.exists(temp.path()));
        assert!(fs.read_to_string(temp.path()).is_err());
    }

    #[test]
    fn test_read_invalid_utf8_is_lossy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        fs::write(&path, b"{\"description\": \"Caf\xe9\"}").unwrap();

        let content = RealFileSystem::new().read_to_string(&path).unwrap();
        assert_eq!(content, "{\"description\": \"Caf\u{FFFD}\"}");
    }
}
