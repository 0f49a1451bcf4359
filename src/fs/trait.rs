//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;

/// File access used by content disambiguation
pub trait FileSystem: Send + Sync {
    /// Best-effort existence probe
    fn exists(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;
}
