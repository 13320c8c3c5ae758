//! WorkspaceStore: filesystem-backed file store
//!
//! Resolves workspace-relative paths under a fixed root and writes
//! atomically using the write+fsync+rename pattern. Parent directories are
//! created on write so whole-file blocks can create nested paths.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use super::{FileStore, Result, StoreError};

/// Filesystem-backed store rooted at a workspace directory
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    root: PathBuf,
}

impl WorkspaceStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace root this store resolves against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a workspace-relative path, rejecting traversal and absolutes
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let rel = Path::new(path);
        if rel.is_absolute() {
            return Err(StoreError::AbsolutePath(path.to_string()));
        }
        for component in rel.components() {
            match component {
                Component::ParentDir => {
                    return Err(StoreError::PathOutsideWorkspace(path.to_string()))
                }
                Component::Prefix(_) | Component::RootDir => {
                    return Err(StoreError::AbsolutePath(path.to_string()))
                }
                Component::CurDir | Component::Normal(_) => {}
            }
        }
        Ok(self.root.join(rel))
    }
}

impl FileStore for WorkspaceStore {
    fn read(&self, path: &str) -> Result<Option<String>> {
        let full = self.resolve(path)?;
        if !full.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&full)?))
    }

    fn write(&mut self, path: &str, content: &str) -> Result<()> {
        let full = self.resolve(path)?;

        if let Some(parent) = full.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Atomic write pattern: temp file + fsync + rename
        let temp_path = full.with_extension("muninn.tmp");
        {
            let mut temp_file = File::create(&temp_path)?;
            temp_file.write_all(content.as_bytes())?;
            temp_file.sync_all()?;
        }
        fs::rename(&temp_path, &full)?;

        Ok(())
    }
}
