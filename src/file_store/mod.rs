//! File store: the authoritative content collaborator
//!
//! The edit applier talks to the workspace through the `FileStore` trait:
//! `read` returns the current content of a path (or `None` if absent) and
//! `write` replaces it atomically. Implementations must provide
//! read-your-writes consistency within a session.

mod workspace;

pub use workspace::WorkspaceStore;

use thiserror::Error;

/// Errors surfaced by file store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Path escapes the workspace root: {0}")]
    PathOutsideWorkspace(String),

    #[error("Absolute paths are not accepted: {0}")]
    AbsolutePath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for file store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Authoritative file content store
///
/// Paths are workspace-relative. The write primitive is all-or-nothing at
/// single-file granularity; multi-file coordination belongs to the caller.
pub trait FileStore {
    /// Read the current content of a path, `None` if the file does not exist
    fn read(&self, path: &str) -> Result<Option<String>>;

    /// Atomically replace the content of a path, creating it if absent
    fn write(&mut self, path: &str, content: &str) -> Result<()>;
}
