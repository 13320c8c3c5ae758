//! Workspace configuration
//!
//! Runtime limits and scan settings for the edit substrate and the
//! exploration tools. Loaded from `<workspace>/.muninn.toml` when present,
//! falling back to defaults otherwise.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Config file name, resolved relative to the workspace root
pub const CONFIG_FILE_NAME: &str = ".muninn.toml";

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MuninnConfig {
    /// Directory names skipped by every workspace scan
    pub ignored_dirs: Vec<String>,

    /// File extensions treated as text (scanned by the exploration tools)
    pub text_extensions: Vec<String>,

    /// Maximum file size in bytes considered by scans
    pub max_file_size: u64,

    /// Maximum number of matches returned by `search_codebase`
    pub max_search_results: usize,

    /// Maximum number of lines returned by `read_file`
    pub max_read_lines: usize,

    /// Maximum number of files included in relevance context
    pub max_context_files: usize,
}

impl Default for MuninnConfig {
    fn default() -> Self {
        Self {
            ignored_dirs: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
                "dist".to_string(),
                "build".to_string(),
                "__pycache__".to_string(),
                ".venv".to_string(),
                "venv".to_string(),
            ],
            text_extensions: vec![
                "rs", "py", "js", "ts", "jsx", "tsx", "html", "css", "scss", "json", "yaml",
                "yml", "toml", "ini", "cfg", "conf", "txt", "md", "rst", "xml", "sql", "sh",
                "bash", "go", "java", "cpp", "c", "h", "hpp", "cs", "php", "rb", "swift", "kt",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_file_size: 1_048_576,
            max_search_results: 50,
            max_read_lines: 500,
            max_context_files: 5,
        }
    }
}

impl MuninnConfig {
    /// Load configuration for a workspace root
    ///
    /// Reads `<root>/.muninn.toml` if it exists. A missing file yields the
    /// defaults silently; an unreadable or malformed file yields the defaults
    /// with a warning, never an error.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!("no config file at {}, using defaults", path.display());
            return Self::default();
        }

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to parse {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check whether a directory name is excluded from scans
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }

    /// Check whether a file path has a recognized text extension
    pub fn is_text_file(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                let ext = ext.to_ascii_lowercase();
                self.text_extensions.iter().any(|t| t == &ext)
            }
            None => false,
        }
    }
}
