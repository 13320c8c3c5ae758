//! search_codebase: content search over workspace text files
//!
//! In-process regex line scan. Returns structured matches with file path,
//! line number and line text, capped at the configured limit.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::walk::collect_text_files;
use crate::config::MuninnConfig;

/// A single search match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// File path relative to the workspace root
    pub file_path: String,
    /// Line number (1-indexed)
    pub line_number: usize,
    /// Full line text containing the match
    pub line: String,
}

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Search for a pattern in files under the workspace root
///
/// The pattern is a regex; a literal string works as-is unless it contains
/// regex metacharacters. Scanning stops once the configured match limit is
/// reached.
pub fn search_codebase(
    root: &Path,
    pattern: &str,
    config: &MuninnConfig,
) -> Result<Vec<SearchMatch>> {
    let re = Regex::new(pattern)?;
    let files = collect_text_files(root, config)?;

    let mut matches = Vec::new();
    'outer: for rel in files {
        let content = match fs::read_to_string(root.join(&rel)) {
            Ok(content) => content,
            Err(_) => continue,
        };
        for (idx, line) in content.lines().enumerate() {
            if re.is_match(line) {
                matches.push(SearchMatch {
                    file_path: rel.to_string_lossy().to_string(),
                    line_number: idx + 1,
                    line: line.to_string(),
                });
                if matches.len() >= config.max_search_results {
                    break 'outer;
                }
            }
        }
    }

    Ok(matches)
}

/// Render matches as context text for the model
pub fn format_matches(pattern: &str, matches: &[SearchMatch]) -> String {
    if matches.is_empty() {
        return format!("No matches for '{}'", pattern);
    }

    let mut out = format!("{} match(es) for '{}':\n", matches.len(), pattern);
    for m in matches {
        out.push_str(&format!("{}:{}: {}\n", m.file_path, m.line_number, m.line));
    }
    out
}
