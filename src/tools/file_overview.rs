//! get_file_overview: per-file summary
//!
//! Language, line count and declared elements (functions, types, classes)
//! detected with line-level heuristics. Deliberately not an AST parse: the
//! summary feeds model context, where approximate structure is enough.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::language::language_for_path;

/// A declared element found in a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileElement {
    /// Element kind ("function", "struct", "class", ...)
    pub kind: String,
    pub name: String,
    /// Line of the declaration (1-indexed)
    pub line: usize,
}

/// Summary of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOverview {
    pub path: String,
    pub language: String,
    pub total_lines: usize,
    pub elements: Vec<FileElement>,
}

/// Errors from file overview
#[derive(Error, Debug)]
pub enum FileOverviewError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for file overview operations
pub type Result<T> = std::result::Result<T, FileOverviewError>;

/// Build the overview for one workspace-relative file
pub fn file_overview(root: &Path, rel_path: &str) -> Result<FileOverview> {
    let full = root.join(rel_path);
    if !full.exists() {
        return Err(FileOverviewError::NotFound(rel_path.to_string()));
    }
    let content = fs::read_to_string(&full)?;
    let language = language_for_path(Path::new(rel_path));

    Ok(FileOverview {
        path: rel_path.to_string(),
        language: language.to_string(),
        total_lines: content.lines().count(),
        elements: detect_elements(&content, language),
    })
}

/// Declaration patterns per language family: (kind, pattern with one
/// capture group for the name)
fn declaration_patterns(language: &str) -> Vec<(&'static str, &'static str)> {
    match language {
        "rust" => vec![
            ("function", r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?fn\s+(\w+)"),
            ("struct", r"^\s*(?:pub(?:\([^)]*\))?\s+)?struct\s+(\w+)"),
            ("enum", r"^\s*(?:pub(?:\([^)]*\))?\s+)?enum\s+(\w+)"),
            ("trait", r"^\s*(?:pub(?:\([^)]*\))?\s+)?trait\s+(\w+)"),
        ],
        "python" => vec![
            ("function", r"^\s*def\s+(\w+)"),
            ("class", r"^\s*class\s+(\w+)"),
        ],
        "javascript" | "typescript" | "jsx" | "tsx" => vec![
            ("function", r"^\s*(?:export\s+)?(?:async\s+)?function\s+(\w+)"),
            ("class", r"^\s*(?:export\s+)?class\s+(\w+)"),
            ("const", r"^\s*(?:export\s+)?const\s+(\w+)\s*="),
        ],
        "go" => vec![
            ("function", r"^func\s+(?:\([^)]*\)\s+)?(\w+)"),
            ("type", r"^type\s+(\w+)"),
        ],
        _ => Vec::new(),
    }
}

/// Scan the content for declarations
fn detect_elements(content: &str, language: &str) -> Vec<FileElement> {
    let patterns: Vec<(&str, Regex)> = declaration_patterns(language)
        .into_iter()
        .filter_map(|(kind, pattern)| Regex::new(pattern).ok().map(|re| (kind, re)))
        .collect();

    let mut elements = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        for (kind, re) in &patterns {
            if let Some(caps) = re.captures(line) {
                if let Some(name) = caps.get(1) {
                    elements.push(FileElement {
                        kind: kind.to_string(),
                        name: name.as_str().to_string(),
                        line: idx + 1,
                    });
                }
                break;
            }
        }
    }
    elements
}

/// Render a file overview as context text for the model
pub fn format_file_overview(overview: &FileOverview) -> String {
    let mut out = format!(
        "{} ({}, {} lines)\n",
        overview.path, overview.language, overview.total_lines
    );
    if overview.elements.is_empty() {
        out.push_str("No declared elements detected.\n");
    } else {
        for element in &overview.elements {
            out.push_str(&format!(
                "  {} {} (line {})\n",
                element.kind, element.name, element.line
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rust_elements() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("lib.rs"),
            "pub struct Config;\n\npub fn load() {}\n\nfn helper() {}\n",
        )
        .unwrap();

        let overview = file_overview(temp_dir.path(), "lib.rs").unwrap();
        assert_eq!(overview.language, "rust");
        assert_eq!(overview.total_lines, 5);
        assert_eq!(overview.elements.len(), 3);
        assert_eq!(overview.elements[0].kind, "struct");
        assert_eq!(overview.elements[0].name, "Config");
        assert_eq!(overview.elements[1].name, "load");
        assert_eq!(overview.elements[1].line, 3);
    }

    #[test]
    fn test_python_elements() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("app.py"),
            "class Editor:\n    def apply(self):\n        pass\n",
        )
        .unwrap();

        let overview = file_overview(temp_dir.path(), "app.py").unwrap();
        let kinds: Vec<&str> = overview.elements.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["class", "function"]);
    }

    #[test]
    fn test_unknown_language_no_elements() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "some notes\n").unwrap();

        let overview = file_overview(temp_dir.path(), "notes.txt").unwrap();
        assert!(overview.elements.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = file_overview(temp_dir.path(), "ghost.rs").unwrap_err();
        assert!(matches!(err, FileOverviewError::NotFound(_)));
    }
}
