//! get_codebase_overview: project-wide census
//!
//! Walks the workspace and summarizes file counts, line counts, language
//! distribution, top-level directories and key files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::language::language_for_path;
use super::walk::collect_text_files;
use crate::config::MuninnConfig;

/// Well-known files surfaced prominently in the overview
const KEY_FILE_NAMES: [&str; 8] = [
    "README.md",
    "Cargo.toml",
    "package.json",
    "pyproject.toml",
    "setup.py",
    "go.mod",
    "Makefile",
    "Dockerfile",
];

/// Project-wide overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodebaseOverview {
    pub total_files: usize,
    pub total_lines: usize,
    /// Language name to file count
    pub languages: BTreeMap<String, usize>,
    pub main_directories: Vec<String>,
    pub key_files: Vec<String>,
}

/// Build the overview for a workspace root
pub fn codebase_overview(root: &Path, config: &MuninnConfig) -> Result<CodebaseOverview> {
    let files = collect_text_files(root, config)
        .with_context(|| format!("failed to scan workspace {}", root.display()))?;

    let mut total_lines = 0;
    let mut languages: BTreeMap<String, usize> = BTreeMap::new();
    for rel in &files {
        let content = fs::read_to_string(root.join(rel)).unwrap_or_default();
        total_lines += content.lines().count();
        *languages
            .entry(language_for_path(rel).to_string())
            .or_insert(0) += 1;
    }

    let mut main_directories: Vec<String> = fs::read_dir(root)
        .with_context(|| format!("failed to list {}", root.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| !name.starts_with('.') && !config.is_ignored_dir(name))
        .collect();
    main_directories.sort();

    let key_files: Vec<String> = KEY_FILE_NAMES
        .iter()
        .filter(|name| root.join(name).exists())
        .map(|name| name.to_string())
        .collect();

    Ok(CodebaseOverview {
        total_files: files.len(),
        total_lines,
        languages,
        main_directories,
        key_files,
    })
}

/// Render an overview as context text for the model
pub fn format_overview(overview: &CodebaseOverview) -> String {
    let mut lines = vec![
        "## Codebase Overview".to_string(),
        format!(
            "**Project**: {} files, {} lines of code",
            overview.total_files, overview.total_lines
        ),
    ];

    if !overview.languages.is_empty() {
        let mut by_count: Vec<_> = overview.languages.iter().collect();
        by_count.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        let langs: Vec<String> = by_count
            .iter()
            .take(5)
            .map(|(lang, count)| format!("{} ({} files)", lang, count))
            .collect();
        lines.push(format!("**Languages**: {}", langs.join(", ")));
    }

    if !overview.main_directories.is_empty() {
        lines.push(format!(
            "**Main Directories**: {}",
            overview.main_directories.join(", ")
        ));
    }
    if !overview.key_files.is_empty() {
        lines.push(format!("**Key Files**: {}", overview.key_files.join(", ")));
    }

    lines.join("\n")
}
