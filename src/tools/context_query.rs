//! Natural-language context tools
//!
//! Keyword-scored relevance over the workspace, backing three tools:
//! - query_codebase_natural_language: answer a question with the files and
//!   lines most related to it
//! - get_relevant_codebase_context: snippets for a task description
//! - get_ai_codebase_context: condensed project summary for system context
//!
//! Scoring is deliberately simple (keyword occurrence counts plus a
//! filename bonus); ranking quality beyond that is not this layer's job.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Result;

use super::overview::{codebase_overview, format_overview};
use super::walk::collect_text_files;
use crate::config::MuninnConfig;

/// Words too generic to carry relevance signal
const STOPWORDS: [&str; 16] = [
    "the", "and", "for", "that", "this", "with", "from", "what", "where", "how", "does", "code",
    "file", "function", "which", "are",
];

/// Filename hits count this many times a content hit
const FILENAME_BONUS: usize = 10;

/// A file scored against a query
struct ScoredFile {
    path: String,
    score: usize,
    /// (line number, line text) for the first few matching lines
    hits: Vec<(usize, String)>,
}

/// Extract scoring keywords from a natural-language query
fn keywords(query: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    query
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .map(|w| w.to_ascii_lowercase())
        .filter(|w| w.len() >= 3 && !STOPWORDS.contains(&w.as_str()))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Score every workspace file against the query, best first
fn rank_files(root: &Path, query: &str, config: &MuninnConfig) -> Result<Vec<ScoredFile>> {
    let words = keywords(query);
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let mut scored = Vec::new();
    for rel in collect_text_files(root, config)? {
        let rel_str = rel.to_string_lossy().to_string();
        let rel_lower = rel_str.to_ascii_lowercase();

        let mut score = words
            .iter()
            .filter(|w| rel_lower.contains(*w))
            .count()
            * FILENAME_BONUS;
        let mut hits = Vec::new();

        let content = fs::read_to_string(root.join(&rel)).unwrap_or_default();
        for (idx, line) in content.lines().enumerate() {
            let lower = line.to_ascii_lowercase();
            let line_hits = words.iter().filter(|w| lower.contains(*w)).count();
            if line_hits > 0 {
                score += line_hits;
                if hits.len() < 3 {
                    hits.push((idx + 1, line.trim_end().to_string()));
                }
            }
        }

        if score > 0 {
            scored.push(ScoredFile {
                path: rel_str,
                score,
                hits,
            });
        }
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score).then(a.path.cmp(&b.path)));
    scored.truncate(config.max_context_files);
    Ok(scored)
}

/// query_codebase_natural_language
pub fn query_codebase(root: &Path, query: &str, config: &MuninnConfig) -> Result<String> {
    let ranked = rank_files(root, query, config)?;
    if ranked.is_empty() {
        return Ok(format!("No files in the workspace relate to '{}'", query));
    }

    let mut out = format!("Files most relevant to '{}':\n", query);
    for file in &ranked {
        out.push_str(&format!("\n{} (relevance {})\n", file.path, file.score));
        for (line_no, text) in &file.hits {
            out.push_str(&format!("  {}: {}\n", line_no, text));
        }
    }
    Ok(out)
}

/// get_relevant_codebase_context
pub fn relevant_context(root: &Path, query: &str, config: &MuninnConfig) -> Result<String> {
    let ranked = rank_files(root, query, config)?;
    if ranked.is_empty() {
        return Ok(format!("No relevant context found for '{}'", query));
    }

    let mut out = format!("## Relevant Context: {}\n", query);
    for file in &ranked {
        out.push_str(&format!("\n### {}\n", file.path));
        let content = fs::read_to_string(root.join(&file.path)).unwrap_or_default();
        let lines: Vec<&str> = content.lines().collect();
        // One snippet around the first hit is enough per file
        if let Some(&(line_no, _)) = file.hits.first() {
            let start = line_no.saturating_sub(3).max(1);
            let end = (line_no + 3).min(lines.len());
            for (offset, text) in lines[start - 1..end].iter().enumerate() {
                out.push_str(&format!("  {}: {}\n", start + offset, text));
            }
        }
    }
    Ok(out)
}

/// get_ai_codebase_context
pub fn ai_context(root: &Path, config: &MuninnConfig) -> Result<String> {
    let overview = codebase_overview(root, config)?;
    let mut out = format_overview(&overview);

    out.push_str("\n\n**Available Tools for Codebase Analysis**:\n");
    for spec in super::registry::tool_catalog() {
        out.push_str(&format!("- `{}` - {}\n", spec.name, spec.description));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("parser.rs"),
            "pub fn parse_header(line: &str) {}\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("render.rs"),
            "pub fn draw_widget() {}\n",
        )
        .unwrap();
        temp_dir
    }

    #[test]
    fn test_keywords_filter_stopwords() {
        let words = keywords("How does the header parser work?");
        assert!(words.contains(&"header".to_string()));
        assert!(words.contains(&"parser".to_string()));
        assert!(!words.contains(&"the".to_string()));
        assert!(!words.contains(&"how".to_string()));
    }

    #[test]
    fn test_query_ranks_relevant_file_first() {
        let temp_dir = workspace();
        let config = MuninnConfig::default();

        let out = query_codebase(temp_dir.path(), "header parser", &config).unwrap();
        assert!(out.contains("parser.rs"));
        assert!(!out.contains("render.rs"));
    }

    #[test]
    fn test_query_no_relation() {
        let temp_dir = workspace();
        let config = MuninnConfig::default();

        let out = query_codebase(temp_dir.path(), "database migrations", &config).unwrap();
        assert!(out.contains("No files"));
    }

    #[test]
    fn test_relevant_context_has_snippets() {
        let temp_dir = workspace();
        let config = MuninnConfig::default();

        let out = relevant_context(temp_dir.path(), "parse header", &config).unwrap();
        assert!(out.contains("### parser.rs"));
        assert!(out.contains("parse_header"));
    }

    #[test]
    fn test_ai_context_lists_tools() {
        let temp_dir = workspace();
        let config = MuninnConfig::default();

        let out = ai_context(temp_dir.path(), &config).unwrap();
        assert!(out.contains("Codebase Overview"));
        assert!(out.contains("search_codebase"));
    }
}
