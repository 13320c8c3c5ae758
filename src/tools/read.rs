//! read_file: raw file content, optionally a line range
//!
//! Range reads are 1-indexed inclusive. Output is capped at the configured
//! line limit with an explicit truncation note, so a huge file cannot flood
//! the conversation context.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::MuninnConfig;

/// Errors from read operations
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid line range {start}:{end}")]
    InvalidRange { start: usize, end: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for read operations
pub type Result<T> = std::result::Result<T, ReadError>;

/// Read a workspace-relative file
///
/// With a range, returns lines `start..=end` (1-indexed, end clamped to the
/// file length). Without one, returns the whole file. Either way the output
/// is truncated at `config.max_read_lines`.
pub fn read_file(
    root: &Path,
    rel_path: &str,
    range: Option<(usize, usize)>,
    config: &MuninnConfig,
) -> Result<String> {
    let full = root.join(rel_path);
    if !full.exists() {
        return Err(ReadError::NotFound(rel_path.to_string()));
    }
    let content = fs::read_to_string(&full)?;
    let lines: Vec<&str> = content.lines().collect();

    let selected: Vec<&str> = match range {
        Some((start, end)) => {
            if start < 1 || end < start {
                return Err(ReadError::InvalidRange { start, end });
            }
            let end = end.min(lines.len());
            if start > lines.len() {
                Vec::new()
            } else {
                lines[start - 1..end].to_vec()
            }
        }
        None => lines,
    };

    let total = selected.len();
    let capped = &selected[..total.min(config.max_read_lines)];
    let mut out = capped.join("\n");
    if total > capped.len() {
        out.push_str(&format!(
            "\n... (truncated, {} of {} lines shown)",
            capped.len(),
            total
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "A\nB\nC\nD\nE\n").unwrap();
        temp_dir
    }

    #[test]
    fn test_read_whole_file() {
        let temp_dir = workspace();
        let config = MuninnConfig::default();

        let out = read_file(temp_dir.path(), "a.txt", None, &config).unwrap();
        assert_eq!(out, "A\nB\nC\nD\nE");
    }

    #[test]
    fn test_read_range() {
        let temp_dir = workspace();
        let config = MuninnConfig::default();

        let out = read_file(temp_dir.path(), "a.txt", Some((2, 4)), &config).unwrap();
        assert_eq!(out, "B\nC\nD");
    }

    #[test]
    fn test_read_range_end_clamped() {
        let temp_dir = workspace();
        let config = MuninnConfig::default();

        let out = read_file(temp_dir.path(), "a.txt", Some((4, 99)), &config).unwrap();
        assert_eq!(out, "D\nE");
    }

    #[test]
    fn test_read_invalid_range() {
        let temp_dir = workspace();
        let config = MuninnConfig::default();

        let err = read_file(temp_dir.path(), "a.txt", Some((3, 1)), &config).unwrap_err();
        assert!(matches!(err, ReadError::InvalidRange { .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = workspace();
        let config = MuninnConfig::default();

        let err = read_file(temp_dir.path(), "ghost.txt", None, &config).unwrap_err();
        assert!(matches!(err, ReadError::NotFound(_)));
    }

    #[test]
    fn test_read_truncation() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("big.txt"), "x\n".repeat(50)).unwrap();

        let config = MuninnConfig {
            max_read_lines: 10,
            ..MuninnConfig::default()
        };
        let out = read_file(temp_dir.path(), "big.txt", None, &config).unwrap();
        assert!(out.contains("truncated, 10 of 50 lines"));
    }
}
