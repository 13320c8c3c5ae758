//! Workspace file walk shared by the exploration tools

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::MuninnConfig;

/// Collect every scannable text file under `root`, in deterministic order
///
/// Skips ignored directories, hidden entries, non-text extensions and files
/// over the configured size limit. Paths are returned workspace-relative.
pub fn collect_text_files(root: &Path, config: &MuninnConfig) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_dir(root, root, config, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_dir(
    root: &Path,
    dir: &Path,
    config: &MuninnConfig,
    out: &mut Vec<PathBuf>,
) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if name.starts_with('.') {
            continue;
        }

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if config.is_ignored_dir(&name) {
                continue;
            }
            walk_dir(root, &path, config, out)?;
        } else if file_type.is_file() {
            if !config.is_text_file(&path) {
                continue;
            }
            if let Ok(meta) = entry.metadata() {
                if meta.len() > config.max_file_size {
                    continue;
                }
            }
            if let Ok(rel) = path.strip_prefix(root) {
                out.push(rel.to_path_buf());
            }
        }
    }
    Ok(())
}
