//! Language detection from file extensions

use std::path::Path;

/// Detect a language name from a file extension
///
/// Unknown extensions map to "text".
pub fn language_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match ext.as_str() {
        "rs" => "rust",
        "py" => "python",
        "js" => "javascript",
        "jsx" => "jsx",
        "ts" => "typescript",
        "tsx" => "tsx",
        "html" => "html",
        "css" => "css",
        "scss" | "sass" => "scss",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "md" => "markdown",
        "rst" => "rst",
        "xml" => "xml",
        "sql" => "sql",
        "sh" | "bash" => "bash",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "hpp" => "cpp",
        "cs" => "csharp",
        "php" => "php",
        "rb" => "ruby",
        "swift" => "swift",
        "kt" => "kotlin",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_known_extensions() {
        assert_eq!(language_for_path(&PathBuf::from("src/main.rs")), "rust");
        assert_eq!(language_for_path(&PathBuf::from("app.py")), "python");
        assert_eq!(language_for_path(&PathBuf::from("index.tsx")), "tsx");
    }

    #[test]
    fn test_unknown_extension_is_text() {
        assert_eq!(language_for_path(&PathBuf::from("data.bin")), "text");
        assert_eq!(language_for_path(&PathBuf::from("LICENSE")), "text");
    }
}
