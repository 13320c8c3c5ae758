//! Block extractor: fenced code regions in assistant output
//!
//! Deterministic line-based scanner, no markdown dependency. Produces
//! `RawBlock`s in document order. An unterminated fence at end-of-input is
//! discarded rather than yielded: it reflects truncated generation, which is
//! an expected, recoverable condition.

use tracing::debug;

/// Fence marker opening and closing a code block
const FENCE: &str = "```";

/// A fenced code region, as written by the model
///
/// Produced by the extractor, immutable, scoped to one parse pass. The
/// fence-open line is split into `language_tag` (text after the fence
/// marker, before any colon) and `header` (the remainder, may be empty).
/// Body lines are verbatim, no trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// Language tag from the fence-open line (may be empty)
    pub language_tag: String,
    /// Header text after the language tag (may be empty)
    pub header: String,
    /// Body lines between the fence markers, verbatim
    pub body: Vec<String>,
}

/// Extract all fenced code blocks from raw assistant text
///
/// A block begins at a fence-open marker and ends at the next fence-close
/// marker at the same nesting level: an inner fence-open carrying an info
/// string increments depth, a bare fence marker decrements it, and the block
/// closes only at depth zero.
///
/// # Arguments
/// * `text` - Raw assistant response text
///
/// # Returns
/// Blocks in document order. Unterminated fences are dropped.
pub fn extract_blocks(text: &str) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<RawBlock> = None;
    let mut depth = 0usize;

    for line in text.lines() {
        let trimmed = line.trim_start();

        if current.is_none() {
            // Prose outside fences is not the extractor's concern
            if let Some(info) = trimmed.strip_prefix(FENCE) {
                let (language_tag, header) = split_fence_info(info);
                current = Some(RawBlock {
                    language_tag,
                    header,
                    body: Vec::new(),
                });
                depth = 0;
            }
            continue;
        }

        if trimmed.trim_end() == FENCE {
            if depth == 0 {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
                continue;
            }
            depth -= 1;
        } else if trimmed.starts_with(FENCE) {
            // Inner fence-open with an info string
            depth += 1;
        }

        if let Some(block) = current.as_mut() {
            block.body.push(line.to_string());
        }
    }

    if let Some(block) = current {
        debug!(
            "discarding unterminated fence (language tag: {:?}, {} body lines)",
            block.language_tag,
            block.body.len()
        );
    }

    blocks
}

/// Split a fence info string into (language_tag, header)
///
/// The language tag is everything up to the first colon; the header is
/// everything after it. `lang` alone yields an empty header.
fn split_fence_info(info: &str) -> (String, String) {
    let info = info.trim_end();
    match info.find(':') {
        Some(pos) => (
            info[..pos].trim().to_string(),
            info[pos + 1..].trim().to_string(),
        ),
        None => (info.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_block() {
        let text = "Some prose.\n```rust:src/main.rs\nfn main() {}\n```\nMore prose.";
        let blocks = extract_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language_tag, "rust");
        assert_eq!(blocks[0].header, "src/main.rs");
        assert_eq!(blocks[0].body, vec!["fn main() {}"]);
    }

    #[test]
    fn test_extract_range_header() {
        let text = "```text:2:4:a.txt\nX\nY\n```";
        let blocks = extract_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language_tag, "text");
        assert_eq!(blocks[0].header, "2:4:a.txt");
        assert_eq!(blocks[0].body, vec!["X", "Y"]);
    }

    #[test]
    fn test_extract_bare_language() {
        let text = "```python\n# hello.py\nprint('hi')\n```";
        let blocks = extract_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language_tag, "python");
        assert!(blocks[0].header.is_empty());
        assert_eq!(blocks[0].body.len(), 2);
    }

    #[test]
    fn test_extract_no_language() {
        let text = "```\nplain\n```";
        let blocks = extract_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].language_tag.is_empty());
        assert!(blocks[0].header.is_empty());
    }

    #[test]
    fn test_extract_multiple_blocks_in_order() {
        let text = "```rust:a.rs\n1\n```\ntext\n```rust:b.rs\n2\n```";
        let blocks = extract_blocks(text);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].header, "a.rs");
        assert_eq!(blocks[1].header, "b.rs");
    }

    #[test]
    fn test_unterminated_fence_discarded() {
        let text = "```rust:a.rs\nfn main() {}\n";
        let blocks = extract_blocks(text);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_terminated_then_unterminated() {
        let text = "```rust:a.rs\n1\n```\n```rust:b.rs\ntruncat";
        let blocks = extract_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header, "a.rs");
    }

    #[test]
    fn test_nested_fence_stays_in_body() {
        // A markdown file containing its own fenced example
        let text = "```markdown:README.md\n# Title\n```rust\nfn inner() {}\n```\ndone\n```";
        let blocks = extract_blocks(text);

        assert_eq!(blocks.len(), 1);
        let body = &blocks[0].body;
        assert!(body.contains(&"```rust".to_string()));
        assert!(body.contains(&"fn inner() {}".to_string()));
        assert!(body.contains(&"done".to_string()));
    }

    #[test]
    fn test_body_lines_verbatim() {
        let text = "```rust:a.rs\n    indented\n\ttabbed\n\n```";
        let blocks = extract_blocks(text);

        assert_eq!(blocks[0].body, vec!["    indented", "\ttabbed", ""]);
    }

    #[test]
    fn test_empty_body() {
        let text = "```text:empty.txt\n```";
        let blocks = extract_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].body.is_empty());
    }
}
