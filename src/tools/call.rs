//! TOOL_CALL parser
//!
//! Extracts tool invocations from LLM responses. Deterministic line-based
//! parser, no YAML dependency.
//!
//! # Format
//! ```text
//! TOOL_CALL:
//!   tool: <tool_name>
//!   args:
//!     <key>: <value>
//! ```

use std::collections::HashMap;

/// A tool invocation extracted from a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    /// Tool name as written by the model (validated by the executor)
    pub tool: String,
    /// Key-value arguments
    pub args: HashMap<String, String>,
}

/// Marker opening a tool call block
const MARKER: &str = "TOOL_CALL:";

/// Check whether a response contains a tool call block
pub fn has_tool_call(response: &str) -> bool {
    response.contains(MARKER)
}

/// Extract the first tool call from a response
///
/// Returns the call together with the surrounding prose (text before and
/// after the block). A marker with no parseable `tool:` line yields `None`;
/// the whole response is then plain prose.
pub fn extract_tool_call(response: &str) -> Option<(ToolCall, String)> {
    let marker_pos = response.find(MARKER)?;
    let before = &response[..marker_pos];
    let section = &response[marker_pos + MARKER.len()..];

    let block_end = find_block_end(section);
    let block = &section[..block_end];
    let after = &section[block_end..];

    let call = parse_block(block)?;

    let mut prose = String::from(before.trim());
    let after = after.trim();
    if !after.is_empty() {
        if !prose.is_empty() {
            prose.push('\n');
        }
        prose.push_str(after);
    }

    Some((call, prose))
}

/// Find where the tool call block ends within `section`
///
/// The block ends at the next TOOL_CALL: marker, at the first non-indented
/// line following a blank line, or at end of input.
fn find_block_end(section: &str) -> usize {
    let mut pos = 0;
    let mut seen_blank = false;

    for line in section.split_inclusive('\n') {
        let trimmed = line.trim_end();

        if trimmed.trim() == MARKER {
            return pos;
        }
        if trimmed.is_empty() {
            seen_blank = true;
            pos += line.len();
            continue;
        }
        if seen_blank && !trimmed.starts_with("  ") {
            return pos;
        }
        if trimmed.starts_with("  ") {
            seen_blank = false;
        }
        pos += line.len();
    }

    section.len()
}

/// Parse the lines of one tool call block
fn parse_block(block: &str) -> Option<ToolCall> {
    let mut tool: Option<String> = None;
    let mut args = HashMap::new();

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() || line == "args:" {
            continue;
        }

        if let Some(rest) = line.strip_prefix("tool:") {
            let name = rest.trim();
            if name.is_empty() {
                return None;
            }
            tool = Some(name.to_string());
            continue;
        }

        if let Some(colon) = line.find(':') {
            let key = line[..colon].trim().to_string();
            let value = line[colon + 1..].trim().to_string();
            if !key.is_empty() {
                args.insert(key, value);
            }
        }
    }

    tool.map(|tool| ToolCall { tool, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tool_call() {
        assert!(has_tool_call("x\nTOOL_CALL:\n  tool: read_file"));
        assert!(!has_tool_call("no calls here"));
    }

    #[test]
    fn test_extract_simple() {
        let response = "TOOL_CALL:\n  tool: read_file\n  args:\n    path: src/lib.rs";
        let (call, prose) = extract_tool_call(response).unwrap();

        assert_eq!(call.tool, "read_file");
        assert_eq!(call.args.get("path"), Some(&"src/lib.rs".to_string()));
        assert!(prose.is_empty());
    }

    #[test]
    fn test_extract_with_prose() {
        let response = "Let me check the overview first.\n\nTOOL_CALL:\n  tool: get_codebase_overview\n  args:\n\nThen I'll propose an edit.";
        let (call, prose) = extract_tool_call(response).unwrap();

        assert_eq!(call.tool, "get_codebase_overview");
        assert!(call.args.is_empty());
        assert!(prose.contains("overview first"));
        assert!(prose.contains("propose an edit"));
    }

    #[test]
    fn test_extract_multiple_args_with_spaces() {
        let response =
            "TOOL_CALL:\n  tool: search_codebase\n  args:\n    query: fn main\n    limit: 10";
        let (call, _) = extract_tool_call(response).unwrap();

        assert_eq!(call.args.get("query"), Some(&"fn main".to_string()));
        assert_eq!(call.args.get("limit"), Some(&"10".to_string()));
    }

    #[test]
    fn test_only_first_call_extracted() {
        let response =
            "TOOL_CALL:\n  tool: read_file\n  args:\n    path: a.rs\n\nTOOL_CALL:\n  tool: read_file\n  args:\n    path: b.rs";
        let (call, prose) = extract_tool_call(response).unwrap();

        assert_eq!(call.args.get("path"), Some(&"a.rs".to_string()));
        assert!(prose.contains("TOOL_CALL:"));
        assert!(prose.contains("b.rs"));
    }

    #[test]
    fn test_missing_tool_name_is_prose() {
        let response = "TOOL_CALL:\n  args:\n    path: a.rs";
        assert!(extract_tool_call(response).is_none());
    }

    #[test]
    fn test_empty_tool_name_is_prose() {
        let response = "TOOL_CALL:\n  tool: \n  args:";
        assert!(extract_tool_call(response).is_none());
    }

    #[test]
    fn test_no_call_in_plain_text() {
        assert!(extract_tool_call("just explaining some code").is_none());
    }
}
