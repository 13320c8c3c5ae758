//! CLI argument parsing
//!
//! Deterministic two-pass parser over `std::env::args()`:
//! - Modes: apply, extract, tool
//! - Options: --workspace, --json, --version, --help

use crate::cli::{Error, Result};

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// CLI mode (or None when only --version/--help were requested)
    pub mode: Option<Mode>,

    /// Workspace root (None means current directory)
    pub workspace: Option<String>,

    /// JSON output flag
    pub json_output: bool,

    /// Show version and exit
    pub show_version: bool,

    /// Show help and exit
    pub show_help: bool,
}

/// CLI modes
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Apply mode: parse a saved assistant response and apply its blocks
    Apply { response_file: String },

    /// Extract mode: list the edit intents in a response without applying
    Extract { response_file: String },

    /// Tool mode: run one exploration tool with key=value arguments
    Tool { name: String, tool_args: Vec<String> },
}

/// Parse CLI arguments
///
/// Grammar:
/// ```text
/// muninn [options] <mode> [mode-args]
///
/// MODES:
///   apply <response-file>       Apply code blocks from a response
///   extract <response-file>     List edit intents without applying
///   tool <name> [key=value...]  Run one exploration tool
///
/// OPTIONS:
///   --workspace <path>   Workspace root (default: current directory)
///   --json               Output JSON
///   --version            Show version
///   --help               Show help
/// ```
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut iter = args.into_iter();
    let _program = iter.next(); // Skip program name

    let mut args_out = Args {
        mode: None,
        workspace: None,
        json_output: false,
        show_version: false,
        show_help: false,
    };

    let mut positional = Vec::new();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                args_out.show_version = true;
            }
            "--help" | "-h" => {
                args_out.show_help = true;
            }
            "--json" => {
                args_out.json_output = true;
            }
            "--workspace" => {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::MissingArgument("--workspace <path>".to_string()))?;
                args_out.workspace = Some(value);
            }
            other if other.starts_with("--") => {
                return Err(Error::InvalidArgs(format!("unknown option: {}", other)));
            }
            _ => positional.push(arg),
        }
    }

    if args_out.show_version || args_out.show_help {
        return Ok(args_out);
    }

    let mut positional = positional.into_iter();
    let mode_name = positional
        .next()
        .ok_or_else(|| Error::InvalidArgs("no mode given".to_string()))?;

    args_out.mode = Some(match mode_name.as_str() {
        "apply" => Mode::Apply {
            response_file: positional
                .next()
                .ok_or_else(|| Error::MissingArgument("apply <response-file>".to_string()))?,
        },
        "extract" => Mode::Extract {
            response_file: positional
                .next()
                .ok_or_else(|| Error::MissingArgument("extract <response-file>".to_string()))?,
        },
        "tool" => Mode::Tool {
            name: positional
                .next()
                .ok_or_else(|| Error::MissingArgument("tool <name>".to_string()))?,
            tool_args: positional.collect(),
        },
        other => return Err(Error::UnknownMode(other.to_string())),
    });

    Ok(args_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        let mut full = vec!["muninn".to_string()];
        full.extend(args.iter().map(|s| s.to_string()));
        parse_args(full)
    }

    #[test]
    fn test_apply_mode() {
        let args = parse(&["apply", "response.md"]).unwrap();
        assert_eq!(
            args.mode,
            Some(Mode::Apply {
                response_file: "response.md".to_string()
            })
        );
    }

    #[test]
    fn test_tool_mode_with_args() {
        let args = parse(&["tool", "search_codebase", "query=main"]).unwrap();
        assert_eq!(
            args.mode,
            Some(Mode::Tool {
                name: "search_codebase".to_string(),
                tool_args: vec!["query=main".to_string()],
            })
        );
    }

    #[test]
    fn test_workspace_and_json_flags() {
        let args = parse(&["--workspace", "/tmp/ws", "--json", "extract", "r.md"]).unwrap();
        assert_eq!(args.workspace.as_deref(), Some("/tmp/ws"));
        assert!(args.json_output);
    }

    #[test]
    fn test_version_without_mode() {
        let args = parse(&["--version"]).unwrap();
        assert!(args.show_version);
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_no_mode_is_error() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_unknown_mode_is_error() {
        let err = parse(&["frobnicate"]).unwrap_err();
        assert!(matches!(err, Error::UnknownMode(_)));
    }

    #[test]
    fn test_missing_mode_argument() {
        let err = parse(&["apply"]).unwrap_err();
        assert!(matches!(err, Error::MissingArgument(_)));
    }

    #[test]
    fn test_unknown_option_is_error() {
        let err = parse(&["--frob", "apply", "r.md"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgs(_)));
    }
}
