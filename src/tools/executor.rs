//! Tool executor: dispatching calls against the workspace
//!
//! `ToolExecutor` is the seam between the orchestrator and whatever runs
//! tools; `WorkspaceToolExecutor` is the in-process implementation over the
//! real filesystem. Protocol violations (unknown tool, missing argument)
//! are `ToolError`s; a tool that runs but fails reports `success = false`
//! in its result, so the failure text flows back into model context instead
//! of aborting the conversation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use super::call::ToolCall;
use super::registry::ToolName;
use super::{context_query, file_overview, overview, read, search};
use crate::config::MuninnConfig;

/// Protocol-level tool errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required argument '{arg}' for {tool}")]
    MissingArgument { tool: String, arg: String },

    #[error("Invalid argument '{arg}' for {tool}: {reason}")]
    InvalidArgument {
        tool: String,
        arg: String,
        reason: String,
    },
}

/// Result of one tool execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool: String,
    pub success: bool,
    pub output: String,
    /// Unique id for this execution
    pub execution_id: String,
}

impl ToolResult {
    fn ok(tool: &ToolName, output: String) -> Self {
        Self {
            tool: tool.as_str().to_string(),
            success: true,
            output,
            execution_id: Uuid::new_v4().to_string(),
        }
    }

    fn failed(tool: &ToolName, error: String) -> Self {
        Self {
            tool: tool.as_str().to_string(),
            success: false,
            output: error,
            execution_id: Uuid::new_v4().to_string(),
        }
    }

    /// Render the result for injection into conversation context
    pub fn format_for_context(&self) -> String {
        let status = if self.success { "success" } else { "error" };
        format!(
            "[SYSTEM TOOL RESULT]\nTool: {}\nStatus: {}\nOutput: {}\n",
            self.tool, status, self.output
        )
    }
}

/// Executes exploration tool calls
pub trait ToolExecutor {
    fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;
}

/// In-process executor over a workspace directory
#[derive(Debug, Clone)]
pub struct WorkspaceToolExecutor {
    root: PathBuf,
    config: MuninnConfig,
}

impl WorkspaceToolExecutor {
    /// Create an executor for a workspace root, loading its config
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config = MuninnConfig::load(&root);
        Self { root, config }
    }

    pub fn with_config(root: impl Into<PathBuf>, config: MuninnConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run(&self, tool: ToolName, args: &HashMap<String, String>) -> Result<ToolResult, ToolError> {
        match tool {
            ToolName::GetCodebaseOverview => {
                match overview::codebase_overview(&self.root, &self.config) {
                    Ok(ov) => Ok(ToolResult::ok(&tool, overview::format_overview(&ov))),
                    Err(e) => Ok(ToolResult::failed(&tool, e.to_string())),
                }
            }
            ToolName::SearchCodebase => {
                let query = require(&tool, args, "query")?;
                match search::search_codebase(&self.root, query, &self.config) {
                    Ok(matches) => {
                        Ok(ToolResult::ok(&tool, search::format_matches(query, &matches)))
                    }
                    Err(e) => Ok(ToolResult::failed(&tool, e.to_string())),
                }
            }
            ToolName::GetFileOverview => {
                let path = require(&tool, args, "file_path")?;
                match file_overview::file_overview(&self.root, path) {
                    Ok(ov) => Ok(ToolResult::ok(
                        &tool,
                        file_overview::format_file_overview(&ov),
                    )),
                    Err(e) => Ok(ToolResult::failed(&tool, e.to_string())),
                }
            }
            ToolName::ReadFile => {
                let path = require(&tool, args, "path")?;
                let range = parse_range_args(&tool, args)?;
                match read::read_file(&self.root, path, range, &self.config) {
                    Ok(content) => Ok(ToolResult::ok(&tool, content)),
                    Err(e) => Ok(ToolResult::failed(&tool, e.to_string())),
                }
            }
            ToolName::QueryCodebaseNaturalLanguage => {
                let query = require(&tool, args, "query")?;
                match context_query::query_codebase(&self.root, query, &self.config) {
                    Ok(answer) => Ok(ToolResult::ok(&tool, answer)),
                    Err(e) => Ok(ToolResult::failed(&tool, e.to_string())),
                }
            }
            ToolName::GetRelevantCodebaseContext => {
                let query = require(&tool, args, "query")?;
                match context_query::relevant_context(&self.root, query, &self.config) {
                    Ok(context) => Ok(ToolResult::ok(&tool, context)),
                    Err(e) => Ok(ToolResult::failed(&tool, e.to_string())),
                }
            }
            ToolName::GetAiCodebaseContext => {
                match context_query::ai_context(&self.root, &self.config) {
                    Ok(context) => Ok(ToolResult::ok(&tool, context)),
                    Err(e) => Ok(ToolResult::failed(&tool, e.to_string())),
                }
            }
        }
    }
}

impl ToolExecutor for WorkspaceToolExecutor {
    fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let tool = ToolName::parse(&call.tool)
            .ok_or_else(|| ToolError::UnknownTool(call.tool.clone()))?;

        debug!("executing tool {} with {} args", tool, call.args.len());
        let result = self.run(tool, &call.args)?;
        if !result.success {
            warn!("tool {} failed: {}", tool, result.output);
        }
        Ok(result)
    }
}

/// Fetch a required argument
fn require<'a>(
    tool: &ToolName,
    args: &'a HashMap<String, String>,
    name: &str,
) -> Result<&'a str, ToolError> {
    args.get(name)
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::MissingArgument {
            tool: tool.as_str().to_string(),
            arg: name.to_string(),
        })
}

/// Parse optional start_line/end_line arguments for read_file
fn parse_range_args(
    tool: &ToolName,
    args: &HashMap<String, String>,
) -> Result<Option<(usize, usize)>, ToolError> {
    let parse = |name: &str| -> Result<Option<usize>, ToolError> {
        match args.get(name) {
            None => Ok(None),
            Some(raw) => raw.parse::<usize>().map(Some).map_err(|_| {
                ToolError::InvalidArgument {
                    tool: tool.as_str().to_string(),
                    arg: name.to_string(),
                    reason: format!("'{}' is not a line number", raw),
                }
            }),
        }
    };

    match (parse("start_line")?, parse("end_line")?) {
        (None, None) => Ok(None),
        (start, end) => {
            let start = start.unwrap_or(1);
            let end = end.unwrap_or(usize::MAX);
            Ok(Some((start, end)))
        }
    }
}
