//! Tool registry: the fixed exploration tool set
//!
//! Centralized metadata for every tool the model may invoke. The set is
//! closed; an unrecognized name is an executor error, never a dispatch to
//! arbitrary code.

use serde::{Deserialize, Serialize};

/// The closed set of exploration tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    GetCodebaseOverview,
    SearchCodebase,
    GetFileOverview,
    ReadFile,
    QueryCodebaseNaturalLanguage,
    GetRelevantCodebaseContext,
    GetAiCodebaseContext,
}

impl ToolName {
    /// Every tool, in catalog order
    pub const ALL: [ToolName; 7] = [
        ToolName::GetCodebaseOverview,
        ToolName::SearchCodebase,
        ToolName::GetFileOverview,
        ToolName::ReadFile,
        ToolName::QueryCodebaseNaturalLanguage,
        ToolName::GetRelevantCodebaseContext,
        ToolName::GetAiCodebaseContext,
    ];

    /// Wire name of the tool
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetCodebaseOverview => "get_codebase_overview",
            ToolName::SearchCodebase => "search_codebase",
            ToolName::GetFileOverview => "get_file_overview",
            ToolName::ReadFile => "read_file",
            ToolName::QueryCodebaseNaturalLanguage => "query_codebase_natural_language",
            ToolName::GetRelevantCodebaseContext => "get_relevant_codebase_context",
            ToolName::GetAiCodebaseContext => "get_ai_codebase_context",
        }
    }

    /// Parse a wire name into a tool, `None` for anything outside the set
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }

    /// One-line description shown in the catalog
    pub fn description(&self) -> &'static str {
        match self {
            ToolName::GetCodebaseOverview => {
                "Project-wide overview: file counts, languages, directories"
            }
            ToolName::SearchCodebase => "Search file contents for a pattern",
            ToolName::GetFileOverview => "Per-file summary: language, lines, declared elements",
            ToolName::ReadFile => "Read a file, optionally a line range",
            ToolName::QueryCodebaseNaturalLanguage => {
                "Answer a natural-language question about the codebase"
            }
            ToolName::GetRelevantCodebaseContext => {
                "Collect code context relevant to a task description"
            }
            ToolName::GetAiCodebaseContext => "Condensed codebase summary for system context",
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specification for a single tool argument
#[derive(Debug, Clone, Serialize)]
pub struct ToolArgument {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Catalog entry for one tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: ToolName,
    pub description: &'static str,
    pub args: Vec<ToolArgument>,
}

/// Argument specs for a tool
pub fn arguments(tool: ToolName) -> Vec<ToolArgument> {
    match tool {
        ToolName::GetCodebaseOverview | ToolName::GetAiCodebaseContext => Vec::new(),
        ToolName::SearchCodebase => vec![ToolArgument {
            name: "query",
            required: true,
            description: "Regex or literal pattern to search for",
        }],
        ToolName::GetFileOverview => vec![ToolArgument {
            name: "file_path",
            required: true,
            description: "Workspace-relative file path",
        }],
        ToolName::ReadFile => vec![
            ToolArgument {
                name: "path",
                required: true,
                description: "Workspace-relative file path",
            },
            ToolArgument {
                name: "start_line",
                required: false,
                description: "First line to read (1-indexed)",
            },
            ToolArgument {
                name: "end_line",
                required: false,
                description: "Last line to read (inclusive)",
            },
        ],
        ToolName::QueryCodebaseNaturalLanguage | ToolName::GetRelevantCodebaseContext => {
            vec![ToolArgument {
                name: "query",
                required: true,
                description: "Natural-language question or task description",
            }]
        }
    }
}

/// Full tool catalog, in stable order
pub fn tool_catalog() -> Vec<ToolSpec> {
    ToolName::ALL
        .iter()
        .map(|&name| ToolSpec {
            name,
            description: name.description(),
            args: arguments(name),
        })
        .collect()
}
