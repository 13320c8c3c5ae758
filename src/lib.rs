//! Muninn: deterministic code-block edit substrate for LLM-assisted editing
//!
//! An LLM proposes edits as fenced code blocks; this library parses them,
//! resolves each block's target file and line range, plans the edit with a
//! diff preview, and applies it atomically to the workspace. A tool-call
//! protocol lets the model explore the codebase first, with an orchestrator
//! guaranteeing tool results are folded into context before blocks are
//! trusted.

pub mod cli;
pub mod codeblock;
pub mod config;
pub mod edit_engine;
pub mod file_store;
pub mod orchestrator;
pub mod tools;

// Re-export the block parsing surface
pub use codeblock::{extract_blocks, resolve_block, BlockMetadata, LineRange, MetadataSource, RawBlock};

// Re-export the edit pipeline
pub use edit_engine::{
    apply_plan, extract_and_apply, extract_intents, plan_edit, ApplyOutcome, ApplyResult,
    DiffLine, EditIntent, EditMode, EditPlan, PlanError,
};

// Re-export the file store
pub use file_store::{FileStore, StoreError, WorkspaceStore};

// Re-export the orchestrator
pub use orchestrator::{ConversationContext, CycleAction, ToolCycle, ToolCycleState};

// Re-export the tool protocol
pub use tools::{
    extract_tool_call, has_tool_call, ToolCall, ToolError, ToolExecutor, ToolName, ToolResult,
    WorkspaceToolExecutor,
};

// Re-export configuration
pub use config::MuninnConfig;
