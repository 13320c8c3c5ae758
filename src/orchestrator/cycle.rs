//! Tool cycle state machine
//!
//! Governs when the model may emit code blocks versus tool calls:
//!
//! ```text
//! Idle --tool call emitted--> AwaitingToolResult --result folded--> Idle
//! ```
//!
//! While a tool result is outstanding, no code block is accepted: a block
//! emitted before its prerequisite exploration result has been folded in
//! was produced from stale context, so it is treated as provisional and
//! discarded. The caller regenerates once fresh context is in place.
//!
//! The machine does not perform I/O and imposes no timeout; executing the
//! tool and any cancellation policy belong to the caller driving it.

use thiserror::Error;
use tracing::{debug, info};

use super::context::ConversationContext;
use crate::codeblock::extract_blocks;
use crate::tools::{extract_tool_call, ToolCall, ToolResult};

/// Orchestrator state for one conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCycleState {
    /// The model may emit text, a tool call or a code block
    Idle,
    /// A tool call is outstanding; code blocks are provisional until the
    /// result is folded back into context
    AwaitingToolResult { pending: ToolCall },
}

impl ToolCycleState {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, ToolCycleState::AwaitingToolResult { .. })
    }
}

/// Next action for the caller after processing an assistant turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleAction {
    /// Run this tool and deliver the result via `fold_tool_result`
    ExecuteTool(ToolCall),
    /// The turn carries code blocks; run the edit pipeline on it
    ApplyBlocks,
    /// Plain prose, nothing to execute or apply
    Prose,
    /// Turn arrived while a tool result was outstanding; discarded
    Discarded,
}

/// Errors from driving the cycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    #[error("no tool call is in flight")]
    NotAwaiting,
}

/// One conversation's orchestrator: state plus context, owned together
///
/// Equivalent to passing `(state, context)` in and out of every call; the
/// struct keeps the pairing honest.
#[derive(Debug, Clone, Default)]
pub struct ToolCycle {
    state: ToolCycleState,
    context: ConversationContext,
}

impl Default for ToolCycleState {
    fn default() -> Self {
        ToolCycleState::Idle
    }
}

impl ToolCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ToolCycleState {
        &self.state
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ConversationContext {
        &mut self.context
    }

    /// Policy surface: edits are expected only after at least one completed
    /// exploration cycle in a fresh conversation. Not mechanically enforced
    /// here; callers consult it before accepting the first edit.
    pub fn ready_for_edits(&self) -> bool {
        self.context.completed_tool_cycles() > 0
    }

    /// Record a user turn
    pub fn user_turn(&mut self, text: &str) {
        self.context.add_user(text);
    }

    /// Process an assistant turn and decide the next action
    ///
    /// In `Idle`, the turn is folded into context and classified. In
    /// `AwaitingToolResult`, the turn is provisional: it is not folded and
    /// `Discarded` is returned, so stale-context blocks never reach the
    /// edit pipeline.
    pub fn assistant_turn(&mut self, response: &str) -> CycleAction {
        if self.state.is_awaiting() {
            debug!("discarding assistant turn emitted before tool result was folded");
            return CycleAction::Discarded;
        }

        self.context.add_assistant(response);

        if let Some((call, _prose)) = extract_tool_call(response) {
            info!("tool call requested: {}", call.tool);
            self.state = ToolCycleState::AwaitingToolResult {
                pending: call.clone(),
            };
            return CycleAction::ExecuteTool(call);
        }

        if !extract_blocks(response).is_empty() {
            return CycleAction::ApplyBlocks;
        }
        CycleAction::Prose
    }

    /// Fold a tool result into context, completing the cycle
    ///
    /// The result is appended to context before any further parse, which is
    /// the ordering guarantee the edit pipeline relies on.
    pub fn fold_tool_result(&mut self, result: &ToolResult) -> Result<(), CycleError> {
        if !self.state.is_awaiting() {
            return Err(CycleError::NotAwaiting);
        }
        self.context.add_tool_result(result);
        self.state = ToolCycleState::Idle;
        debug!(
            "tool result folded, {} cycle(s) completed",
            self.context.completed_tool_cycles()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool_result(tool: &str) -> ToolResult {
        ToolResult {
            tool: tool.to_string(),
            success: true,
            output: "result text".to_string(),
            execution_id: "test-exec".to_string(),
        }
    }

    #[test]
    fn test_idle_prose() {
        let mut cycle = ToolCycle::new();
        let action = cycle.assistant_turn("Just explaining things.");

        assert_eq!(action, CycleAction::Prose);
        assert!(!cycle.state().is_awaiting());
    }

    #[test]
    fn test_tool_call_transitions_to_awaiting() {
        let mut cycle = ToolCycle::new();
        let action =
            cycle.assistant_turn("TOOL_CALL:\n  tool: get_codebase_overview\n  args:");

        match action {
            CycleAction::ExecuteTool(call) => assert_eq!(call.tool, "get_codebase_overview"),
            other => panic!("expected ExecuteTool, got {:?}", other),
        }
        assert!(cycle.state().is_awaiting());
    }

    #[test]
    fn test_result_folds_before_next_parse() {
        let mut cycle = ToolCycle::new();
        cycle.assistant_turn("TOOL_CALL:\n  tool: read_file\n  args:\n    path: a.rs");

        cycle.fold_tool_result(&tool_result("read_file")).unwrap();

        assert!(!cycle.state().is_awaiting());
        assert_eq!(cycle.context().completed_tool_cycles(), 1);
        // The result is in context before anything else is parsed
        assert!(cycle.context().render().contains("[TOOL RESULT: read_file OK]"));
    }

    #[test]
    fn test_blocks_discarded_while_awaiting() {
        let mut cycle = ToolCycle::new();
        cycle.assistant_turn("TOOL_CALL:\n  tool: read_file\n  args:\n    path: a.rs");

        let frames_before = cycle.context().len();
        let action = cycle.assistant_turn("```rust:src/a.rs\nfn a() {}\n```");

        assert_eq!(action, CycleAction::Discarded);
        // Provisional turn is not folded into context
        assert_eq!(cycle.context().len(), frames_before);
    }

    #[test]
    fn test_blocks_accepted_after_fold() {
        let mut cycle = ToolCycle::new();
        cycle.assistant_turn("TOOL_CALL:\n  tool: read_file\n  args:\n    path: a.rs");
        cycle.fold_tool_result(&tool_result("read_file")).unwrap();

        let action = cycle.assistant_turn("```rust:src/a.rs\nfn a() {}\n```");
        assert_eq!(action, CycleAction::ApplyBlocks);
    }

    #[test]
    fn test_fold_without_pending_is_error() {
        let mut cycle = ToolCycle::new();
        let err = cycle.fold_tool_result(&tool_result("read_file")).unwrap_err();
        assert_eq!(err, CycleError::NotAwaiting);
    }

    #[test]
    fn test_ready_for_edits_policy() {
        let mut cycle = ToolCycle::new();
        assert!(!cycle.ready_for_edits());

        cycle.assistant_turn("TOOL_CALL:\n  tool: get_codebase_overview\n  args:");
        cycle
            .fold_tool_result(&tool_result("get_codebase_overview"))
            .unwrap();
        assert!(cycle.ready_for_edits());
    }

    #[test]
    fn test_two_conversations_do_not_cross_talk() {
        let mut first = ToolCycle::new();
        let mut second = ToolCycle::new();

        first.assistant_turn("TOOL_CALL:\n  tool: read_file\n  args:\n    path: a.rs");

        // The second conversation is unaffected by the first's pending call
        let action = second.assistant_turn("```rust:src/b.rs\nfn b() {}\n```");
        assert_eq!(action, CycleAction::ApplyBlocks);
        assert!(first.state().is_awaiting());
        assert!(!second.state().is_awaiting());
    }
}
