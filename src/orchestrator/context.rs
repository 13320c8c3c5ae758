//! Conversation context frames
//!
//! Ordered history of one conversation: user input, assistant responses and
//! tool results, each stamped on arrival. The context is explicit state
//! passed into and out of the orchestrator, never ambient global state, so
//! concurrent conversations cannot cross-talk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tools::ToolResult;

/// A single conversation frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frame {
    /// User input
    User { text: String, at: DateTime<Utc> },
    /// Assistant response
    Assistant { text: String, at: DateTime<Utc> },
    /// Tool execution result, injected between assistant turns
    ToolResult {
        tool: String,
        success: bool,
        output: String,
        at: DateTime<Utc>,
    },
}

impl Frame {
    /// Render the frame as prompt text
    pub fn render(&self) -> String {
        match self {
            Frame::User { text, .. } => format!("[USER]\n{}", text),
            Frame::Assistant { text, .. } => format!("[ASSISTANT]\n{}", text),
            Frame::ToolResult {
                tool,
                success,
                output,
                ..
            } => format!(
                "[TOOL RESULT: {} {}]\n{}",
                tool,
                if *success { "OK" } else { "FAILED" },
                output
            ),
        }
    }
}

/// Per-conversation context
///
/// Torn down when the conversation session ends; nothing here outlives it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    frames: Vec<Frame>,
    /// Tool cycles completed since the conversation started
    completed_tool_cycles: usize,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, text: impl Into<String>) {
        self.frames.push(Frame::User {
            text: text.into(),
            at: Utc::now(),
        });
    }

    pub fn add_assistant(&mut self, text: impl Into<String>) {
        self.frames.push(Frame::Assistant {
            text: text.into(),
            at: Utc::now(),
        });
    }

    /// Fold a tool result into context and count the completed cycle
    pub fn add_tool_result(&mut self, result: &ToolResult) {
        self.frames.push(Frame::ToolResult {
            tool: result.tool.clone(),
            success: result.success,
            output: result.output.clone(),
            at: Utc::now(),
        });
        self.completed_tool_cycles += 1;
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn completed_tool_cycles(&self) -> usize {
        self.completed_tool_cycles
    }

    /// Render the whole context as prompt text, oldest first
    pub fn render(&self) -> String {
        self.frames
            .iter()
            .map(Frame::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool_result(tool: &str, success: bool) -> ToolResult {
        ToolResult {
            tool: tool.to_string(),
            success,
            output: "out".to_string(),
            execution_id: "test-exec".to_string(),
        }
    }

    #[test]
    fn test_frames_keep_order() {
        let mut ctx = ConversationContext::new();
        ctx.add_user("hi");
        ctx.add_assistant("hello");
        ctx.add_tool_result(&tool_result("read_file", true));

        assert_eq!(ctx.len(), 3);
        assert!(matches!(ctx.frames()[0], Frame::User { .. }));
        assert!(matches!(ctx.frames()[2], Frame::ToolResult { .. }));
    }

    #[test]
    fn test_tool_result_counts_cycle() {
        let mut ctx = ConversationContext::new();
        assert_eq!(ctx.completed_tool_cycles(), 0);

        ctx.add_tool_result(&tool_result("search_codebase", true));
        assert_eq!(ctx.completed_tool_cycles(), 1);
    }

    #[test]
    fn test_render_marks_failures() {
        let mut ctx = ConversationContext::new();
        ctx.add_tool_result(&tool_result("read_file", false));

        let text = ctx.render();
        assert!(text.contains("[TOOL RESULT: read_file FAILED]"));
    }
}
