//! Edit planner: from intent to concrete plan with diff preview
//!
//! Whole-file plans mark every existing line removed and every new line
//! added. This is deliberately coarse; no line-level similarity matching is
//! attempted for whole-file blocks. Range plans splice the body over the
//! 1-indexed inclusive range and preview exactly the replaced span.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::intent::{EditIntent, EditMode};
use crate::codeblock::LineRange;

/// One line of a diff preview, with its 1-indexed line number
///
/// Removed lines carry their original line numbers; added lines carry their
/// line numbers in the new content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub line: usize,
    pub text: String,
}

/// A planned, not-yet-applied file mutation
///
/// Lifetime: one apply cycle; discarded after application or rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPlan {
    pub intent: EditIntent,
    /// Current file lines, absent if the file does not exist yet
    pub previous: Option<Vec<String>>,
    pub added: Vec<DiffLine>,
    pub removed: Vec<DiffLine>,
}

/// Errors from planning
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// `end` exceeds the file's current line count; never silently clamped,
    /// since clamping would corrupt trailing content unpredictably
    #[error("RangeOutOfBounds: end {end} exceeds {len} lines in {path}")]
    RangeOutOfBounds { path: String, end: usize, len: usize },

    /// Range mode on a nonexistent file; never falls back to creation
    #[error("MissingFileForRangeEdit: {0} does not exist")]
    MissingFileForRangeEdit(String),
}

/// Result type for planning
pub type Result<T> = std::result::Result<T, PlanError>;

/// Plan one edit against the target's current content
///
/// `current` is the file content from the store, `None` if the file does not
/// exist yet. Pure function: reads nothing, writes nothing.
pub fn plan_edit(intent: EditIntent, current: Option<&str>) -> Result<EditPlan> {
    let previous: Option<Vec<String>> =
        current.map(|c| c.lines().map(|l| l.to_string()).collect());

    match intent.mode {
        EditMode::CreateOrReplaceWhole => {
            let removed = match &previous {
                Some(lines) => number_lines(lines, 1),
                None => Vec::new(),
            };
            let added = number_lines(&intent.content, 1);
            Ok(EditPlan {
                intent,
                previous,
                added,
                removed,
            })
        }
        EditMode::ReplaceRange(range) => {
            let lines = match &previous {
                Some(lines) => lines,
                None => {
                    return Err(PlanError::MissingFileForRangeEdit(intent.file_path));
                }
            };
            if range.end > lines.len() {
                return Err(PlanError::RangeOutOfBounds {
                    path: intent.file_path,
                    end: range.end,
                    len: lines.len(),
                });
            }

            let removed = number_lines(&lines[range.start - 1..range.end], range.start);
            let added = number_lines(&intent.content, range.start);
            Ok(EditPlan {
                intent,
                previous,
                added,
                removed,
            })
        }
    }
}

impl EditPlan {
    /// Compute the final file content the plan produces
    pub fn final_content(&self) -> Vec<String> {
        match (self.intent.mode, &self.previous) {
            (EditMode::ReplaceRange(range), Some(lines)) => {
                splice(lines, range, &self.intent.content)
            }
            // Range plans always carry previous content (planner invariant);
            // whole-file plans replace everything regardless
            _ => self.intent.content.clone(),
        }
    }

    /// Whether this plan creates a file that does not exist yet
    pub fn is_creation(&self) -> bool {
        self.previous.is_none()
    }
}

/// lines[1..start-1] ++ body ++ lines[end+1..N], 1-indexed inclusive
fn splice(lines: &[String], range: LineRange, body: &[String]) -> Vec<String> {
    let mut result =
        Vec::with_capacity(lines.len() - range.line_count() + body.len());
    result.extend_from_slice(&lines[..range.start - 1]);
    result.extend_from_slice(body);
    result.extend_from_slice(&lines[range.end..]);
    result
}

fn number_lines(lines: &[String], first: usize) -> Vec<DiffLine> {
    lines
        .iter()
        .enumerate()
        .map(|(i, text)| DiffLine {
            line: first + i,
            text: text.clone(),
        })
        .collect()
}
