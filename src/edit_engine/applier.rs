//! Edit applier: executes one plan against the file store
//!
//! A single atomic write per file. All failure is expressed as data in the
//! `ApplyResult`; nothing here aborts the host. The store content for the
//! path changes if and only if the outcome is `Applied`.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::planner::EditPlan;
use crate::file_store::FileStore;

/// Terminal outcome of one apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyOutcome {
    Applied,
    Rejected,
}

/// Result of applying (or rejecting) one edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    /// Workspace-relative path the edit targeted
    pub file_path: String,
    /// File content after the call: new content when applied, the
    /// untouched previous content when rejected
    pub final_content: Vec<String>,
    pub outcome: ApplyOutcome,
    /// Rejection reason, absent when applied
    pub reason: Option<String>,
    /// Unique id for this apply attempt
    pub execution_id: String,
}

impl ApplyResult {
    pub fn is_applied(&self) -> bool {
        self.outcome == ApplyOutcome::Applied
    }

    /// Build a rejection that leaves the file untouched
    pub fn rejected(file_path: String, final_content: Vec<String>, reason: String) -> Self {
        Self {
            file_path,
            final_content,
            outcome: ApplyOutcome::Rejected,
            reason: Some(reason),
            execution_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Execute one edit plan against the store
///
/// Write failures from the store are surfaced verbatim as the rejection
/// reason; the previous content is reported unchanged in that case.
pub fn apply_plan(plan: &EditPlan, store: &mut dyn FileStore) -> ApplyResult {
    let final_content = plan.final_content();
    let text = render_content(&final_content);

    match store.write(&plan.intent.file_path, &text) {
        Ok(()) => {
            info!(
                "applied {} ({} added, {} removed)",
                plan.intent.file_path,
                plan.added.len(),
                plan.removed.len()
            );
            ApplyResult {
                file_path: plan.intent.file_path.clone(),
                final_content,
                outcome: ApplyOutcome::Applied,
                reason: None,
                execution_id: Uuid::new_v4().to_string(),
            }
        }
        Err(e) => {
            warn!("write failed for {}: {}", plan.intent.file_path, e);
            ApplyResult::rejected(
                plan.intent.file_path.clone(),
                plan.previous.clone().unwrap_or_default(),
                format!("WriteFailure: {}", e),
            )
        }
    }
}

/// Render a line sequence back to file text
///
/// Lines join with `\n` and the file ends with a trailing newline; an empty
/// sequence renders as an empty file.
pub fn render_content(lines: &[String]) -> String {
    if lines.is_empty() {
        String::new()
    } else {
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
