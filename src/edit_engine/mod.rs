//! Edit engine: intent, plan, apply
//!
//! The apply pipeline for resolved code blocks:
//! - `intent` - the resolved description of one file mutation
//! - `planner` - plan + diff preview against current file content
//! - `applier` - atomic per-file execution, failure as data
//! - `pipeline` - extract_and_apply over a whole assistant response
//!
//! All line numbers are 1-indexed and inclusive on both ends.

pub mod applier;
pub mod intent;
pub mod pipeline;
pub mod planner;

pub use applier::{apply_plan, render_content, ApplyOutcome, ApplyResult};
pub use intent::{EditIntent, EditMode};
pub use pipeline::{extract_and_apply, extract_intents};
pub use planner::{plan_edit, DiffLine, EditPlan, PlanError};
