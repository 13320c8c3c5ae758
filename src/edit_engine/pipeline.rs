//! Edit pipeline: extract, resolve, plan, apply
//!
//! The exposed surface over one assistant response. Per-block failures are
//! isolated: a block that fails to resolve is skipped, a plan or write
//! failure becomes a `Rejected` result for that file, and every other block
//! in the response still proceeds. A multi-file response can partially
//! succeed.

use tracing::{debug, warn};

use super::applier::{apply_plan, ApplyResult};
use super::intent::EditIntent;
use super::planner::plan_edit;
use crate::codeblock::{extract_blocks, resolve_block, MetadataSource};
use crate::file_store::FileStore;

/// Extract every actionable edit intent from a response
///
/// Display-only blocks and blocks with invalid metadata contribute nothing.
pub fn extract_intents(response: &str) -> Vec<EditIntent> {
    let mut intents = Vec::new();

    for block in extract_blocks(response) {
        let meta = match resolve_block(&block) {
            Ok(meta) => meta,
            Err(e) => {
                warn!("skipping block with unresolvable target: {}", e);
                continue;
            }
        };
        if meta.source == MetadataSource::None {
            debug!("block without target kept for display only");
            continue;
        }
        if let Some(intent) = EditIntent::from_metadata(&meta) {
            intents.push(intent);
        }
    }

    intents
}

/// Parse a raw assistant response and apply every actionable block
///
/// Returns one `ApplyResult` per actionable block, in document order.
/// Unterminated fences and display-only blocks yield no result; plan and
/// write failures yield `Rejected` results with the file untouched.
pub fn extract_and_apply(response: &str, store: &mut dyn FileStore) -> Vec<ApplyResult> {
    let mut results = Vec::new();

    for intent in extract_intents(response) {
        let path = intent.file_path.clone();

        let current = match store.read(&path) {
            Ok(current) => current,
            Err(e) => {
                warn!("read failed for {}: {}", path, e);
                results.push(ApplyResult::rejected(
                    path,
                    Vec::new(),
                    format!("ReadFailure: {}", e),
                ));
                continue;
            }
        };

        let plan = match plan_edit(intent, current.as_deref()) {
            Ok(plan) => plan,
            Err(e) => {
                warn!("plan rejected for {}: {}", path, e);
                let untouched = current
                    .as_deref()
                    .map(|c| c.lines().map(|l| l.to_string()).collect())
                    .unwrap_or_default();
                results.push(ApplyResult::rejected(path, untouched, e.to_string()));
                continue;
            }
        };

        results.push(apply_plan(&plan, store));
    }

    results
}
