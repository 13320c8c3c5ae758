//! Edit intent: resolved, not-yet-applied description of one file mutation

use serde::{Deserialize, Serialize};

use crate::codeblock::{BlockMetadata, LineRange, MetadataSource};

/// How the replacement body is applied to the target
///
/// The range travels inside the variant, so a range-replace intent without
/// bounds is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    /// Create the file, or replace its entire content if it exists
    CreateOrReplaceWhole,
    /// Replace a 1-indexed inclusive line range of an existing file
    ReplaceRange(LineRange),
}

/// A single resolved file mutation
///
/// Exclusively owned by the apply pipeline for the duration of one edit.
/// Range bounds already satisfy `start >= 1`, `end >= start` (enforced at
/// resolution); whether `end` fits the target file is the planner's check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditIntent {
    /// Workspace-relative target path, non-empty
    pub file_path: String,
    pub mode: EditMode,
    /// Replacement body, metadata lines already stripped
    pub content: Vec<String>,
}

impl EditIntent {
    /// Build an intent from resolved block metadata
    ///
    /// Returns `None` for non-actionable metadata (display-only blocks).
    pub fn from_metadata(meta: &BlockMetadata) -> Option<Self> {
        if meta.source == MetadataSource::None {
            return None;
        }
        let file_path = meta.file_path.clone()?;
        if file_path.is_empty() {
            return None;
        }

        let mode = match meta.range {
            Some(range) => EditMode::ReplaceRange(range),
            None => EditMode::CreateOrReplaceWhole,
        };

        Some(Self {
            file_path,
            mode,
            content: meta.content.clone(),
        })
    }

    /// Target line range, absent for whole-file intents
    pub fn range(&self) -> Option<LineRange> {
        match self.mode {
            EditMode::CreateOrReplaceWhole => None,
            EditMode::ReplaceRange(range) => Some(range),
        }
    }
}
