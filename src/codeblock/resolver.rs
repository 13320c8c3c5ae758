//! Target resolver: block metadata classification
//!
//! Derives (file path, line range, language) from a raw block, reconciling
//! header-embedded and comment-embedded metadata. Classification is a tagged
//! variant (`MetadataSource`) so the precedence rules live in one place:
//!
//! 1. `lang:path` header - whole-file replace
//! 2. `lang:start:end:path` header - range replace
//! 3. first body line is a comment holding only a path (optionally
//!    `start:end:` prefixed) - comment-line form, stripped from content
//! 4. otherwise the block carries no target and is display-only
//!
//! Header metadata always wins over a first-line comment when both are
//! present. Invalid numeric bounds are a resolution error, never coerced.

use thiserror::Error;

use super::extractor::RawBlock;
use serde::{Deserialize, Serialize};

/// Comment leaders recognized for the comment-line metadata form
const COMMENT_LEADERS: [&str; 4] = ["//", "#", "--", ";"];

/// Where a block's target metadata came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetadataSource {
    /// `lang:path` or `lang:start:end:path` on the fence-open line
    HeaderColon,
    /// Path (optionally range-prefixed) in a comment on the first body line
    FirstLineComment,
    /// No identifiable target; the block is display-only
    None,
}

/// 1-indexed inclusive line range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// Validate `start >= 1` and `end >= start`
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start < 1 || end < start {
            return Err(ResolveError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of lines covered by the range
    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Resolved metadata for one block
///
/// Derived, never persisted. `content` is the block body with any metadata
/// comment line stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMetadata {
    /// Workspace-relative target path, absent for display-only blocks
    pub file_path: Option<String>,
    /// Target line range, absent for whole-file blocks
    pub range: Option<LineRange>,
    /// Which signal provided the target
    pub source: MetadataSource,
    /// Language tag from the fence
    pub language: String,
    /// Replacement body, metadata lines stripped
    pub content: Vec<String>,
}

/// Errors from metadata resolution
///
/// A resolution error marks the block non-actionable; it is skipped by the
/// pipeline, not fatal to the response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid line range {start}:{end} (start must be >= 1, end >= start)")]
    InvalidRange { start: usize, end: usize },
}

/// Result type for resolution
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Resolve one raw block into its metadata
///
/// Deterministic: the same block always yields the same classification.
/// Returns `Err` only for syntactically-matched metadata with invalid
/// numeric bounds; every other shape degrades to `MetadataSource::None`.
pub fn resolve_block(block: &RawBlock) -> Result<BlockMetadata> {
    // Header form wins outright when present
    if !block.header.is_empty() {
        let (range, path) = parse_target_spec(&block.header)?;
        if !path.is_empty() {
            // Strip a duplicate metadata comment so it cannot leak into the
            // written file (header takes precedence for the target itself)
            let mut content = block.body.clone();
            if content
                .first()
                .and_then(|l| comment_metadata_payload(l))
                .is_some()
            {
                content.remove(0);
            }
            return Ok(BlockMetadata {
                file_path: Some(path),
                range,
                source: MetadataSource::HeaderColon,
                language: block.language_tag.clone(),
                content,
            });
        }
    }

    // Comment-line form on the first body line
    if let Some(payload) = block.body.first().and_then(|l| comment_metadata_payload(l)) {
        let (range, path) = parse_target_spec(&payload)?;
        if !path.is_empty() {
            return Ok(BlockMetadata {
                file_path: Some(path),
                range,
                source: MetadataSource::FirstLineComment,
                language: block.language_tag.clone(),
                content: block.body[1..].to_vec(),
            });
        }
    }

    // No identifiable target: display only
    Ok(BlockMetadata {
        file_path: None,
        range: None,
        source: MetadataSource::None,
        language: block.language_tag.clone(),
        content: block.body.clone(),
    })
}

/// Parse a target spec into (range, path)
///
/// `start:end:path` (both numeric) yields a validated range; anything else
/// is a plain path. The path keeps any further colons verbatim.
fn parse_target_spec(spec: &str) -> Result<(Option<LineRange>, String)> {
    let parts: Vec<&str> = spec.splitn(3, ':').collect();
    if parts.len() == 3 && is_numeric(parts[0]) && is_numeric(parts[1]) {
        // Numeric fields that fail to fit usize are out of any file's bounds
        // anyway; treat them as an invalid range rather than a path.
        let start = parts[0].parse::<usize>().unwrap_or(0);
        let end = parts[1].parse::<usize>().unwrap_or(0);
        let range = LineRange::new(start, end)?;
        return Ok((Some(range), parts[2].trim().to_string()));
    }
    Ok((None, spec.trim().to_string()))
}

/// Extract the metadata payload from a comment line, if it is one
///
/// Accepts `//`, `#`, `--`, `;` leaders and `/* ... */` block comments. The
/// payload must be a single whitespace-free token that looks like a path
/// (contains `/` or `.`), optionally preceded by a `start:end:` prefix;
/// ordinary prose comments fall through.
fn comment_metadata_payload(line: &str) -> Option<String> {
    let trimmed = line.trim();

    let payload = if let Some(rest) = trimmed.strip_prefix("/*") {
        rest.strip_suffix("*/").unwrap_or(rest).trim()
    } else {
        let leader = COMMENT_LEADERS
            .iter()
            .find(|l| trimmed.starts_with(**l))?;
        trimmed[leader.len()..].trim()
    };

    if payload.is_empty() || payload.contains(char::is_whitespace) {
        return None;
    }
    if !payload.contains('/') && !payload.contains('.') {
        return None;
    }
    Some(payload.to_string())
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
