use std::collections::HashSet;

use crate::types::FileEntry;

/// Directory and file names dropped during intake regardless of location
///
/// Dot-prefixed segments are rejected separately, so version-control
/// metadata like `.git` needs no explicit entry here.
pub const IGNORED_NAMES: &[&str] = &[
    "node_modules",
    "__pycache__",
    "__MACOSX",
    "Thumbs.db",
    "desktop.ini",
];

/// Outcome of the hidden/ignored filter
///
/// Only the count of skipped files is surfaced, for diagnostics.
#[derive(Debug)]
pub struct FilterOutcome {
    pub kept: Vec<FileEntry>,
    pub skipped: usize,
}

fn is_ignored_segment(segment: &str) -> bool {
    segment.starts_with('.') || IGNORED_NAMES.contains(&segment)
}

/// Drop files living under conventionally-ignored directories
///
/// A file is skipped when any segment of its relative path starts with `.`
/// or matches [`IGNORED_NAMES`]. A flat file is skipped when its own name
/// does. Runs before any size or count limit so junk directories never count
/// toward them. `kept.len() + skipped` always equals the input length.
pub fn filter_hidden_and_ignored(files: Vec<FileEntry>) -> FilterOutcome {
    let total = files.len();
    let kept: Vec<FileEntry> = files
        .into_iter()
        .filter(|file| {
            let segments = file.path_segments();
            if segments.is_empty() {
                !is_ignored_segment(&file.name)
            } else {
                !segments.iter().copied().any(is_ignored_segment)
            }
        })
        .collect();
    let skipped = total - kept.len();

    FilterOutcome { kept, skipped }
}

/// Keep only files whose extension is in the allowed set
///
/// Matching is case-insensitive on both sides. Files without an extension
/// are dropped. No content sniffing, no size check.
pub fn filter_by_extensions(files: Vec<FileEntry>, allowed: &HashSet<String>) -> Vec<FileEntry> {
    files
        .into_iter()
        .filter(|file| match extension(&file.name) {
            Some(ext) => allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)),
            None => false,
        })
        .collect()
}

fn extension(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}
