//! Per-line change classification
//!
//! Two deliberately asymmetric views over a pair of line arrays:
//! [`classify_original`] answers "was this original line dropped or
//! changed?", [`classify_modified`] answers "was this modified line newly
//! introduced?". Lines are compared index by index, not aligned.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::algorithm::diff;
use crate::tokenizers::{tokenize, Granularity};

/// Status of a single line index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    Unchanged,
    Modified,
    Removed,
    Added,
}

/// Line index to status, in index order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LineDiffMap(BTreeMap<usize, LineStatus>);

impl LineDiffMap {
    pub fn get(&self, index: usize) -> Option<LineStatus> {
        self.0.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, LineStatus)> + '_ {
        self.0.iter().map(|(index, status)| (*index, *status))
    }

    /// Number of lines with the given status
    pub fn count(&self, status: LineStatus) -> usize {
        self.0.values().filter(|s| **s == status).count()
    }

    fn insert(&mut self, index: usize, status: LineStatus) {
        self.0.insert(index, status);
    }
}

/// Both classification views for one pair of texts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineStatuses {
    pub original: LineDiffMap,
    pub modified: LineDiffMap,
}

impl LineStatuses {
    /// Split both texts into lines and classify them.
    pub fn compute(original: &str, modified: &str) -> Self {
        let original_lines = split_lines(original);
        let modified_lines = split_lines(modified);

        Self {
            original: classify_original(&original_lines, &modified_lines),
            modified: classify_modified(&original_lines, &modified_lines),
        }
    }
}

/// Split text on `'\n'`; a trailing newline yields a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Classify every index of `original`.
///
/// Lines past the end of `modified` are removed. A changed line is removed
/// when its counterpart is blank, modified otherwise.
pub fn classify_original<S: AsRef<str>>(original: &[S], modified: &[S]) -> LineDiffMap {
    let mut statuses = LineDiffMap::default();

    for (index, line) in original.iter().enumerate() {
        let line: &str = line.as_ref();

        let status = match modified.get(index).map(|other| other.as_ref()) {
            None => LineStatus::Removed,
            Some(other) if other == line => LineStatus::Unchanged,
            Some(other) => {
                if !chars_differ(line, other) {
                    LineStatus::Unchanged
                } else if is_blank(other) {
                    LineStatus::Removed
                } else {
                    LineStatus::Modified
                }
            }
        };

        tracing::trace!(index, ?status, "classified original line");
        statuses.insert(index, status);
    }

    statuses
}

/// Classify every index of `modified`.
///
/// Only insertions are flagged: lines past the end of `original`, and lines
/// that replace a blank original line. An in-place edit of a non-blank line
/// stays unchanged in this view.
pub fn classify_modified<S: AsRef<str>>(original: &[S], modified: &[S]) -> LineDiffMap {
    let mut statuses = LineDiffMap::default();

    for (index, line) in modified.iter().enumerate() {
        let line: &str = line.as_ref();

        let status = match original.get(index).map(|other| other.as_ref()) {
            None => LineStatus::Added,
            Some(other) if other == line => LineStatus::Unchanged,
            Some(other) if is_blank(other) && !is_blank(line) => LineStatus::Added,
            Some(other) => {
                if chars_differ(other, line) && is_blank(other) {
                    LineStatus::Added
                } else {
                    LineStatus::Unchanged
                }
            }
        };

        tracing::trace!(index, ?status, "classified modified line");
        statuses.insert(index, status);
    }

    statuses
}

/// Character-level diff of a line pair; true when any part is added or removed
fn chars_differ(a: &str, b: &str) -> bool {
    let original = tokenize(a, Granularity::Character);
    let modified = tokenize(b, Granularity::Character);

    diff(&original, &modified).has_changes()
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
