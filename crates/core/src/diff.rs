//! Diff result types and structures

use std::fmt;
use std::ops::Range;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Type of edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditType {
    /// Content was inserted
    Insert,
    /// Content was deleted
    Delete,
    /// Content remained unchanged
    Equal,
}

/// A token-level edit produced by a diff algorithm.
///
/// Ranges index into the token slices handed to the algorithm. An `Insert`
/// has an empty `original` range and a `Delete` an empty `modified` range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    pub edit_type: EditType,
    pub original: Range<usize>,
    pub modified: Range<usize>,
}

impl EditOperation {
    pub fn equal(original: Range<usize>, modified: Range<usize>) -> Self {
        Self {
            edit_type: EditType::Equal,
            original,
            modified,
        }
    }

    pub fn delete(original: Range<usize>, at: usize) -> Self {
        Self {
            edit_type: EditType::Delete,
            original,
            modified: at..at,
        }
    }

    pub fn insert(at: usize, modified: Range<usize>) -> Self {
        Self {
            edit_type: EditType::Insert,
            original: at..at,
            modified,
        }
    }
}

/// A run of text in an edit script.
///
/// A part is unchanged, added or removed; never both added and removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffPart {
    pub value: String,
    kind: EditType,
}

impl DiffPart {
    pub fn unchanged(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: EditType::Equal,
        }
    }

    pub fn added(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: EditType::Insert,
        }
    }

    pub fn removed(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: EditType::Delete,
        }
    }

    pub fn kind(&self) -> EditType {
        self.kind
    }

    pub fn is_added(&self) -> bool {
        self.kind == EditType::Insert
    }

    pub fn is_removed(&self) -> bool {
        self.kind == EditType::Delete
    }

    pub fn is_unchanged(&self) -> bool {
        self.kind == EditType::Equal
    }

    /// Length of the part in bytes
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Serialize for DiffPart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DiffPart", 3)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("added", &self.is_added())?;
        state.serialize_field("removed", &self.is_removed())?;
        state.end()
    }
}

/// Byte counts per part kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStatistics {
    pub unchanged: usize,
    pub inserted: usize,
    pub deleted: usize,
}

impl DiffStatistics {
    /// Fraction of the longer side that was touched by an edit (0.0 to 1.0)
    pub fn change_ratio(&self) -> f64 {
        let original = self.unchanged + self.deleted;
        let modified = self.unchanged + self.inserted;
        let max_length = original.max(modified);

        if max_length == 0 {
            0.0
        } else {
            (self.inserted.max(self.deleted) as f64 / max_length as f64).min(1.0)
        }
    }
}

/// An ordered sequence of diff parts.
///
/// Concatenating every part that is not added yields the original text, and
/// every part that is not removed yields the modified text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EditScript {
    parts: Vec<DiffPart>,
}

impl EditScript {
    pub fn new(parts: Vec<DiffPart>) -> Self {
        Self { parts }
    }

    /// Assemble a script from token-level operations.
    ///
    /// Adjacent runs of the same kind are merged. Between two unchanged runs
    /// all removed text comes first, then all added text, which keeps the
    /// number of parts minimal.
    pub fn from_operations(
        original: &[&str],
        modified: &[&str],
        operations: &[EditOperation],
    ) -> Self {
        let mut builder = ScriptBuilder::default();

        for op in operations {
            match op.edit_type {
                EditType::Equal => builder.push_equal(&original[op.original.clone()]),
                EditType::Delete => builder
                    .removed
                    .extend(original[op.original.clone()].iter().copied()),
                EditType::Insert => builder
                    .added
                    .extend(modified[op.modified.clone()].iter().copied()),
            }
        }

        builder.finish()
    }

    pub fn parts(&self) -> &[DiffPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<DiffPart> {
        self.parts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffPart> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Whether any part is added or removed
    pub fn has_changes(&self) -> bool {
        self.parts.iter().any(|part| !part.is_unchanged())
    }

    /// Reconstruct the original text
    pub fn original(&self) -> String {
        self.parts
            .iter()
            .filter(|part| !part.is_added())
            .map(|part| part.value.as_str())
            .collect()
    }

    /// Reconstruct the modified text
    pub fn modified(&self) -> String {
        self.parts
            .iter()
            .filter(|part| !part.is_removed())
            .map(|part| part.value.as_str())
            .collect()
    }

    pub fn statistics(&self) -> DiffStatistics {
        let mut stats = DiffStatistics::default();

        for part in &self.parts {
            match part.kind {
                EditType::Equal => stats.unchanged += part.len(),
                EditType::Insert => stats.inserted += part.len(),
                EditType::Delete => stats.deleted += part.len(),
            }
        }

        stats
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a DiffPart;
    type IntoIter = std::slice::Iter<'a, DiffPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

impl fmt::Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part.kind {
                EditType::Equal => write!(f, "{}", part.value)?,
                EditType::Insert => write!(f, "{{+{}+}}", part.value)?,
                EditType::Delete => write!(f, "[-{}-]", part.value)?,
            }
        }

        Ok(())
    }
}

/// Accumulates pending removed/added tokens between unchanged runs
#[derive(Default)]
struct ScriptBuilder {
    parts: Vec<DiffPart>,
    removed: String,
    added: String,
}

impl ScriptBuilder {
    fn push_equal(&mut self, tokens: &[&str]) {
        let value = tokens.concat();
        if value.is_empty() {
            return;
        }

        self.flush_changes();

        match self.parts.last_mut() {
            Some(last) if last.is_unchanged() => last.value.push_str(&value),
            _ => self.parts.push(DiffPart::unchanged(value)),
        }
    }

    fn flush_changes(&mut self) {
        let removed = std::mem::take(&mut self.removed);
        let added = std::mem::take(&mut self.added);

        if !removed.is_empty() {
            self.parts.push(DiffPart::removed(removed));
        }
        if !added.is_empty() {
            self.parts.push(DiffPart::added(added));
        }
    }

    fn finish(mut self) -> EditScript {
        self.flush_changes();
        EditScript::new(self.parts)
    }
}
