//! Undo/redo snapshots for the merge buffer.
//!
//! The merge buffer is small, so history keeps whole-text snapshots rather
//! than operations. This is presentation state: the diff functions never read
//! or write it.

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// A bounded list of text snapshots with a cursor.
///
/// `record` after an `undo` discards everything after the cursor. When the
/// list grows past `limit` the oldest snapshot is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditHistory {
    entries: Vec<String>,
    index: usize,
    limit: usize,
}

impl EditHistory {
    /// Create a history holding `initial` as its only snapshot.
    ///
    /// A `limit` of zero is treated as one.
    pub fn new(initial: impl Into<String>, limit: usize) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// The snapshot at the cursor
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a new snapshot. Returns false when `value` equals the current
    /// snapshot and nothing was recorded.
    pub fn record(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value == self.current() {
            return false;
        }

        self.entries.truncate(self.index + 1);
        self.entries.push(value);
        self.index += 1;

        while self.entries.len() > self.limit {
            self.entries.remove(0);
            self.index -= 1;
        }

        true
    }

    /// Step back one snapshot and return it
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Step forward one snapshot and return it
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    /// Drop all snapshots and start over from `initial`
    pub fn reset(&mut self, initial: impl Into<String>) {
        self.entries.clear();
        self.entries.push(initial.into());
        self.index = 0;
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(String::new(), DEFAULT_HISTORY_LIMIT)
    }
}
