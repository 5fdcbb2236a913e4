use similar::Algorithm;

use crate::algorithm::{self, DiffAlgorithm};
use crate::diff::EditOperation;

/// Myers O(ND) diff algorithm
pub struct MyersAlgorithm;

impl MyersAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MyersAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffAlgorithm for MyersAlgorithm {
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<EditOperation> {
        let n = original.len();
        let m = modified.len();

        if n == 0 && m == 0 {
            return vec![];
        }

        if n == 0 {
            return vec![EditOperation::insert(0, 0..m)];
        }

        if m == 0 {
            return vec![EditOperation::delete(0..n, 0)];
        }

        let ops = similar::capture_diff_slices(Algorithm::Myers, original, modified);
        algorithm::from_similar_ops(&ops)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::word_tokens;
    use super::*;
    use crate::diff::EditType;

    #[test]
    fn test_myers_basic() {
        let orig = word_tokens("hello world");
        let modified = word_tokens("hello rust");

        let ops = MyersAlgorithm::new().compute(&orig, &modified);

        assert_eq!(ops.first().map(|op| op.edit_type), Some(EditType::Equal));
        assert!(ops.iter().any(|op| op.edit_type == EditType::Delete));
        assert!(ops.iter().any(|op| op.edit_type == EditType::Insert));
    }

    #[test]
    fn test_all_deletions() {
        let orig = word_tokens("hello world");

        let ops = MyersAlgorithm::new().compute(&orig, &[]);

        assert_eq!(ops, vec![EditOperation::delete(0..3, 0)]);
    }

    #[test]
    fn test_all_insertions() {
        let modified = word_tokens("hello world");

        let ops = MyersAlgorithm::new().compute(&[], &modified);

        assert_eq!(ops, vec![EditOperation::insert(0, 0..3)]);
    }
}
