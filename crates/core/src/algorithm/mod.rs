//! Diff algorithms implementation
//!
//! Provides the algorithms that compute an edit script between two token
//! sequences. Every algorithm is deterministic: identical inputs always yield
//! identical operations.
pub mod lcs;
pub mod myers;
pub mod patience;

use serde::{Deserialize, Serialize};

use crate::diff::{EditOperation, EditScript};

pub use lcs::LcsAlgorithm;
pub use myers::MyersAlgorithm;
pub use patience::PatienceAlgorithm;

/// Trait for diff algorithms
pub trait DiffAlgorithm: Send + Sync {
    /// Compute the token-level operations turning `original` into `modified`
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<EditOperation>;

    /// Compute and group the operations into an edit script
    fn script(&self, original: &[&str], modified: &[&str]) -> EditScript {
        let operations = self.compute(original, modified);
        EditScript::from_operations(original, modified, &operations)
    }
}

/// Diff algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// Myers O(ND) algorithm
    #[default]
    Myers,
    /// Patience diff (anchors on unique tokens, more human-readable)
    Patience,
    /// Dynamic-programming LCS (quadratic in the changed region)
    Lcs,
}

impl AlgorithmKind {
    pub fn build(self) -> Box<dyn DiffAlgorithm> {
        match self {
            AlgorithmKind::Myers => Box::new(MyersAlgorithm::new()),
            AlgorithmKind::Patience => Box::new(PatienceAlgorithm::new()),
            AlgorithmKind::Lcs => Box::new(LcsAlgorithm::new()),
        }
    }
}

/// Diff two token sequences with the Myers algorithm.
pub fn diff(original: &[&str], modified: &[&str]) -> EditScript {
    MyersAlgorithm::new().script(original, modified)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Translate `similar` operations into our own, splitting replacements into a
/// deletion followed by an insertion.
fn from_similar_ops(ops: &[similar::DiffOp]) -> Vec<EditOperation> {
    let mut operations = Vec::with_capacity(ops.len());

    for op in ops {
        let (tag, original, modified) = op.as_tag_tuple();
        match tag {
            similar::DiffTag::Equal => operations.push(EditOperation::equal(original, modified)),
            similar::DiffTag::Delete => {
                operations.push(EditOperation::delete(original, modified.start))
            }
            similar::DiffTag::Insert => {
                operations.push(EditOperation::insert(original.start, modified))
            }
            similar::DiffTag::Replace => {
                operations.push(EditOperation::delete(original.clone(), modified.start));
                operations.push(EditOperation::insert(original.end, modified));
            }
        }
    }

    operations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffPart;
    use crate::tokenizers::{tokenize, Granularity};

    pub fn word_tokens(text: &str) -> Vec<&str> {
        tokenize(text, Granularity::Word)
    }

    const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::Myers,
        AlgorithmKind::Patience,
        AlgorithmKind::Lcs,
    ];

    #[test]
    fn test_identical_input_is_single_part() {
        let tokens = word_tokens("the quick brown fox");

        for kind in ALL {
            let script = kind.build().script(&tokens, &tokens);
            assert_eq!(script.parts(), &[DiffPart::unchanged("the quick brown fox")], "{kind:?}");
        }
    }

    #[test]
    fn test_empty_inputs() {
        for kind in ALL {
            assert!(kind.build().script(&[], &[]).is_empty());
        }
    }

    #[test]
    fn test_word_replacement() {
        let original = word_tokens("hello world");
        let modified = word_tokens("hello rust");

        let script = diff(&original, &modified);

        assert_eq!(
            script.parts(),
            &[
                DiffPart::unchanged("hello "),
                DiffPart::removed("world"),
                DiffPart::added("rust"),
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let original = word_tokens("a b a b a c a");
        let modified = word_tokens("b a c a b a a");

        for kind in ALL {
            let algorithm = kind.build();
            let first = algorithm.script(&original, &modified);
            let second = algorithm.script(&original, &modified);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_round_trip_all_algorithms() {
        let original = word_tokens("The cat sat on the mat.\n\nIt purred.");
        let modified = word_tokens("A cat sat on a mat!\nIt purred loudly.");

        for kind in ALL {
            let script = kind.build().script(&original, &modified);
            assert_eq!(script.original(), original.concat(), "{kind:?}");
            assert_eq!(script.modified(), modified.concat(), "{kind:?}");
        }
    }
}
