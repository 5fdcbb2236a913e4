use similar::Algorithm;

use crate::algorithm::myers::MyersAlgorithm;
use crate::algorithm::{self, DiffAlgorithm};
use crate::diff::EditOperation;

/// Patience diff algorithm
///
/// Anchors on tokens that occur exactly once on both sides and diffs the gaps
/// between anchors, which tends to keep moved blocks readable.
pub struct PatienceAlgorithm;

impl PatienceAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PatienceAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffAlgorithm for PatienceAlgorithm {
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<EditOperation> {
        if original.is_empty() || modified.is_empty() {
            return MyersAlgorithm::new().compute(original, modified);
        }

        let ops = similar::capture_diff_slices(Algorithm::Patience, original, modified);
        algorithm::from_similar_ops(&ops)
    }
}
