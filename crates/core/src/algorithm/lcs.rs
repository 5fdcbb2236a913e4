use crate::algorithm::DiffAlgorithm;
use crate::diff::{EditOperation, EditType};

/// Longest-common-subsequence diff using a full dynamic-programming table.
///
/// The shared prefix and suffix are matched directly; the table only covers
/// the region between them, so its memory grows with the product of the
/// changed spans rather than of the whole inputs.
pub struct LcsAlgorithm;

impl LcsAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LcsAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffAlgorithm for LcsAlgorithm {
    fn compute(&self, original: &[&str], modified: &[&str]) -> Vec<EditOperation> {
        let n = original.len();
        let m = modified.len();

        // Only the region between the shared prefix and suffix needs a table.
        let prefix = original
            .iter()
            .zip(modified)
            .take_while(|(a, b)| a == b)
            .count();
        let suffix = original[prefix..]
            .iter()
            .rev()
            .zip(modified[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();

        let middle = longest_common_subsequence(
            &original[prefix..n - suffix],
            &modified[prefix..m - suffix],
        );

        let lcs: Vec<(usize, usize)> = (0..prefix)
            .map(|k| (k, k))
            .chain(middle.into_iter().map(|(i, j)| (i + prefix, j + prefix)))
            .chain((0..suffix).map(|k| (n - suffix + k, m - suffix + k)))
            .collect();

        build_operations_from_lcs(n, m, &lcs)
    }
}

fn longest_common_subsequence(original: &[&str], modified: &[&str]) -> Vec<(usize, usize)> {
    let n = original.len();
    let m = modified.len();

    let mut dp = vec![vec![0u32; m + 1]; n + 1];

    for i in 1..=n {
        for j in 1..=m {
            if original[i - 1] == modified[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }

    // Backtrack to find LCS
    let mut lcs = Vec::new();
    let mut i = n;
    let mut j = m;

    while i > 0 && j > 0 {
        if original[i - 1] == modified[j - 1] {
            lcs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] > dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    lcs.reverse();
    lcs
}

fn build_operations_from_lcs(n: usize, m: usize, lcs: &[(usize, usize)]) -> Vec<EditOperation> {
    let mut operations: Vec<EditOperation> = Vec::new();
    let mut orig_idx = 0;
    let mut mod_idx = 0;

    for &(lcs_orig, lcs_mod) in lcs {
        if orig_idx < lcs_orig {
            operations.push(EditOperation::delete(orig_idx..lcs_orig, mod_idx));
        }
        if mod_idx < lcs_mod {
            operations.push(EditOperation::insert(lcs_orig, mod_idx..lcs_mod));
        }

        match operations.last_mut() {
            Some(last)
                if last.edit_type == EditType::Equal
                    && last.original.end == lcs_orig
                    && last.modified.end == lcs_mod =>
            {
                last.original.end += 1;
                last.modified.end += 1;
            }
            _ => operations.push(EditOperation::equal(
                lcs_orig..lcs_orig + 1,
                lcs_mod..lcs_mod + 1,
            )),
        }

        orig_idx = lcs_orig + 1;
        mod_idx = lcs_mod + 1;
    }

    if orig_idx < n {
        operations.push(EditOperation::delete(orig_idx..n, mod_idx));
    }
    if mod_idx < m {
        operations.push(EditOperation::insert(n, mod_idx..m));
    }

    operations
}
