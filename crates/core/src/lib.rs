//! # Reconcile Core
//!
//! The text-comparison core of a three-pane merge view: an original text on
//! the left, a modified text on the right, and a merge buffer the user builds
//! from both. Everything here is a pure function over text snapshots; the
//! panes, buttons and undo stack belong to the host.
//!
//! ## Core Concepts
//!
//! - **Tokenizers**: Split text into words (with CJK code points separated)
//!   or grapheme clusters
//! - **Edit scripts**: Ordered runs of unchanged, removed and added text
//! - **Line statuses**: Per-line classification relative to each side
//! - **Paragraph markers**: Paragraph breaks aligned across both sides
//! - **Smart insert**: Newline padding for lines copied into the merge buffer
//! - **DiffEngine**: Composes all of the above into renderable views
//!
//! ## Example
//!
//! ```rust
//! use reconcile_core::{DiffEngine, Granularity, MergeConfig};
//!
//! let config = MergeConfig::default().with_granularity(Granularity::Word);
//! let engine = DiffEngine::new(config);
//!
//! let views = engine.views("Hello World", "Hello Rust");
//! assert_eq!(views.default.left.text(), "Hello World");
//! assert_eq!(views.default.right.text(), "Hello Rust");
//! ```

pub mod algorithm;
pub mod config;
pub mod diff;
pub mod engine;
pub mod history;
pub mod lines;
pub mod paragraphs;
pub mod smart_insert;
pub mod tokenizers;

// Re-export main types
pub use algorithm::{AlgorithmKind, DiffAlgorithm};
pub use config::{ConfigError, MergeConfig};
pub use diff::{DiffPart, EditScript, EditType};
pub use engine::{DiffEngine, MergeSnapshot, MergeViews, PaneView, Side, ViewMode, ViewPair};
pub use history::EditHistory;
pub use lines::{LineDiffMap, LineStatus, LineStatuses};
pub use paragraphs::{ParagraphAlignment, ParagraphMarker, RicherSide};
pub use smart_insert::{desired_leading_newlines, leading_newlines_to_insert, Splice};
pub use tokenizers::{Granularity, SegmenterKind};

/// Main entry point for computing the merge views of two texts
///
/// # Arguments
///
/// * `original` - The original text (left pane)
/// * `modified` - The modified text (right pane)
/// * `config` - Optional configuration (uses default if None)
///
/// # Example
///
/// ```rust
/// use reconcile_core::compute_views;
///
/// let views = compute_views("hello world", "hello rust", None);
/// assert_eq!(views.complete.left.text(), "hello worldrust");
/// ```
pub fn compute_views(original: &str, modified: &str, config: Option<MergeConfig>) -> MergeViews {
    let config = config.unwrap_or_default();
    let engine = DiffEngine::new(config);
    engine.views(original, modified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_views() {
        let views = compute_views("hello world", "hello rust", None);

        assert!(views.complete.left.parts.len() > 1);
        assert_eq!(views.default.right.text(), "hello rust");
    }

    #[test]
    fn test_with_character_granularity() {
        let config = MergeConfig::default().with_granularity(Granularity::Character);

        let views = compute_views("colour", "color", Some(config));

        assert_eq!(views.complete.left.text(), "colour");
        assert_eq!(
            views.complete.left.parts.iter().filter(|p| p.is_removed()).count(),
            1
        );
    }

    #[test]
    fn test_cjk_is_compared_per_character_at_word_granularity() {
        let views = compute_views("我爱你", "我恨你", None);

        assert_eq!(
            views.complete.left.parts,
            vec![
                DiffPart::unchanged("我"),
                DiffPart::removed("爱"),
                DiffPart::added("恨"),
                DiffPart::unchanged("你"),
            ]
        );
    }
}
