//! Main diff engine that orchestrates a merge session
//!
//! The engine composes tokenization, the edit script, line classification
//! and paragraph alignment into the views a three-pane merge renderer
//! consumes. Every call recomputes from scratch; the engine holds
//! configuration only, never text.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::algorithm::DiffAlgorithm;
use crate::config::MergeConfig;
use crate::diff::{DiffPart, EditScript};
use crate::history::EditHistory;
use crate::lines::LineStatuses;
use crate::paragraphs::{align_paragraph_markers, ParagraphAlignment};
use crate::smart_insert::{copy_line, Splice};
use crate::tokenizers::{Granularity, TokenizerSet};

/// How a pane presents the edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Each side shows only its own text, with its own changes highlighted
    Default,
    /// Same parts as `Default`, rendered with the hover treatment
    Hover,
    /// Both sides show the full unified script
    Complete,
}

/// Which source pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Original-relative
    Left,
    /// Modified-relative
    Right,
}

/// The parts one pane renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaneView {
    pub side: Side,
    pub mode: ViewMode,
    pub parts: Vec<DiffPart>,
}

impl PaneView {
    /// Filter `script` for a pane.
    ///
    /// In `Default` and `Hover` mode the left pane omits added parts and the
    /// right pane omits removed parts. `Complete` keeps every part.
    pub fn new(script: &EditScript, side: Side, mode: ViewMode) -> Self {
        let parts = script
            .iter()
            .filter(|part| match (mode, side) {
                (ViewMode::Complete, _) => true,
                (_, Side::Left) => !part.is_added(),
                (_, Side::Right) => !part.is_removed(),
            })
            .cloned()
            .collect();

        Self { side, mode, parts }
    }

    /// Concatenated text of the visible parts
    pub fn text(&self) -> String {
        self.parts.iter().map(|part| part.value.as_str()).collect()
    }
}

/// Left and right panes for one view mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewPair {
    pub left: PaneView,
    pub right: PaneView,
}

impl ViewPair {
    pub fn new(script: &EditScript, mode: ViewMode) -> Self {
        Self {
            left: PaneView::new(script, Side::Left, mode),
            right: PaneView::new(script, Side::Right, mode),
        }
    }
}

/// All three view modes for one edit script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeViews {
    pub default: ViewPair,
    pub hover: ViewPair,
    pub complete: ViewPair,
}

impl MergeViews {
    pub fn from_script(script: &EditScript) -> Self {
        Self {
            default: ViewPair::new(script, ViewMode::Default),
            hover: ViewPair::new(script, ViewMode::Hover),
            complete: ViewPair::new(script, ViewMode::Complete),
        }
    }

    pub fn get(&self, mode: ViewMode) -> &ViewPair {
        match mode {
            ViewMode::Default => &self.default,
            ViewMode::Hover => &self.hover,
            ViewMode::Complete => &self.complete,
        }
    }
}

/// Everything derived from one pair of texts, computed in a single pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSnapshot {
    pub granularity: Granularity,
    pub script: EditScript,
    pub views: MergeViews,
    pub lines: LineStatuses,
    pub paragraphs: ParagraphAlignment,
}

/// The main diff engine
pub struct DiffEngine {
    config: MergeConfig,
    tokenizers: TokenizerSet,
    algorithm: Box<dyn DiffAlgorithm>,
}

impl DiffEngine {
    /// Create a new diff engine with the given configuration.
    ///
    /// The segmentation strategy and algorithm are fixed here for the
    /// lifetime of the engine.
    pub fn new(config: MergeConfig) -> Self {
        Self {
            tokenizers: TokenizerSet::new(config.segmenter),
            algorithm: config.algorithm.build(),
            config,
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn granularity(&self) -> Granularity {
        self.config.granularity
    }

    /// Switch between word and character comparison
    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.config.granularity = granularity;
    }

    /// Split text into tokens at the configured granularity
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.tokenizers.tokenize(text, self.config.granularity)
    }

    /// Diff two token sequences with the configured algorithm
    pub fn diff_tokens(&self, original: &[&str], modified: &[&str]) -> EditScript {
        self.algorithm.script(original, modified)
    }

    /// Compute the edit script between two texts
    pub fn diff(&self, original: &str, modified: &str) -> EditScript {
        let original_tokens = self.tokenize(original);
        let modified_tokens = self.tokenize(modified);
        let script = self.diff_tokens(&original_tokens, &modified_tokens);

        tracing::debug!(
            granularity = ?self.config.granularity,
            original_tokens = original_tokens.len(),
            modified_tokens = modified_tokens.len(),
            parts = script.len(),
            "recomputed edit script"
        );

        script
    }

    /// All three views for a pair of texts
    pub fn views(&self, original: &str, modified: &str) -> MergeViews {
        MergeViews::from_script(&self.diff(original, modified))
    }

    /// A single pane filtered from an already computed script
    pub fn pane(&self, script: &EditScript, side: Side, mode: ViewMode) -> PaneView {
        PaneView::new(script, side, mode)
    }

    pub fn line_statuses(&self, original: &str, modified: &str) -> LineStatuses {
        LineStatuses::compute(original, modified)
    }

    pub fn paragraph_alignment(&self, original: &str, modified: &str) -> ParagraphAlignment {
        let script = self.diff(original, modified);
        align_paragraph_markers(original, modified, &script)
    }

    /// Copy the line under `source_cursor` into `target`, replacing
    /// `selection`. Newline padding follows the `smart_newlines` setting.
    pub fn copy_line(
        &self,
        source: &str,
        source_cursor: usize,
        target: &str,
        selection: Range<usize>,
    ) -> Option<Splice> {
        copy_line(source, source_cursor, target, selection, self.config.smart_newlines)
    }

    /// Recompute everything for a pair of texts
    pub fn snapshot(&self, original: &str, modified: &str) -> MergeSnapshot {
        let script = self.diff(original, modified);

        MergeSnapshot {
            granularity: self.config.granularity,
            views: MergeViews::from_script(&script),
            lines: self.line_statuses(original, modified),
            paragraphs: align_paragraph_markers(original, modified, &script),
            script,
        }
    }

    /// Undo history for the merge buffer, bounded by the configured limit
    pub fn new_history(&self, initial: impl Into<String>) -> EditHistory {
        EditHistory::new(initial, self.config.history_limit)
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(MergeConfig::default())
    }
}

impl fmt::Debug for DiffEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffEngine")
            .field("config", &self.config)
            .field("tokenizers", &self.tokenizers)
            .finish_non_exhaustive()
    }
}
