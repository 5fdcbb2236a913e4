//! Paragraph-marker alignment
//!
//! When the two sides of a merge disagree on how many paragraphs they hold,
//! the side with more paragraphs is authoritative: each of its paragraph
//! breaks is mapped through the edit script onto the other side so that a
//! renderer can draw a matching marker in both panes.
//!
//! Marker numbers restart at 1 on every computation and carry no identity
//! across recomputes.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::diff::{EditScript, EditType};

static PARAGRAPH_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\s*\n")
        .expect("paragraph break regex is a compile-time constant and must be valid")
});

/// Which side has more paragraphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RicherSide {
    Left,
    Right,
    Equal,
}

/// One paragraph break located on both sides.
///
/// Positions are byte offsets into the original (`left_pos`) and modified
/// (`right_pos`) texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphMarker {
    /// 1-based, sequential in scan order
    pub number: usize,
    pub left_pos: usize,
    pub right_pos: usize,
}

/// Result of aligning paragraph breaks across an edit script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphAlignment {
    pub richer_side: RicherSide,
    pub left_paragraphs: usize,
    pub right_paragraphs: usize,
    pub markers: Vec<ParagraphMarker>,
}

impl ParagraphAlignment {
    pub fn is_aligned(&self) -> bool {
        self.richer_side == RicherSide::Equal
    }
}

/// Number of non-blank paragraphs separated by blank lines
pub fn paragraph_count(text: &str) -> usize {
    PARAGRAPH_BREAK_RE
        .split(text)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Byte offsets of the blank-line runs that separate two paragraphs.
///
/// Runs at the very start or end of the text (with nothing but whitespace on
/// one side) are not breaks.
pub fn paragraph_breaks(text: &str) -> Vec<usize> {
    PARAGRAPH_BREAK_RE
        .find_iter(text)
        .filter(|m| !text[..m.start()].trim().is_empty() && !text[m.end()..].trim().is_empty())
        .map(|m| m.start())
        .collect()
}

/// Align the paragraph breaks of the richer side onto the other side.
///
/// `script` must be the edit script between `original` (left) and
/// `modified` (right). Each break of the richer side is attributed to the
/// part whose span on that side covers it, using the half-open interval
/// `(start, start + len]`. For an unchanged part the break maps to the same
/// offset within the part on the other side; for an added or removed part it
/// maps to the other side's cursor.
pub fn align_paragraph_markers(
    original: &str,
    modified: &str,
    script: &EditScript,
) -> ParagraphAlignment {
    let left_paragraphs = paragraph_count(original);
    let right_paragraphs = paragraph_count(modified);

    let richer_side = match left_paragraphs.cmp(&right_paragraphs) {
        std::cmp::Ordering::Equal => RicherSide::Equal,
        std::cmp::Ordering::Greater => RicherSide::Left,
        std::cmp::Ordering::Less => RicherSide::Right,
    };

    let markers = match richer_side {
        RicherSide::Equal => Vec::new(),
        RicherSide::Left => walk_script(script, &paragraph_breaks(original), RicherSide::Left),
        RicherSide::Right => walk_script(script, &paragraph_breaks(modified), RicherSide::Right),
    };

    tracing::debug!(
        left_paragraphs,
        right_paragraphs,
        ?richer_side,
        markers = markers.len(),
        "aligned paragraph markers"
    );

    ParagraphAlignment {
        richer_side,
        left_paragraphs,
        right_paragraphs,
        markers,
    }
}

fn walk_script(script: &EditScript, breaks: &[usize], richer: RicherSide) -> Vec<ParagraphMarker> {
    let mut markers = Vec::with_capacity(breaks.len());
    let mut pending = breaks.iter().copied().peekable();
    let mut left_pos = 0;
    let mut right_pos = 0;

    for part in script {
        let len = part.len();
        let (left_len, right_len) = match part.kind() {
            EditType::Equal => (len, len),
            EditType::Delete => (len, 0),
            EditType::Insert => (0, len),
        };

        let (rich_start, rich_len) = match richer {
            RicherSide::Left => (left_pos, left_len),
            _ => (right_pos, right_len),
        };

        while let Some(&offset) = pending.peek() {
            if offset > rich_start + rich_len {
                break;
            }
            pending.next();

            let in_part = offset - rich_start;
            let mirrored = |other_start: usize| {
                if part.is_unchanged() {
                    other_start + in_part
                } else {
                    other_start
                }
            };

            let (marker_left, marker_right) = match richer {
                RicherSide::Left => (offset, mirrored(right_pos)),
                _ => (mirrored(left_pos), offset),
            };

            markers.push(ParagraphMarker {
                number: markers.len() + 1,
                left_pos: marker_left,
                right_pos: marker_right,
            });
        }

        left_pos += left_len;
        right_pos += right_len;
    }

    markers
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::algorithm::diff;
    use crate::tokenizers::{tokenize, Granularity};
    use proptest::prelude::*;

    proptest! {
        /// Marker numbers count up from 1, there is at most one marker per
        /// break of the richer side, and authoritative positions never go back.
        #[test]
        fn markers_are_numbered_and_bounded(
            a in "[ab \n]{0,40}",
            b in "[ab \n]{0,40}",
            word in any::<bool>(),
        ) {
            let granularity = if word { Granularity::Word } else { Granularity::Character };
            let script = diff(&tokenize(&a, granularity), &tokenize(&b, granularity));

            let alignment = align_paragraph_markers(&a, &b, &script);

            for (i, marker) in alignment.markers.iter().enumerate() {
                prop_assert_eq!(marker.number, i + 1);
                prop_assert!(marker.left_pos <= a.len());
                prop_assert!(marker.right_pos <= b.len());
            }

            match alignment.richer_side {
                RicherSide::Equal => prop_assert!(alignment.markers.is_empty()),
                RicherSide::Left => {
                    prop_assert_eq!(alignment.markers.len(), paragraph_breaks(&a).len());
                    let ordered = alignment
                        .markers
                        .windows(2)
                        .all(|w| w[0].left_pos <= w[1].left_pos);
                    prop_assert!(ordered);
                }
                RicherSide::Right => {
                    prop_assert_eq!(alignment.markers.len(), paragraph_breaks(&b).len());
                    let ordered = alignment
                        .markers
                        .windows(2)
                        .all(|w| w[0].right_pos <= w[1].right_pos);
                    prop_assert!(ordered);
                }
            }
        }
    }
}
