//! Newline padding for lines copied into the merge buffer
//!
//! When a line is copied from one of the source panes into the target
//! buffer, it should keep the paragraph separation it had in its source
//! without piling up blank lines in the target. All offsets are byte offsets;
//! an offset that is out of range or not on a `char` boundary yields the
//! neutral result instead of panicking.

use std::ops::Range;

use serde::Serialize;

use crate::lines::is_blank;

/// Number of newlines a line copied from `source_text` should be preceded by.
///
/// Returns 2 when the line before `line_start` is empty or whitespace-only
/// (the copied line opens a paragraph), 1 otherwise, and 1 for the first
/// line of the text.
pub fn desired_leading_newlines(source_text: &str, line_start: usize) -> usize {
    if line_start == 0
        || line_start > source_text.len()
        || !source_text.is_char_boundary(line_start)
    {
        return 1;
    }

    let before = &source_text[..line_start];
    // Drop the newline that terminates the previous line.
    let previous_end = before.char_indices().next_back().map_or(0, |(pos, _)| pos);
    let previous_start = before[..previous_end].rfind('\n').map_or(0, |pos| pos + 1);

    if is_blank(&before[previous_start..previous_end]) {
        2
    } else {
        1
    }
}

/// Newlines to insert before pasting at `cursor` so that `desired` newlines
/// precede the pasted text, counting those already in `target_text`.
///
/// Nothing is inserted into an empty target, at the start of the target,
/// past its end, or strictly inside a line (the previous character is not a
/// newline and non-whitespace text follows the cursor on the same line).
pub fn leading_newlines_to_insert(target_text: &str, cursor: usize, desired: usize) -> String {
    if desired == 0 || target_text.is_empty() {
        return String::new();
    }
    if cursor == 0 || cursor > target_text.len() || !target_text.is_char_boundary(cursor) {
        return String::new();
    }

    let before = &target_text[..cursor];
    let rest_of_line = target_text[cursor..].split('\n').next().unwrap_or_default();

    let mid_line = !before.ends_with('\n') && !is_blank(rest_of_line);
    if mid_line {
        tracing::trace!(cursor, "mid-line insertion, no padding");
        return String::new();
    }

    let existing = before.bytes().rev().take_while(|b| *b == b'\n').count();
    "\n".repeat(desired.saturating_sub(existing))
}

/// A line located inside a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpan<'a> {
    /// Byte range of the line, without its terminating newline
    pub range: Range<usize>,
    pub text: &'a str,
}

/// The non-blank line containing `cursor`, if any.
pub fn line_at(text: &str, cursor: usize) -> Option<LineSpan<'_>> {
    if cursor > text.len() || !text.is_char_boundary(cursor) {
        return None;
    }

    let start = text[..cursor].rfind('\n').map_or(0, |pos| pos + 1);
    let end = text[cursor..].find('\n').map_or(text.len(), |pos| cursor + pos);
    let line = &text[start..end];

    if is_blank(line) {
        return None;
    }

    Some(LineSpan {
        range: start..end,
        text: line,
    })
}

/// Outcome of replacing a selection with new text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Splice {
    pub text: String,
    /// Byte range the inserted text occupies in `text`
    pub inserted: Range<usize>,
}

/// Replace `selection` in `target` with `insert`.
///
/// The selection is clamped to the target, normalized so that start <= end,
/// and moved back onto `char` boundaries.
pub fn splice(target: &str, selection: Range<usize>, insert: &str) -> Splice {
    let mut start = floor_char_boundary(target, selection.start);
    let mut end = floor_char_boundary(target, selection.end);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let mut text = String::with_capacity(target.len() - (end - start) + insert.len());
    text.push_str(&target[..start]);
    text.push_str(insert);
    text.push_str(&target[end..]);

    Splice {
        text,
        inserted: start..start + insert.len(),
    }
}

/// Copy the line under `source_cursor` into `target` at `selection`.
///
/// With `smart` set, the copied line is prefixed with the newlines needed to
/// keep its paragraph separation. Returns `None` when the cursor sits on a
/// blank line.
pub fn copy_line(
    source: &str,
    source_cursor: usize,
    target: &str,
    selection: Range<usize>,
    smart: bool,
) -> Option<Splice> {
    let line = line_at(source, source_cursor)?;

    let padding = if smart {
        let desired = desired_leading_newlines(source, line.range.start);
        let at = floor_char_boundary(target, selection.start.min(selection.end));
        leading_newlines_to_insert(target, at, desired)
    } else {
        String::new()
    };

    Some(splice(target, selection, &format!("{padding}{}", line.text)))
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_newline_after_non_empty_line() {
        let source = "alpha\nbravo\ncharlie\n";
        let line_start = source.find("bravo").unwrap();

        assert_eq!(desired_leading_newlines(source, line_start), 1);
    }

    #[test]
    fn test_two_newlines_after_blank_line() {
        let source = "alpha\n   \nbravo\n";
        let line_start = source.find("bravo").unwrap();

        assert_eq!(desired_leading_newlines(source, line_start), 2);
    }

    #[test]
    fn test_first_line_wants_one_newline() {
        assert_eq!(desired_leading_newlines("alpha", 0), 1);
        assert_eq!(desired_leading_newlines("\nalpha", 1), 2);
        assert_eq!(desired_leading_newlines("alpha", 99), 1);
    }

    #[test]
    fn test_no_padding_for_empty_target() {
        assert_eq!(leading_newlines_to_insert("", 0, 2), "");
        assert_eq!(leading_newlines_to_insert("", 0, 1), "");
    }

    #[test]
    fn test_no_padding_at_start_or_past_end() {
        assert_eq!(leading_newlines_to_insert("alpha", 0, 2), "");
        assert_eq!(leading_newlines_to_insert("alpha", 6, 2), "");
        assert_eq!(leading_newlines_to_insert("alpha", 3, 0), "");
    }

    #[test]
    fn test_padding_at_end_of_line_and_buffer() {
        assert_eq!(leading_newlines_to_insert("alpha", 5, 1), "\n");
        assert_eq!(leading_newlines_to_insert("alpha", 5, 2), "\n\n");
        assert_eq!(leading_newlines_to_insert("alpha\nbravo\n", 5, 1), "\n");
    }

    #[test]
    fn test_tops_up_existing_newlines() {
        let target = "alpha\nbravo";
        let cursor = target.find("bravo").unwrap();

        assert_eq!(leading_newlines_to_insert(target, cursor, 1), "");
        assert_eq!(leading_newlines_to_insert(target, cursor, 2), "\n");
        assert_eq!(leading_newlines_to_insert("alpha\n\n", 7, 2), "");
    }

    #[test]
    fn test_no_padding_mid_line() {
        let target = "alpha\nbravo\n";
        let cursor = target.find("bravo").unwrap() + 2;

        assert_eq!(leading_newlines_to_insert(target, cursor, 2), "");
    }

    #[test]
    fn test_trailing_whitespace_is_not_mid_line() {
        assert_eq!(leading_newlines_to_insert("alpha   \nbravo", 5, 1), "\n");
    }

    #[test]
    fn test_non_boundary_cursor_is_neutral() {
        assert_eq!(leading_newlines_to_insert("héllo", 2, 1), "");
        assert_eq!(desired_leading_newlines("é\nx", 1), 1);
    }

    #[test]
    fn test_line_at() {
        let text = "alpha\n\nbravo";

        assert_eq!(
            line_at(text, 9),
            Some(LineSpan {
                range: 7..12,
                text: "bravo",
            })
        );
        assert_eq!(line_at(text, 6), None);
        assert_eq!(line_at(text, 5).map(|line| line.text), Some("alpha"));
        assert_eq!(line_at(text, 40), None);
    }

    #[test]
    fn test_splice_reports_inserted_range() {
        let result = splice("hello world", 6..11, "rust");

        assert_eq!(result.text, "hello rust");
        assert_eq!(result.inserted, 6..10);
    }

    #[test]
    fn test_splice_clamps_selection() {
        let result = splice("abc", 5..1, "X");

        assert_eq!(result.text, "aX");
        assert_eq!(result.inserted, 1..2);
    }

    #[test]
    fn test_copy_line_keeps_paragraph_gap() {
        let source = "intro\n\nsecond paragraph\n";
        let target = "draft";

        let result = copy_line(source, 10, target, 5..5, true).unwrap();

        assert_eq!(result.text, "draft\n\nsecond paragraph");
        assert_eq!(result.inserted, 5..23);
    }

    #[test]
    fn test_copy_line_without_smart_newlines() {
        let result = copy_line("one\ntwo", 5, "x", 1..1, false).unwrap();

        assert_eq!(result.text, "xtwo");
    }

    #[test]
    fn test_copy_blank_line_is_none() {
        assert!(copy_line("one\n\ntwo", 4, "x", 0..0, true).is_none());
    }
}
