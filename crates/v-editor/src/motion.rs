//! Row-level motions: paragraphs, bracket matching, character search.
//!
//! Everything here is a pure function of a [`Buffer`] and a starting point.
//! The [`Cursor`](crate::cursor::Cursor) wraps these with counts and the
//! mode-dependent column limit.

use crate::buffer::Buffer;
use crate::position::Position;

// ---------------------------------------------------------------------------
// Paragraphs
// ---------------------------------------------------------------------------

/// True when row `line` is a paragraph boundary: empty, all blanks, or
/// outside the buffer.
#[must_use]
pub fn is_boundary(buf: &Buffer, line: usize) -> bool {
    buf.row(line).is_none_or(crate::buffer::Row::is_blank)
}

/// `}`: the first row of the next paragraph, or the last row when no
/// paragraph follows.
///
/// Leaves the current paragraph, skips the boundary rows after it, and lands
/// on the row right after them.
#[must_use]
pub fn paragraph_forward(buf: &Buffer, line: usize) -> usize {
    let last = buf.len().saturating_sub(1);
    let mut row = line.min(last);
    if !is_boundary(buf, row) {
        while row < last && !is_boundary(buf, row + 1) {
            row += 1;
        }
    }
    while row < last && is_boundary(buf, row + 1) {
        row += 1;
    }
    if row < last {
        row += 1;
    }
    row
}

/// `{`: the first row of the previous paragraph, or row 0.
///
/// Goes to the top of the current paragraph, skips the boundary rows above
/// it, then climbs to the top of the paragraph found there.
#[must_use]
pub fn paragraph_backward(buf: &Buffer, line: usize) -> usize {
    let mut row = line.min(buf.len().saturating_sub(1));
    if !is_boundary(buf, row) {
        while row > 0 && !is_boundary(buf, row - 1) {
            row -= 1;
        }
    }
    while row > 0 && is_boundary(buf, row - 1) {
        row -= 1;
    }
    while row > 0 && !is_boundary(buf, row - 1) {
        row -= 1;
    }
    row
}

// ---------------------------------------------------------------------------
// Brackets
// ---------------------------------------------------------------------------

/// The partner of a bracket byte and whether `b` opens.
///
/// `<>` are not matched by `%` (they are too often comparison operators) but
/// are valid text-object delimiters; see [`text_object`](crate::text_object).
#[must_use]
pub const fn bracket_pair(b: u8) -> Option<(u8, bool)> {
    match b {
        b'(' => Some((b')', true)),
        b'[' => Some((b']', true)),
        b'{' => Some((b'}', true)),
        b')' => Some((b'(', false)),
        b']' => Some((b'[', false)),
        b'}' => Some((b'{', false)),
        _ => None,
    }
}

/// `%`: the bracket matching the one under `pos`.
///
/// The cursor must sit exactly on one of `()[]{}`. Openers scan forward,
/// closers backward, across rows, counting nesting of the same bracket type.
/// Returns `None` when the cursor is not on a bracket or the partner is
/// missing.
#[must_use]
pub fn matching_bracket(buf: &Buffer, pos: Position) -> Option<Position> {
    let here = buf.byte_at(pos)?;
    let (partner, forward) = bracket_pair(here)?;

    let mut depth = 0usize;
    if forward {
        for line in pos.line..buf.len() {
            let bytes = buf.line(line);
            let from = if line == pos.line { pos.col } else { 0 };
            for (col, &b) in bytes.iter().enumerate().skip(from) {
                if b == here {
                    depth += 1;
                } else if b == partner {
                    depth -= 1;
                    if depth == 0 {
                        return Some(Position::new(line, col));
                    }
                }
            }
        }
    } else {
        for line in (0..=pos.line).rev() {
            let bytes = buf.line(line);
            let upto = if line == pos.line { pos.col + 1 } else { bytes.len() };
            for (col, &b) in bytes[..upto].iter().enumerate().rev() {
                if b == here {
                    depth += 1;
                } else if b == partner {
                    depth -= 1;
                    if depth == 0 {
                        return Some(Position::new(line, col));
                    }
                }
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Character search
// ---------------------------------------------------------------------------

/// Which of `f`, `F`, `t`, `T` is searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindKind {
    /// `f`: land on the byte.
    Forward,
    /// `F`: land on the byte, searching left.
    Backward,
    /// `t`: land just before the byte.
    TillForward,
    /// `T`: land just after the byte, searching left.
    TillBackward,
}

impl FindKind {
    #[inline]
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Forward | Self::TillForward)
    }

    /// Motions that include the byte they land on when used after an
    /// operator (`df`, `dt`). `F`/`T` are exclusive.
    #[inline]
    #[must_use]
    pub const fn is_inclusive(self) -> bool {
        self.is_forward()
    }
}

/// Column reached by a character search on row `pos.line`, or `None` when the
/// `count`th occurrence of `target` is not on the row. Never crosses rows.
#[must_use]
pub fn find_char(
    buf: &Buffer,
    pos: Position,
    kind: FindKind,
    target: u8,
    count: usize,
) -> Option<usize> {
    let bytes = buf.line(pos.line);
    let count = count.max(1);
    if kind.is_forward() {
        let hit = bytes
            .iter()
            .enumerate()
            .skip(pos.col + 1)
            .filter(|&(_, &b)| b == target)
            .nth(count - 1)?
            .0;
        Some(if kind == FindKind::TillForward { hit - 1 } else { hit })
    } else {
        let hit = bytes[..pos.col.min(bytes.len())]
            .iter()
            .enumerate()
            .rev()
            .filter(|&(_, &b)| b == target)
            .nth(count - 1)?
            .0;
        Some(if kind == FindKind::TillBackward { hit + 1 } else { hit })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    fn buf(lines: &[&str]) -> Buffer {
        Buffer::from_lines(lines)
    }

    // -- paragraphs ---------------------------------------------------------

    fn paragraphs() -> Buffer {
        // 0 a      3 ""      6 e
        // 1 b      4 "  "
        // 2 ""     5 d
        buf(&["a", "b", "", "c", "  ", "d", "e"])
    }

    #[test]
    fn blank_rows_are_boundaries() {
        let b = paragraphs();
        assert!(is_boundary(&b, 2));
        assert!(is_boundary(&b, 4));
        assert!(!is_boundary(&b, 3));
        assert!(is_boundary(&b, 99));
    }

    #[test]
    fn forward_lands_on_next_paragraph_start() {
        let b = paragraphs();
        assert_eq!(paragraph_forward(&b, 0), 3);
        assert_eq!(paragraph_forward(&b, 3), 5);
        assert_eq!(paragraph_forward(&b, 2), 3);
    }

    #[test]
    fn forward_at_last_paragraph_goes_to_last_row() {
        let b = paragraphs();
        assert_eq!(paragraph_forward(&b, 5), 6);
        assert_eq!(paragraph_forward(&b, 6), 6);
    }

    #[test]
    fn backward_lands_on_previous_paragraph_start() {
        let b = paragraphs();
        assert_eq!(paragraph_backward(&b, 6), 3);
        assert_eq!(paragraph_backward(&b, 3), 0);
        assert_eq!(paragraph_backward(&b, 4), 3);
        assert_eq!(paragraph_backward(&b, 1), 0);
    }

    #[test]
    fn paragraph_on_empty_buffer() {
        let b = Buffer::new();
        assert_eq!(paragraph_forward(&b, 0), 0);
        assert_eq!(paragraph_backward(&b, 0), 0);
    }

    // -- brackets -----------------------------------------------------------

    #[test]
    fn nested_match_forward() {
        let b = buf(&["foo(bar(baz))"]);
        assert_eq!(matching_bracket(&b, p(0, 3)), Some(p(0, 12)));
        assert_eq!(matching_bracket(&b, p(0, 7)), Some(p(0, 11)));
    }

    #[test]
    fn nested_match_backward() {
        let b = buf(&["foo(bar(baz))"]);
        assert_eq!(matching_bracket(&b, p(0, 12)), Some(p(0, 3)));
    }

    #[test]
    fn match_across_rows() {
        let b = buf(&["fn x() {", "    if y { z }", "}"]);
        assert_eq!(matching_bracket(&b, p(0, 7)), Some(p(2, 0)));
        assert_eq!(matching_bracket(&b, p(2, 0)), Some(p(0, 7)));
    }

    #[test]
    fn other_bracket_types_do_not_count() {
        let b = buf(&["[ ( ] )"]);
        assert_eq!(matching_bracket(&b, p(0, 0)), Some(p(0, 4)));
    }

    #[test]
    fn no_match_when_not_on_bracket() {
        let b = buf(&["a (b)"]);
        assert_eq!(matching_bracket(&b, p(0, 0)), None);
        assert_eq!(matching_bracket(&b, p(0, 9)), None);
    }

    #[test]
    fn unbalanced_has_no_match() {
        let b = buf(&["((a)"]);
        assert_eq!(matching_bracket(&b, p(0, 0)), None);
    }

    // -- character search ---------------------------------------------------

    #[test]
    fn f_and_t_forward() {
        let b = buf(&["a,b,c,d"]);
        assert_eq!(find_char(&b, p(0, 0), FindKind::Forward, b',', 1), Some(1));
        assert_eq!(find_char(&b, p(0, 0), FindKind::Forward, b',', 2), Some(3));
        assert_eq!(find_char(&b, p(0, 0), FindKind::TillForward, b',', 2), Some(2));
        assert_eq!(find_char(&b, p(0, 0), FindKind::Forward, b',', 9), None);
    }

    #[test]
    fn f_skips_byte_under_cursor() {
        let b = buf(&["a,b,c"]);
        assert_eq!(find_char(&b, p(0, 1), FindKind::Forward, b',', 1), Some(3));
    }

    #[test]
    fn f_and_t_backward() {
        let b = buf(&["a,b,c,d"]);
        assert_eq!(find_char(&b, p(0, 6), FindKind::Backward, b',', 1), Some(5));
        assert_eq!(find_char(&b, p(0, 6), FindKind::TillBackward, b',', 2), Some(4));
        assert_eq!(find_char(&b, p(0, 0), FindKind::Backward, b',', 1), None);
    }

    #[test]
    fn search_never_crosses_rows() {
        let b = buf(&["abc", "x"]);
        assert_eq!(find_char(&b, p(0, 0), FindKind::Forward, b'x', 1), None);
    }

    #[test]
    fn till_adjacent_lands_on_cursor() {
        let b = buf(&["ab"]);
        assert_eq!(find_char(&b, p(0, 0), FindKind::TillForward, b'b', 1), Some(0));
    }
}
