//! Word motions over byte rows.
//!
//! | Motion | Key | Description |
//! |--------|-----|-------------|
//! | [`word_forward`] | `w` | Forward to start of next word |
//! | [`word_backward`] | `b` | Backward to start of previous word |
//! | [`word_end_forward`] | `e` | Forward to end of current/next word |
//! | [`big_word_forward`] | `W` | Forward to start of next WORD |
//! | [`big_word_backward`] | `B` | Backward to start of previous WORD |
//! | [`big_word_end_forward`] | `E` | Forward to end of current/next WORD |
//!
//! # Words vs WORDs
//!
//! A **word** is a run of word bytes (ASCII letters, digits, underscore, and
//! every byte `>= 0x80` so multi-byte characters stay whole) or a run of
//! punctuation. `hello.world` contains three words.
//!
//! A **WORD** is a run of non-blank bytes. `hello.world` is one WORD.
//!
//! Row ends count as whitespace, so every motion crosses rows freely and
//! empty rows are skipped like blanks.

use crate::buffer::{self, Buffer};
use crate::position::Position;

// ---------------------------------------------------------------------------
// Byte classification
// ---------------------------------------------------------------------------

/// Byte class for word boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// Letters, digits, underscore, non-ASCII.
    Word,
    /// Non-blank, non-word bytes.
    Punctuation,
    /// Space and tab, plus the virtual byte at every row end.
    Blank,
}

/// True for bytes that make up a word: ASCII alphanumerics, `_`, and any
/// byte of a multi-byte UTF-8 sequence.
#[inline]
#[must_use]
pub const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

#[inline]
#[must_use]
pub const fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | 0x0b | 0x0c)
}

/// Classify a byte for small-word motions (`w`/`b`/`e`).
pub(crate) const fn classify(b: u8) -> CharClass {
    if is_blank(b) {
        CharClass::Blank
    } else if is_word_byte(b) {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

/// Classify a byte for WORD motions (`W`/`B`/`E`).
pub(crate) const fn classify_big(b: u8) -> CharClass {
    if is_blank(b) {
        CharClass::Blank
    } else {
        CharClass::Word
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// `w`: forward to the start of the next word.
#[must_use]
pub fn word_forward(buf: &Buffer, pos: Position) -> Position {
    forward_start(buf, pos, classify)
}

/// `b`: backward to the start of the previous word.
#[must_use]
pub fn word_backward(buf: &Buffer, pos: Position) -> Position {
    backward_start(buf, pos, classify)
}

/// `e`: forward to the end of the current or next word.
#[must_use]
pub fn word_end_forward(buf: &Buffer, pos: Position) -> Position {
    forward_end(buf, pos, classify)
}

/// `W`: forward to the start of the next WORD.
#[must_use]
pub fn big_word_forward(buf: &Buffer, pos: Position) -> Position {
    forward_start(buf, pos, classify_big)
}

/// `B`: backward to the start of the previous WORD.
#[must_use]
pub fn big_word_backward(buf: &Buffer, pos: Position) -> Position {
    backward_start(buf, pos, classify_big)
}

/// `E`: forward to the end of the current or next WORD.
#[must_use]
pub fn big_word_end_forward(buf: &Buffer, pos: Position) -> Position {
    forward_end(buf, pos, classify_big)
}

/// Last byte of the word (or WORD with `big`) under `pos`, or `None` when
/// `pos` is on a blank or past the row end. `cw` changes up to here.
#[must_use]
pub fn run_end(buf: &Buffer, pos: Position, big: bool) -> Option<Position> {
    let classify_fn = if big { classify_big } else { classify };
    let class = class_at(buf, pos, classify_fn);
    if class == CharClass::Blank {
        return None;
    }
    let mut end = pos;
    while class_at(buf, end.with_col(end.col + 1), classify_fn) == class {
        end.col += 1;
    }
    Some(end)
}

// ---------------------------------------------------------------------------
// Stepping
// ---------------------------------------------------------------------------

/// Class at `pos`; the slot one past the last byte of a row is blank.
fn class_at(buf: &Buffer, pos: Position, classify_fn: fn(u8) -> CharClass) -> CharClass {
    buf.line(pos.line)
        .get(pos.col)
        .map_or(CharClass::Blank, |&b| classify_fn(b))
}

/// Next slot in reading order, crossing into the following row after the
/// row-end slot.
fn step_forward(buf: &Buffer, pos: Position) -> Option<Position> {
    if pos.col < buf.row_len(pos.line) {
        Some(pos.with_col(pos.col + 1))
    } else if pos.line + 1 < buf.len() {
        Some(Position::new(pos.line + 1, 0))
    } else {
        None
    }
}

/// Previous slot in reading order; column 0 steps onto the previous row's
/// row-end slot.
fn step_backward(buf: &Buffer, pos: Position) -> Option<Position> {
    let col = pos.col.min(buf.row_len(pos.line));
    if col > 0 {
        Some(pos.with_col(col - 1))
    } else if pos.line > 0 {
        let line = pos.line - 1;
        Some(Position::new(line, buf.row_len(line)))
    } else {
        None
    }
}

/// End of the last row, where forward motions stop when they run out of text.
fn buffer_end(buf: &Buffer) -> Position {
    let line = buf.len().saturating_sub(1);
    Position::new(line, buf.row_len(line))
}

// ---------------------------------------------------------------------------
// Core algorithms
// ---------------------------------------------------------------------------

/// Forward to the start of the next word/WORD.
///
/// 1. Skip the rest of the run under the cursor (never past the row end).
/// 2. Skip whitespace and row ends.
/// 3. Land on the first byte of the next run, or at the end of the last row.
fn forward_start(buf: &Buffer, pos: Position, classify_fn: fn(u8) -> CharClass) -> Position {
    if buf.is_empty() {
        return pos;
    }
    let mut cur = pos;

    let start_class = class_at(buf, cur, classify_fn);
    if start_class != CharClass::Blank {
        while class_at(buf, cur, classify_fn) == start_class {
            cur = cur.with_col(cur.col + 1);
        }
    }

    while class_at(buf, cur, classify_fn) == CharClass::Blank {
        let Some(next) = step_forward(buf, cur) else {
            return buffer_end(buf);
        };
        cur = next;
    }
    cur
}

/// Backward to the start of the previous word/WORD.
///
/// 1. Step back one byte, then skip whitespace and row ends backward.
/// 2. Walk back through the run found to its first byte.
fn backward_start(buf: &Buffer, pos: Position, classify_fn: fn(u8) -> CharClass) -> Position {
    let Some(mut cur) = step_backward(buf, pos) else {
        return Position::ZERO;
    };

    while class_at(buf, cur, classify_fn) == CharClass::Blank {
        let Some(prev) = step_backward(buf, cur) else {
            return Position::ZERO;
        };
        cur = prev;
    }

    let line = buf.line(cur.line);
    let run = classify_fn(line[cur.col]);
    while cur.col > 0 && classify_fn(line[cur.col - 1]) == run {
        cur.col -= 1;
    }
    cur
}

/// Forward to the end of the current or next word/WORD.
///
/// 1. Step forward one byte, then skip whitespace and row ends.
/// 2. Advance to the last byte of the run found.
///
/// Stays put when no run follows. The result is snapped onto a UTF-8
/// boundary so it never splits a character.
fn forward_end(buf: &Buffer, pos: Position, classify_fn: fn(u8) -> CharClass) -> Position {
    let Some(mut cur) = step_forward(buf, pos) else {
        return pos;
    };

    while class_at(buf, cur, classify_fn) == CharClass::Blank {
        let Some(next) = step_forward(buf, cur) else {
            return pos;
        };
        cur = next;
    }

    let line = buf.line(cur.line);
    let run = classify_fn(line[cur.col]);
    while cur.col + 1 < line.len() && classify_fn(line[cur.col + 1]) == run {
        cur.col += 1;
    }
    cur.with_col(buffer::snap_boundary(line, cur.col))
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

    // -- Classification -----------------------------------------------------

    #[test]
    fn classify_bytes() {
        assert_eq!(classify(b'a'), CharClass::Word);
        assert_eq!(classify(b'9'), CharClass::Word);
        assert_eq!(classify(b'_'), CharClass::Word);
        assert_eq!(classify(0xC3), CharClass::Word);
        assert_eq!(classify(b'.'), CharClass::Punctuation);
        assert_eq!(classify(b'('), CharClass::Punctuation);
        assert_eq!(classify(b' '), CharClass::Blank);
        assert_eq!(classify(b'\t'), CharClass::Blank);
    }

    #[test]
    fn classify_big_merges_punctuation() {
        assert_eq!(classify_big(b'.'), CharClass::Word);
        assert_eq!(classify_big(b'a'), CharClass::Word);
        assert_eq!(classify_big(b' '), CharClass::Blank);
    }

    // -- w ------------------------------------------------------------------

    #[test]
    fn w_basic() {
        let b = buf(&["hello world foo"]);
        assert_eq!(word_forward(&b, p(0, 0)), p(0, 6));
        assert_eq!(word_forward(&b, p(0, 6)), p(0, 12));
    }

    #[test]
    fn w_from_middle_of_word() {
        let b = buf(&["hello world"]);
        assert_eq!(word_forward(&b, p(0, 2)), p(0, 6));
    }

    #[test]
    fn w_stops_at_punctuation() {
        let b = buf(&["foo.bar(baz)"]);
        assert_eq!(word_forward(&b, p(0, 0)), p(0, 3));
        assert_eq!(word_forward(&b, p(0, 3)), p(0, 4));
        assert_eq!(word_forward(&b, p(0, 4)), p(0, 7));
    }

    #[test]
    fn w_consecutive_punct_groups() {
        let b = buf(&["a->b"]);
        assert_eq!(word_forward(&b, p(0, 0)), p(0, 1));
        assert_eq!(word_forward(&b, p(0, 1)), p(0, 3));
    }

    #[test]
    fn w_crosses_rows_and_skips_empty_rows() {
        let b = buf(&["one", "", "   ", "  two"]);
        assert_eq!(word_forward(&b, p(0, 0)), p(3, 2));
    }

    #[test]
    fn w_at_buffer_end_lands_on_row_end() {
        let b = buf(&["abc def"]);
        assert_eq!(word_forward(&b, p(0, 4)), p(0, 7));
    }

    #[test]
    fn w_indented_code() {
        let b = buf(&["    fn main() {"]);
        assert_eq!(word_forward(&b, p(0, 4)), p(0, 7));
        assert_eq!(word_forward(&b, p(0, 7)), p(0, 11));
    }

    #[test]
    fn w_empty_buffer() {
        assert_eq!(word_forward(&Buffer::new(), p(0, 0)), p(0, 0));
    }

    #[test]
    fn w_multibyte_word_is_one_run() {
        let b = buf(&["café bar"]);
        assert_eq!(word_forward(&b, p(0, 0)), p(0, 6));
    }

    // -- b ------------------------------------------------------------------

    #[test]
    fn b_basic() {
        let b = buf(&["hello world foo"]);
        assert_eq!(word_backward(&b, p(0, 12)), p(0, 6));
        assert_eq!(word_backward(&b, p(0, 6)), p(0, 0));
    }

    #[test]
    fn b_from_middle_of_word() {
        let b = buf(&["hello world"]);
        assert_eq!(word_backward(&b, p(0, 8)), p(0, 6));
    }

    #[test]
    fn b_crosses_rows() {
        let b = buf(&["alpha beta", "", "gamma"]);
        assert_eq!(word_backward(&b, p(2, 0)), p(0, 6));
    }

    #[test]
    fn b_at_start_stays_at_origin() {
        let b = buf(&["  x"]);
        assert_eq!(word_backward(&b, p(0, 0)), p(0, 0));
        assert_eq!(word_backward(&b, p(0, 2)), p(0, 0));
    }

    #[test]
    fn b_consecutive_punct_groups() {
        let b = buf(&["a->b"]);
        assert_eq!(word_backward(&b, p(0, 3)), p(0, 1));
        assert_eq!(word_backward(&b, p(0, 1)), p(0, 0));
    }

    // -- e ------------------------------------------------------------------

    #[test]
    fn e_basic() {
        let b = buf(&["hello world"]);
        assert_eq!(word_end_forward(&b, p(0, 0)), p(0, 4));
        assert_eq!(word_end_forward(&b, p(0, 4)), p(0, 10));
    }

    #[test]
    fn e_across_rows() {
        let b = buf(&["ab", "", "cd ef"]);
        assert_eq!(word_end_forward(&b, p(0, 1)), p(2, 1));
    }

    #[test]
    fn e_single_char_words() {
        let b = buf(&["a b c"]);
        assert_eq!(word_end_forward(&b, p(0, 0)), p(0, 2));
    }

    #[test]
    fn e_end_of_buffer_no_move() {
        let b = buf(&["abc  "]);
        assert_eq!(word_end_forward(&b, p(0, 2)), p(0, 2));
    }

    #[test]
    fn e_snaps_onto_character_start() {
        let b = buf(&["café x"]);
        // Last run byte is the continuation byte at 4; land on its lead byte.
        assert_eq!(word_end_forward(&b, p(0, 0)), p(0, 3));
    }

    // -- WORD ---------------------------------------------------------------

    #[test]
    fn big_w_treats_punct_as_word() {
        let b = buf(&["foo.bar baz"]);
        assert_eq!(big_word_forward(&b, p(0, 0)), p(0, 8));
    }

    #[test]
    fn big_b_treats_punct_as_word() {
        let b = buf(&["foo.bar baz"]);
        assert_eq!(big_word_backward(&b, p(0, 8)), p(0, 0));
    }

    #[test]
    fn big_e_treats_punct_as_word() {
        let b = buf(&["foo.bar baz"]);
        assert_eq!(big_word_end_forward(&b, p(0, 0)), p(0, 6));
    }

    #[test]
    fn roundtrip_w_then_b() {
        let b = buf(&["let x = compute(a, b);"]);
        let mut pos = p(0, 0);
        for _ in 0..4 {
            let next = word_forward(&b, pos);
            assert_eq!(word_backward(&b, next), pos);
            pos = next;
        }
    }

    #[test]
    fn run_end_stays_in_run() {
        let b = buf(&["foo.bar  baz"]);
        assert_eq!(run_end(&b, p(0, 1), false), Some(p(0, 2)));
        assert_eq!(run_end(&b, p(0, 3), false), Some(p(0, 3)));
        assert_eq!(run_end(&b, p(0, 0), true), Some(p(0, 6)));
        assert_eq!(run_end(&b, p(0, 7), false), None);
        assert_eq!(run_end(&b, p(0, 11), false), Some(p(0, 11)));
    }
}
