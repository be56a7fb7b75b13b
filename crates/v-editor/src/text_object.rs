//! Text objects: regions selected by structure rather than motion.
//!
//! ```text
//! operator + text-object = action
//! d        + iw          = delete inner word
//! c        + i"          = change inside quotes
//! y        + a(          = yank around parentheses
//! ```
//!
//! Every function takes a buffer and a cursor position and returns an
//! **inclusive** [`Range`], or `None` when the object is not there (cursor
//! off a word, no enclosing pair, nothing between the delimiters).
//!
//! | Inner    | Around   | Description                         |
//! |----------|----------|-------------------------------------|
//! | `iw`     | `aw`     | word-byte run (+ trailing blanks)   |
//! | `iW`     | `aW`     | non-blank run (+ trailing blanks)   |
//! | `i"`     | `a"`     | double quotes, single row           |
//! | `i'`     | `a'`     | single quotes, single row           |
//! | `` i` `` | `` a` `` | backticks, single row               |
//! | `i(` `ib`| `a(` `ab`| parentheses, across rows            |
//! | `i[`     | `a[`     | square brackets, across rows        |
//! | `i{` `iB`| `a{` `aB`| braces, across rows                 |
//! | `i<`     | `a<`     | angle brackets, across rows         |

use crate::buffer::Buffer;
use crate::position::{Position, Range};
use crate::word::{is_blank, is_word_byte};

/// Resolve the object named by `key` after `i` (`inner == true`) or `a`.
#[must_use]
pub fn select(buf: &Buffer, pos: Position, key: u8, inner: bool) -> Option<Range> {
    match (key, inner) {
        (b'w', true) => inner_word(buf, pos),
        (b'w', false) => a_word(buf, pos),
        (b'W', true) => inner_big_word(buf, pos),
        (b'W', false) => a_big_word(buf, pos),
        (b'"' | b'\'' | b'`', true) => inner_quote(buf, pos, key),
        (b'"' | b'\'' | b'`', false) => a_quote(buf, pos, key),
        _ => {
            let (open, close) = delimiters(key)?;
            if inner {
                inner_bracket(buf, pos, open, close)
            } else {
                a_bracket(buf, pos, open, close)
            }
        }
    }
}

/// Bracket pair named by a text-object key.
const fn delimiters(key: u8) -> Option<(u8, u8)> {
    match key {
        b'(' | b')' | b'b' => Some((b'(', b')')),
        b'[' | b']' => Some((b'[', b']')),
        b'{' | b'}' | b'B' => Some((b'{', b'}')),
        b'<' | b'>' => Some((b'<', b'>')),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Word objects
// ---------------------------------------------------------------------------

/// `iw`: the run of word bytes under the cursor.
#[must_use]
pub fn inner_word(buf: &Buffer, pos: Position) -> Option<Range> {
    run_at(buf, pos, is_word_byte)
}

/// `aw`: the word plus the blanks after it.
#[must_use]
pub fn a_word(buf: &Buffer, pos: Position) -> Option<Range> {
    inner_word(buf, pos).map(|r| with_trailing_blanks(buf, r))
}

/// `iW`: the run of non-blank bytes under the cursor.
#[must_use]
pub fn inner_big_word(buf: &Buffer, pos: Position) -> Option<Range> {
    run_at(buf, pos, |b| !is_blank(b))
}

/// `aW`: the WORD plus the blanks after it.
#[must_use]
pub fn a_big_word(buf: &Buffer, pos: Position) -> Option<Range> {
    inner_big_word(buf, pos).map(|r| with_trailing_blanks(buf, r))
}

fn run_at(buf: &Buffer, pos: Position, member: fn(u8) -> bool) -> Option<Range> {
    let bytes = buf.line(pos.line);
    if !member(*bytes.get(pos.col)?) {
        return None;
    }
    let mut start = pos.col;
    while start > 0 && member(bytes[start - 1]) {
        start -= 1;
    }
    let mut end = pos.col;
    while end + 1 < bytes.len() && member(bytes[end + 1]) {
        end += 1;
    }
    Some(Range::new(pos.with_col(start), pos.with_col(end)))
}

fn with_trailing_blanks(buf: &Buffer, r: Range) -> Range {
    let bytes = buf.line(r.end.line);
    let mut end = r.end.col;
    while end + 1 < bytes.len() && is_blank(bytes[end + 1]) {
        end += 1;
    }
    Range::new(r.start, r.end.with_col(end))
}

// ---------------------------------------------------------------------------
// Quote objects
// ---------------------------------------------------------------------------

/// `i"`, `i'`, `` i` ``: the bytes strictly between the quotes.
#[must_use]
pub fn inner_quote(buf: &Buffer, pos: Position, quote: u8) -> Option<Range> {
    let (open, close) = find_quote_pair(buf, pos, quote)?;
    (open + 1 < close).then(|| Range::new(pos.with_col(open + 1), pos.with_col(close - 1)))
}

/// `a"`, `a'`, `` a` ``: the quotes and everything between.
#[must_use]
pub fn a_quote(buf: &Buffer, pos: Position, quote: u8) -> Option<Range> {
    let (open, close) = find_quote_pair(buf, pos, quote)?;
    Some(Range::new(pos.with_col(open), pos.with_col(close)))
}

/// Columns of the quote pair enclosing `pos` on its row.
///
/// On a quote byte, an earlier quote on the row makes it the closing one;
/// otherwise it opens. Off a quote, the nearest quote at or before the cursor
/// opens and the next one after it closes.
fn find_quote_pair(buf: &Buffer, pos: Position, quote: u8) -> Option<(usize, usize)> {
    let bytes = buf.line(pos.line);
    if bytes.is_empty() {
        return None;
    }
    let col = pos.col.min(bytes.len() - 1);
    let earlier = bytes[..col].iter().rposition(|&b| b == quote);

    let open = if bytes[col] == quote {
        match earlier {
            Some(open) => return Some((open, col)),
            None => col,
        }
    } else {
        earlier?
    };
    let close = open + 1 + bytes[open + 1..].iter().position(|&b| b == quote)?;
    Some((open, close))
}

// ---------------------------------------------------------------------------
// Bracket objects
// ---------------------------------------------------------------------------

/// `i(` and friends: between the brackets, exclusive. A block whose
/// brackets sit on different rows yields the text from just after the opener
/// to just before the closer, row ends included.
#[must_use]
pub fn inner_bracket(buf: &Buffer, pos: Position, open: u8, close: u8) -> Option<Range> {
    let (o, c) = find_bracket_pair(buf, pos, open, close)?;
    let start = o.with_col(o.col + 1);
    let end = if c.col > 0 {
        c.with_col(c.col - 1)
    } else {
        let line = c.line - 1;
        Position::new(line, buf.row_len(line))
    };
    if end < start || (start.line == end.line && start.col >= buf.row_len(start.line)) {
        return None;
    }
    Some(Range::new(start, end))
}

/// `a(` and friends: the brackets and everything between.
#[must_use]
pub fn a_bracket(buf: &Buffer, pos: Position, open: u8, close: u8) -> Option<Range> {
    let (o, c) = find_bracket_pair(buf, pos, open, close)?;
    Some(Range::new(o, c))
}

/// The innermost `open`/`close` pair around `pos`. A cursor on either
/// bracket selects that bracket's pair.
fn find_bracket_pair(
    buf: &Buffer,
    pos: Position,
    open: u8,
    close: u8,
) -> Option<(Position, Position)> {
    let opener = find_opening(buf, pos, open, close)?;
    let closer = find_closing(buf, opener, open, close)?;
    Some((opener, closer))
}

/// Scan backward from `pos` for the unmatched `open`.
fn find_opening(buf: &Buffer, pos: Position, open: u8, close: u8) -> Option<Position> {
    let mut depth = 0usize;
    for line in (0..=pos.line.min(buf.len().checked_sub(1)?)).rev() {
        let bytes = buf.line(line);
        let upto = if line == pos.line {
            match bytes.get(pos.col) {
                // Standing on the closer: its own opener is the target.
                Some(&b) if b == close => pos.col,
                Some(_) => pos.col + 1,
                None => bytes.len(),
            }
        } else {
            bytes.len()
        };
        for (col, &b) in bytes[..upto].iter().enumerate().rev() {
            if b == close {
                depth += 1;
            } else if b == open {
                if depth == 0 {
                    return Some(Position::new(line, col));
                }
                depth -= 1;
            }
        }
    }
    None
}

/// Scan forward from just after `opener` for its `close`.
fn find_closing(buf: &Buffer, opener: Position, open: u8, close: u8) -> Option<Position> {
    let mut depth = 0usize;
    for line in opener.line..buf.len() {
        let from = if line == opener.line { opener.col + 1 } else { 0 };
        for (col, &b) in buf.line(line).iter().enumerate().skip(from) {
            if b == open {
                depth += 1;
            } else if b == close {
                if depth == 0 {
                    return Some(Position::new(line, col));
                }
                depth -= 1;
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
