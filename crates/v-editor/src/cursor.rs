//! Cursor and visual selection.
//!
//! The `Cursor` tracks a position, a preferred column for vertical movement,
//! and an optional selection anchor. Movement methods take a `past_end: bool`
//! instead of a mode:
//!
//! - **Normal / Visual**: `past_end = false` (cursor sits ON a byte)
//! - **Insert**: `past_end = true` (cursor may sit after the last byte)
//!
//! Columns are byte offsets. Every horizontal step moves by whole UTF-8
//! characters and every clamp snaps back to a character boundary, so the
//! cursor never rests inside a multi-byte sequence.
//!
//! # Preferred column
//!
//! Horizontal motions and explicit column changes record the column they
//! land on. Vertical motions leave it alone and land on
//! `min(preferred, row max)`, so passing through a short row does not lose
//! the column.

use std::ops::RangeInclusive;

use crate::buffer::{self, Buffer};
use crate::mode::VisualKind;
use crate::motion::{self, FindKind};
use crate::position::{Position, Range};
use crate::word;

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// A cursor in a buffer. Does not borrow the buffer; movement methods take
/// it as a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    pos: Position,
    preferred_col: usize,
    /// The fixed end of a visual selection.
    anchor: Option<Position>,
}

impl Cursor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pos: Position::ZERO,
            preferred_col: 0,
            anchor: None,
        }
    }

    /// A cursor at `pos` (not clamped).
    #[must_use]
    pub const fn at(pos: Position) -> Self {
        Self {
            pos,
            preferred_col: pos.col,
            anchor: None,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    #[must_use]
    pub const fn line(&self) -> usize {
        self.pos.line
    }

    #[inline]
    #[must_use]
    pub const fn col(&self) -> usize {
        self.pos.col
    }

    #[inline]
    #[must_use]
    pub const fn preferred_col(&self) -> usize {
        self.preferred_col
    }

    #[inline]
    #[must_use]
    pub const fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// The active selection of the given shape, if an anchor is set.
    #[must_use]
    pub fn selection(&self, kind: VisualKind) -> Option<Selection> {
        self.anchor.map(|anchor| Selection {
            kind,
            anchor,
            head: self.pos,
        })
    }

    // -- Selection control --------------------------------------------------

    /// Anchor the selection at the current position.
    pub const fn set_anchor(&mut self) {
        self.anchor = Some(self.pos);
    }

    pub const fn set_anchor_at(&mut self, pos: Position) {
        self.anchor = Some(pos);
    }

    pub const fn clear_anchor(&mut self) {
        self.anchor = None;
    }

    /// Visual `o`: jump to the other end of the selection.
    pub const fn swap_anchor(&mut self) {
        if let Some(anchor) = self.anchor {
            self.anchor = Some(self.pos);
            self.pos = anchor;
            self.preferred_col = anchor.col;
        }
    }

    // -- Direct positioning -------------------------------------------------

    /// Move to `pos`, clamped. Records the column.
    pub fn set_position(&mut self, pos: Position, buf: &Buffer, past_end: bool) {
        self.pos = clamp(pos, buf, past_end);
        self.preferred_col = self.pos.col;
    }

    /// Move to row `line` (clamped), keeping the preferred column.
    pub fn goto_line(&mut self, line: usize, buf: &Buffer, past_end: bool) {
        self.pos.line = line.min(buf.len().saturating_sub(1));
        self.apply_preferred(buf, past_end);
    }

    // -- Horizontal movement ------------------------------------------------

    /// `h`: left by `count` characters, stopping at column 0.
    pub fn move_left(&mut self, count: usize, buf: &Buffer, past_end: bool) {
        let bytes = buf.line(self.pos.line);
        let mut col = self.pos.col.min(max_col_for_line(buf, self.pos.line, past_end));
        for _ in 0..count {
            if col == 0 {
                break;
            }
            col = buffer::prev_boundary(bytes, col);
        }
        self.pos.col = col;
        self.preferred_col = col;
    }

    /// `l`: right by `count` characters, stopping at the column limit.
    pub fn move_right(&mut self, count: usize, buf: &Buffer, past_end: bool) {
        let bytes = buf.line(self.pos.line);
        let max = max_col_for_line(buf, self.pos.line, past_end);
        let mut col = self.pos.col.min(max);
        for _ in 0..count {
            let next = buffer::next_boundary(bytes, col);
            if next > max {
                break;
            }
            col = next;
        }
        self.pos.col = col;
        self.preferred_col = col;
    }

    /// Left arrow: like `h`, but column 0 wraps to the end of the previous
    /// row.
    pub fn arrow_left(&mut self, buf: &Buffer, past_end: bool) {
        if self.pos.col == 0 && self.pos.line > 0 {
            self.pos.line -= 1;
            self.move_to_line_end(buf, past_end);
        } else {
            self.move_left(1, buf, past_end);
        }
    }

    /// Right arrow: like `l`; in insert mode the row end wraps to the start
    /// of the next row.
    pub fn arrow_right(&mut self, buf: &Buffer, past_end: bool) {
        let at_end = self.pos.col >= max_col_for_line(buf, self.pos.line, past_end);
        if past_end && at_end && self.pos.line + 1 < buf.len() {
            self.pos.line += 1;
            self.move_to_line_start();
        } else {
            self.move_right(1, buf, past_end);
        }
    }

    /// `0` / Home.
    pub const fn move_to_line_start(&mut self) {
        self.pos.col = 0;
        self.preferred_col = 0;
    }

    /// `^`: first byte that is not a space or tab.
    pub fn move_to_first_non_blank(&mut self, buf: &Buffer, past_end: bool) {
        let col = buf.row(self.pos.line).map_or(0, buffer::Row::first_non_blank);
        self.pos.col = col.min(max_col_for_line(buf, self.pos.line, past_end));
        self.preferred_col = self.pos.col;
    }

    /// `$` / End.
    pub fn move_to_line_end(&mut self, buf: &Buffer, past_end: bool) {
        self.pos.col = max_col_for_line(buf, self.pos.line, past_end);
        self.preferred_col = self.pos.col;
    }

    // -- Vertical movement --------------------------------------------------

    pub fn move_up(&mut self, count: usize, buf: &Buffer, past_end: bool) {
        self.pos.line = self.pos.line.saturating_sub(count);
        self.apply_preferred(buf, past_end);
    }

    pub fn move_down(&mut self, count: usize, buf: &Buffer, past_end: bool) {
        let last = buf.len().saturating_sub(1);
        self.pos.line = self.pos.line.saturating_add(count).min(last);
        self.apply_preferred(buf, past_end);
    }

    /// `gg`.
    pub fn move_to_first_line(&mut self, buf: &Buffer, past_end: bool) {
        self.goto_line(0, buf, past_end);
    }

    /// `G`.
    pub fn move_to_last_line(&mut self, buf: &Buffer, past_end: bool) {
        self.goto_line(buf.len().saturating_sub(1), buf, past_end);
    }

    // -- Word motions -------------------------------------------------------

    /// `w`.
    pub fn word_forward(&mut self, count: usize, buf: &Buffer, past_end: bool) {
        self.repeat(count, buf, past_end, word::word_forward);
    }

    /// `b`.
    pub fn word_backward(&mut self, count: usize, buf: &Buffer, past_end: bool) {
        self.repeat(count, buf, past_end, word::word_backward);
    }

    /// `e`.
    pub fn word_end_forward(&mut self, count: usize, buf: &Buffer, past_end: bool) {
        self.repeat(count, buf, past_end, word::word_end_forward);
    }

    /// `W`.
    pub fn big_word_forward(&mut self, count: usize, buf: &Buffer, past_end: bool) {
        self.repeat(count, buf, past_end, word::big_word_forward);
    }

    /// `B`.
    pub fn big_word_backward(&mut self, count: usize, buf: &Buffer, past_end: bool) {
        self.repeat(count, buf, past_end, word::big_word_backward);
    }

    /// `E`.
    pub fn big_word_end_forward(&mut self, count: usize, buf: &Buffer, past_end: bool) {
        self.repeat(count, buf, past_end, word::big_word_end_forward);
    }

    // -- Row-level motions --------------------------------------------------

    /// `f`/`F`/`t`/`T`. Returns `false` (and stays put) when the byte is not
    /// found on the row.
    pub fn find_char(
        &mut self,
        buf: &Buffer,
        kind: FindKind,
        target: u8,
        count: usize,
        past_end: bool,
    ) -> bool {
        let Some(col) = motion::find_char(buf, self.pos, kind, target, count) else {
            return false;
        };
        self.set_position(self.pos.with_col(col), buf, past_end);
        true
    }

    /// `}`. Lands at column 0.
    pub fn paragraph_forward(&mut self, count: usize, buf: &Buffer) {
        for _ in 0..count {
            self.pos.line = motion::paragraph_forward(buf, self.pos.line);
        }
        self.move_to_line_start();
    }

    /// `{`. Lands at column 0.
    pub fn paragraph_backward(&mut self, count: usize, buf: &Buffer) {
        for _ in 0..count {
            self.pos.line = motion::paragraph_backward(buf, self.pos.line);
        }
        self.move_to_line_start();
    }

    /// `%`. Returns `false` when there is nothing to match.
    pub fn matching_bracket(&mut self, buf: &Buffer) -> bool {
        let Some(target) = motion::matching_bracket(buf, self.pos) else {
            return false;
        };
        self.pos = target;
        self.preferred_col = target.col;
        true
    }

    // -- Clamping -----------------------------------------------------------

    /// Pull the cursor (and anchor) back inside the buffer after an edit.
    pub fn clamp(&mut self, buf: &Buffer, past_end: bool) {
        self.pos = clamp(self.pos, buf, past_end);
        if let Some(anchor) = &mut self.anchor {
            *anchor = clamp(*anchor, buf, past_end);
        }
    }

    // -- Internals ----------------------------------------------------------

    fn apply_preferred(&mut self, buf: &Buffer, past_end: bool) {
        let max = max_col_for_line(buf, self.pos.line, past_end);
        let col = self.preferred_col.min(max);
        self.pos.col = buffer::snap_boundary(buf.line(self.pos.line), col);
    }

    fn repeat(
        &mut self,
        count: usize,
        buf: &Buffer,
        past_end: bool,
        step: fn(&Buffer, Position) -> Position,
    ) {
        let mut pos = self.pos;
        for _ in 0..count.max(1) {
            pos = step(buf, pos);
        }
        self.set_position(pos, buf, past_end);
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A visual selection: the anchor and the cursor ("head") it extends to.
///
/// The endpoints are kept as the user made them; every consumer goes
/// through [`Selection::range`] or [`Selection::rows`], which normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub kind: VisualKind,
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    /// Rows the selection touches.
    #[must_use]
    pub fn rows(&self) -> RangeInclusive<usize> {
        let r = Range::ordered(self.anchor, self.head);
        r.start.line..=r.end.line
    }

    /// The normalized inclusive span.
    ///
    /// Character selections extend the end over the whole UTF-8 character
    /// under it. Line selections run from column 0 of the first row to the
    /// last byte of the last row.
    #[must_use]
    pub fn range(&self, buf: &Buffer) -> Range {
        let r = Range::ordered(self.anchor, self.head);
        match self.kind {
            VisualKind::Char => {
                let bytes = buf.line(r.end.line);
                let end = if r.end.col < bytes.len() {
                    buffer::next_boundary(bytes, r.end.col) - 1
                } else {
                    r.end.col
                };
                Range::new(r.start, r.end.with_col(end))
            }
            VisualKind::Line => Range::new(
                Position::new(r.start.line, 0),
                Position::new(r.end.line, buf.row_len(r.end.line).saturating_sub(1)),
            ),
        }
    }

    /// Selected columns of row `line` as an inclusive pair, or `None` when
    /// the row is outside the selection or has no selected bytes.
    #[must_use]
    pub fn columns_on(&self, line: usize, buf: &Buffer) -> Option<(usize, usize)> {
        let len = buf.row_len(line);
        if len == 0 || !self.rows().contains(&line) {
            return None;
        }
        let r = self.range(buf);
        let first = if line == r.start.line { r.start.col } else { 0 };
        let last = if line == r.end.line { r.end.col.min(len - 1) } else { len - 1 };
        (first <= last).then_some((first, last))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Largest legal column on `line`: the row length when the cursor may sit
/// past the end, otherwise the start of the last character (0 for an empty
/// row).
#[must_use]
pub fn max_col_for_line(buf: &Buffer, line: usize, past_end: bool) -> usize {
    let bytes = buf.line(line);
    if past_end {
        bytes.len()
    } else {
        buffer::prev_boundary(bytes, bytes.len())
    }
}

/// Clamp a position into the buffer and onto a character boundary.
#[must_use]
pub fn clamp(pos: Position, buf: &Buffer, past_end: bool) -> Position {
    if buf.is_empty() {
        return Position::ZERO;
    }
    let line = pos.line.min(buf.len() - 1);
    let col = pos.col.min(max_col_for_line(buf, line, past_end));
    Position::new(line, buffer::snap_boundary(buf.line(line), col))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
