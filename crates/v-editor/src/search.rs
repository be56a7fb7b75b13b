//! Literal search over byte rows.
//!
//! # Search flow
//!
//! 1. `/` or `?` creates a [`SearchState`] holding the input and the cursor
//!    and scroll position to restore on cancel.
//! 2. Every keystroke re-runs the search from the saved cursor, so the
//!    cursor previews the match as the pattern grows.
//! 3. Return keeps the pattern for `n`/`N`; Escape restores the saved state.
//!
//! Matches never start at the search origin itself: forward searches begin
//! one byte after it, backward searches one byte before. With `wrap` the
//! scan continues from the other end of the buffer and may come back to the
//! origin row.

use crate::buffer::{Buffer, prev_boundary};
use crate::position::Position;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

impl SearchDirection {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// An active search prompt.
#[derive(Debug, Clone)]
pub struct SearchState {
    input: Vec<u8>,
    direction: SearchDirection,
    saved_pos: Position,
    saved_top_line: usize,
}

impl SearchState {
    #[must_use]
    pub const fn new(direction: SearchDirection, saved_pos: Position, saved_top_line: usize) -> Self {
        Self {
            input: Vec::new(),
            direction,
            saved_pos,
            saved_top_line,
        }
    }

    #[inline]
    #[must_use]
    pub fn input(&self) -> &[u8] {
        &self.input
    }

    #[inline]
    #[must_use]
    pub const fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Cursor position when the prompt opened.
    #[inline]
    #[must_use]
    pub const fn saved_pos(&self) -> Position {
        self.saved_pos
    }

    /// First visible row when the prompt opened.
    #[inline]
    #[must_use]
    pub const fn saved_top_line(&self) -> usize {
        self.saved_top_line
    }

    pub fn push(&mut self, byte: u8) {
        self.input.push(byte);
    }

    /// Delete the last character (a whole UTF-8 sequence). Returns `false`
    /// when the input was already empty.
    pub fn backspace(&mut self) -> bool {
        if self.input.is_empty() {
            return false;
        }
        let cut = prev_boundary(&self.input, self.input.len());
        self.input.truncate(cut);
        true
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// `/` for forward, `?` for backward.
    #[must_use]
    pub const fn prefix(&self) -> char {
        match self.direction {
            SearchDirection::Forward => '/',
            SearchDirection::Backward => '?',
        }
    }
}

// ---------------------------------------------------------------------------
// Search functions
// ---------------------------------------------------------------------------

/// First match of `pattern` in `hay` starting at or after `from`.
#[must_use]
pub fn find_in(hay: &[u8], pattern: &[u8], from: usize) -> Option<usize> {
    if pattern.is_empty() || from > hay.len() {
        return None;
    }
    hay[from..]
        .windows(pattern.len())
        .position(|w| w == pattern)
        .map(|i| i + from)
}

/// Last match of `pattern` in `hay` starting strictly before `before`.
#[must_use]
pub fn rfind_in(hay: &[u8], pattern: &[u8], before: usize) -> Option<usize> {
    if pattern.is_empty() || hay.len() < pattern.len() {
        return None;
    }
    let last_start = (hay.len() - pattern.len()).min(before.checked_sub(1)?);
    (0..=last_start).rev().find(|&i| hay[i..].starts_with(pattern))
}

/// Next match after `from`, scanning forward.
#[must_use]
pub fn find_forward(buf: &Buffer, pattern: &[u8], from: Position, wrap: bool) -> Option<Position> {
    if pattern.is_empty() || buf.is_empty() {
        return None;
    }
    let origin = from.line.min(buf.len() - 1);
    let hit = |line: usize, col: usize| find_in(buf.line(line), pattern, col).map(|c| Position::new(line, c));

    if let Some(p) = hit(origin, from.col.saturating_add(1)) {
        return Some(p);
    }
    if let Some(p) = (origin + 1..buf.len()).find_map(|l| hit(l, 0)) {
        return Some(p);
    }
    if !wrap {
        return None;
    }
    (0..origin)
        .find_map(|l| hit(l, 0))
        .or_else(|| hit(origin, 0).filter(|p| p.col <= from.col))
}

/// Previous match before `from`, scanning backward.
#[must_use]
pub fn find_backward(buf: &Buffer, pattern: &[u8], from: Position, wrap: bool) -> Option<Position> {
    if pattern.is_empty() || buf.is_empty() {
        return None;
    }
    let origin = from.line.min(buf.len() - 1);
    let hit = |line: usize, before: usize| {
        rfind_in(buf.line(line), pattern, before).map(|c| Position::new(line, c))
    };

    if let Some(p) = hit(origin, from.col) {
        return Some(p);
    }
    if let Some(p) = (0..origin).rev().find_map(|l| hit(l, usize::MAX)) {
        return Some(p);
    }
    if !wrap {
        return None;
    }
    (origin + 1..buf.len())
        .rev()
        .find_map(|l| hit(l, usize::MAX))
        .or_else(|| hit(origin, usize::MAX).filter(|p| p.col >= from.col))
}

/// Search in `direction`.
#[must_use]
pub fn find(
    buf: &Buffer,
    pattern: &[u8],
    from: Position,
    direction: SearchDirection,
    wrap: bool,
) -> Option<Position> {
    match direction {
        SearchDirection::Forward => find_forward(buf, pattern, from, wrap),
        SearchDirection::Backward => find_backward(buf, pattern, from, wrap),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
