//! Line buffer: the single source of truth for text content.
//!
//! A `Buffer` is an ordered `Vec<Row>`. Each row stores its bytes without a
//! terminator, a parallel highlight array, and whether it leaves a block
//! comment open. Row identity is its index; [`Row::index`] is renumbered on
//! every structural change.
//!
//! # Contracts
//!
//! - Out-of-range rows and columns are **no-ops**, never errors. Columns past
//!   the end of a row clamp to the row end.
//! - Only the capacity caps ([`MAX_ROWS`], [`MAX_ROW_BYTES`]) are reported,
//!   as [`EditError`].
//! - Every content mutation bumps the dirty counter and re-highlights the
//!   affected rows, propagating block-comment state forward until it settles.

use tracing::{debug, trace, warn};

use crate::error::EditError;
use crate::position::Position;
use crate::syntax::{self, HighlightClass, SyntaxDef};

/// Hard cap on the number of rows.
pub const MAX_ROWS: usize = 1_000_000;

/// Hard cap on the byte length of one row.
pub const MAX_ROW_BYTES: usize = 1_000_000;

/// Row capacity reserved on first growth.
const INITIAL_ROWS: usize = 128;

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// One line of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    index: usize,
    bytes: Vec<u8>,
    hl: Vec<HighlightClass>,
    open_comment: bool,
}

impl Row {
    /// Position of this row in its buffer.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Highlight class per byte; always `hl().len() == len()`.
    #[inline]
    #[must_use]
    pub fn hl(&self) -> &[HighlightClass] {
        &self.hl
    }

    /// True when a block comment is still open at the end of this row.
    #[inline]
    #[must_use]
    pub const fn open_comment(&self) -> bool {
        self.open_comment
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the row is empty or holds only spaces and tabs.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.bytes.iter().all(|&b| b == b' ' || b == b'\t')
    }

    /// Byte offset of the first byte that is not a space or tab.
    #[must_use]
    pub fn first_non_blank(&self) -> usize {
        self.bytes
            .iter()
            .position(|&b| b != b' ' && b != b'\t')
            .unwrap_or(self.bytes.len())
    }
}

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// An editable sequence of rows.
#[derive(Debug, Clone)]
pub struct Buffer {
    rows: Vec<Row>,
    dirty: u64,
    filename: Option<String>,
    syntax: Option<&'static SyntaxDef>,
    search: Vec<u8>,
    search_cursor: Option<Position>,
    max_rows: usize,
    max_row_bytes: usize,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// An empty buffer (zero rows).
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limits(MAX_ROWS, MAX_ROW_BYTES)
    }

    /// An empty buffer with custom capacity caps.
    #[must_use]
    pub const fn with_limits(max_rows: usize, max_row_bytes: usize) -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
            filename: None,
            syntax: None,
            search: Vec::new(),
            search_cursor: None,
            max_rows,
            max_row_bytes,
        }
    }

    /// Build a buffer from a file image: one row per `\n`-terminated line,
    /// a trailing `\r` stripped from each. The dirty counter starts at zero.
    ///
    /// # Errors
    ///
    /// Returns an [`EditError`] when the image exceeds a capacity cap.
    pub fn from_bytes(data: &[u8]) -> Result<Self, EditError> {
        let mut buf = Self::new();
        if !data.is_empty() {
            let body = data.strip_suffix(b"\n").unwrap_or(data);
            for line in body.split(|&b| b == b'\n') {
                buf.push_row(line.strip_suffix(b"\r").unwrap_or(line))?;
            }
        }
        buf.dirty = 0;
        debug!(rows = buf.rows.len(), "buffer loaded");
        Ok(buf)
    }

    /// Convenience for tests and scratch buffers: one row per element.
    ///
    /// # Panics
    ///
    /// When the lines exceed [`MAX_ROWS`] or [`MAX_ROW_BYTES`].
    #[must_use]
    pub fn from_lines(lines: &[&str]) -> Self {
        let mut buf = Self::new();
        for line in lines {
            buf.push_row(line.as_bytes())
                .expect("fixture lines fit within the buffer caps");
        }
        buf.dirty = 0;
        buf
    }

    /// Serialize for the persistence layer: every row followed by `\n`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(&row.bytes);
            out.push(b'\n');
        }
        out
    }

    // -- Queries ------------------------------------------------------------

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Byte length of row `at`, 0 when out of range.
    #[inline]
    #[must_use]
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::len)
    }

    /// Bytes of row `at`, empty when out of range.
    #[inline]
    #[must_use]
    pub fn line(&self, at: usize) -> &[u8] {
        self.rows.get(at).map_or(&[][..], |r| r.bytes.as_slice())
    }

    #[inline]
    #[must_use]
    pub fn byte_at(&self, pos: Position) -> Option<u8> {
        self.rows.get(pos.line)?.bytes.get(pos.col).copied()
    }

    /// Mutation counter. Zero means unchanged since load or the last
    /// [`mark_saved`](Self::mark_saved).
    #[inline]
    #[must_use]
    pub const fn dirty(&self) -> u64 {
        self.dirty
    }

    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    /// The persistence layer wrote the buffer out.
    pub fn mark_saved(&mut self) {
        self.dirty = 0;
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Record the file name and pick a matching syntax definition.
    pub fn set_filename(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.set_syntax(syntax::find_syntax(&name));
        self.filename = Some(name);
    }

    /// Pick the syntax definition matching `filename` without recording the
    /// name.
    pub fn select_syntax(&mut self, filename: &str) {
        self.set_syntax(syntax::find_syntax(filename));
    }

    #[inline]
    #[must_use]
    pub const fn syntax(&self) -> Option<&'static SyntaxDef> {
        self.syntax
    }

    /// Switch language and re-highlight everything.
    pub fn set_syntax(&mut self, def: Option<&'static SyntaxDef>) {
        self.syntax = def;
        self.rehighlight_all();
    }

    // -- Row structure ------------------------------------------------------

    /// Insert a new row before `at` (`at == len()` appends). `at > len()` is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// [`EditError::RowLimit`] when the buffer is full,
    /// [`EditError::RowTooLong`] when `bytes` exceeds the row cap.
    pub fn insert_row(&mut self, at: usize, bytes: &[u8]) -> Result<(), EditError> {
        if at > self.rows.len() {
            return Ok(());
        }
        if self.rows.len() >= self.max_rows {
            warn!(max = self.max_rows, "row insert rejected");
            return Err(EditError::RowLimit { max: self.max_rows });
        }
        if bytes.len() > self.max_row_bytes {
            warn!(len = bytes.len(), "row insert rejected");
            return Err(EditError::RowTooLong {
                row: at,
                max: self.max_row_bytes,
            });
        }
        self.grow();
        // Seed with the predecessor's flag so propagation compares against
        // what the following row was highlighted with.
        let inherited = at > 0 && self.rows[at - 1].open_comment;
        self.rows.insert(
            at,
            Row {
                index: at,
                bytes: bytes.to_vec(),
                hl: Vec::new(),
                open_comment: inherited,
            },
        );
        self.reindex(at);
        self.touch(at);
        debug!(at, len = bytes.len(), "insert row");
        Ok(())
    }

    /// Append a row at the end (the file loader's entry point).
    ///
    /// # Errors
    ///
    /// Same as [`insert_row`](Self::insert_row).
    pub fn push_row(&mut self, bytes: &[u8]) -> Result<(), EditError> {
        self.insert_row(self.rows.len(), bytes)
    }

    /// Remove row `at` and return its bytes.
    pub fn delete_row(&mut self, at: usize) -> Option<Vec<u8>> {
        if at >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(at);
        self.reindex(at);
        if at < self.rows.len() {
            self.touch(at);
        } else {
            self.dirty += 1;
        }
        debug!(at, "delete row");
        Some(row.bytes)
    }

    /// Replace the content of row `at`.
    ///
    /// # Errors
    ///
    /// [`EditError::RowTooLong`] when `bytes` exceeds the row cap.
    pub fn set_row(&mut self, at: usize, bytes: Vec<u8>) -> Result<(), EditError> {
        if at >= self.rows.len() {
            return Ok(());
        }
        if bytes.len() > self.max_row_bytes {
            return Err(self.too_long(at));
        }
        self.rows[at].bytes = bytes;
        self.touch(at);
        Ok(())
    }

    // -- Byte edits ---------------------------------------------------------

    /// Insert `byte` at `col` in row `row` (clamped to the row end).
    ///
    /// # Errors
    ///
    /// [`EditError::RowTooLong`] when the row is full.
    pub fn insert_byte(&mut self, row: usize, col: usize, byte: u8) -> Result<(), EditError> {
        self.insert_bytes(row, col, &[byte])
    }

    /// Insert `bytes` at `col` in row `row` (clamped to the row end).
    ///
    /// # Errors
    ///
    /// [`EditError::RowTooLong`] when the row would exceed the cap.
    pub fn insert_bytes(&mut self, row: usize, col: usize, bytes: &[u8]) -> Result<(), EditError> {
        let Some(r) = self.rows.get(row) else {
            return Ok(());
        };
        if r.len() + bytes.len() > self.max_row_bytes {
            return Err(self.too_long(row));
        }
        let r = &mut self.rows[row];
        let col = col.min(r.bytes.len());
        r.bytes.splice(col..col, bytes.iter().copied());
        self.touch(row);
        Ok(())
    }

    /// Remove the byte at `col` in row `row`.
    pub fn delete_byte(&mut self, row: usize, col: usize) -> Option<u8> {
        let r = self.rows.get_mut(row)?;
        if col >= r.bytes.len() {
            return None;
        }
        let b = r.bytes.remove(col);
        self.touch(row);
        Some(b)
    }

    /// Append `bytes` to the end of row `row`.
    ///
    /// # Errors
    ///
    /// [`EditError::RowTooLong`] when the row would exceed the cap.
    pub fn append_bytes(&mut self, row: usize, bytes: &[u8]) -> Result<(), EditError> {
        let end = self.row_len(row);
        self.insert_bytes(row, end, bytes)
    }

    /// Split row `row` at `col`: the tail becomes a new row below. On an
    /// empty buffer this creates the first row.
    ///
    /// # Errors
    ///
    /// [`EditError::RowLimit`] when the buffer is full.
    pub fn split_row(&mut self, row: usize, col: usize) -> Result<(), EditError> {
        if row == self.rows.len() {
            return self.insert_row(row, b"");
        }
        let Some(r) = self.rows.get(row) else {
            return Ok(());
        };
        let col = col.min(r.len());
        let tail = r.bytes[col..].to_vec();
        self.insert_row(row + 1, &tail)?;
        self.rows[row].bytes.truncate(col);
        self.touch(row);
        Ok(())
    }

    /// Merge row `row + 1` into row `row`. Returns the join column (the old
    /// length of `row`), or `None` when there is no following row.
    ///
    /// # Errors
    ///
    /// [`EditError::RowTooLong`] when the merged row would exceed the cap.
    pub fn join_rows(&mut self, row: usize) -> Result<Option<usize>, EditError> {
        if row + 1 >= self.rows.len() {
            return Ok(None);
        }
        let col = self.rows[row].len();
        let next = self.rows[row + 1].bytes.clone();
        self.append_bytes(row, &next)?;
        self.delete_row(row + 1);
        Ok(Some(col))
    }

    /// Delete the **inclusive** span `a..=b` (endpoints in either order).
    ///
    /// Same row: the byte span is excised. Multiple rows: the first row's
    /// prefix before `start.col` is joined with the last row's suffix after
    /// `end.col`, and the rows in between (and the last row) are removed.
    /// Endpoints are clamped, so re-applying to an already-excised span only
    /// removes what is still there. Returns the normalized start, where the
    /// cursor belongs afterwards, or `None` when the span lies past the end.
    ///
    /// # Errors
    ///
    /// [`EditError::RowTooLong`] when joining the two ends would exceed the
    /// row cap; the buffer is left untouched.
    pub fn delete_range(
        &mut self,
        a: Position,
        b: Position,
    ) -> Result<Option<Position>, EditError> {
        if self.rows.is_empty() {
            return Ok(None);
        }
        let (mut start, mut end) = if a <= b { (a, b) } else { (b, a) };
        if start.line >= self.rows.len() {
            return Ok(None);
        }
        if end.line >= self.rows.len() {
            end.line = self.rows.len() - 1;
            end.col = usize::MAX;
        }
        start.col = start.col.min(self.rows[start.line].len());

        if start.line == end.line {
            let r = &mut self.rows[start.line];
            if r.bytes.is_empty() || start.col >= r.bytes.len() {
                return Ok(Some(start));
            }
            let last = end.col.min(r.bytes.len() - 1);
            if start.col <= last {
                r.bytes.drain(start.col..=last);
                self.touch(start.line);
            }
        } else {
            let last = &self.rows[end.line].bytes;
            let suffix = last.get(end.col.saturating_add(1)..).unwrap_or(&[]).to_vec();
            if start.col + suffix.len() > self.max_row_bytes {
                warn!(row = start.line, "delete would join past the row cap");
                return Err(self.too_long(start.line));
            }
            let first = &mut self.rows[start.line].bytes;
            first.truncate(start.col);
            first.extend_from_slice(&suffix);
            self.rows.drain(start.line + 1..=end.line);
            self.reindex(start.line + 1);
            self.touch(start.line);
        }
        debug!(%start, %end, "delete range");
        Ok(Some(start))
    }

    // -- Search overlay -----------------------------------------------------

    /// Install `pattern` as the search overlay (empty clears it) and re-mark
    /// every row. The match containing `cursor` is marked active.
    pub fn set_search_overlay(&mut self, pattern: &[u8], cursor: Option<Position>) {
        self.search.clear();
        self.search.extend_from_slice(pattern);
        self.search_cursor = cursor;
        self.rehighlight_all();
    }

    /// Move the active match to the one containing `cursor`. Only the rows
    /// it leaves and enters are re-marked.
    pub fn set_search_cursor(&mut self, cursor: Position) {
        if self.search.is_empty() || self.search_cursor == Some(cursor) {
            return;
        }
        let old = self.search_cursor.replace(cursor);
        if let Some(old) = old.filter(|o| o.line != cursor.line) {
            self.rehighlight_row(old.line);
        }
        self.rehighlight_row(cursor.line);
    }

    /// The active overlay pattern (empty when none).
    #[must_use]
    pub fn search_overlay(&self) -> &[u8] {
        &self.search
    }

    // -- Snapshots ----------------------------------------------------------

    /// Deep copy of the rows, for undo.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Row> {
        self.rows.clone()
    }

    /// Replace every row with a snapshot. Counts as a mutation.
    pub fn restore(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.reindex(0);
        self.dirty += 1;
        // The snapshot carries the overlay of its own time.
        self.rehighlight_all();
    }

    // -- Internals ----------------------------------------------------------

    /// Reserve row capacity: 128 first, then doubling, never past the cap.
    fn grow(&mut self) {
        let cap = self.rows.capacity();
        if self.rows.len() < cap {
            return;
        }
        let target = if cap == 0 { INITIAL_ROWS } else { cap * 2 };
        let target = target.min(self.max_rows).max(self.rows.len() + 1);
        self.rows.reserve_exact(target - self.rows.len());
    }

    fn reindex(&mut self, from: usize) {
        for (i, row) in self.rows.iter_mut().enumerate().skip(from) {
            row.index = i;
        }
    }

    const fn too_long(&self, row: usize) -> EditError {
        EditError::RowTooLong {
            row,
            max: self.max_row_bytes,
        }
    }

    /// Count a mutation of row `at` and re-highlight from there.
    fn touch(&mut self, at: usize) {
        self.dirty += 1;
        self.rehighlight_from(at);
    }

    /// Recompute row `at`, then keep going while the open-comment flag
    /// changes. Bounded by the row count.
    fn rehighlight_from(&mut self, at: usize) {
        let mut i = at;
        while i < self.rows.len() {
            let open_in = i > 0 && self.rows[i - 1].open_comment;
            let changed = self.highlight_row(i, open_in);
            if !changed {
                break;
            }
            trace!(row = i, "comment state changed, propagating");
            i += 1;
        }
    }

    fn rehighlight_row(&mut self, i: usize) {
        if i < self.rows.len() {
            let open_in = i > 0 && self.rows[i - 1].open_comment;
            self.highlight_row(i, open_in);
        }
    }

    fn rehighlight_all(&mut self) {
        let mut open_in = false;
        for i in 0..self.rows.len() {
            self.highlight_row(i, open_in);
            open_in = self.rows[i].open_comment;
        }
    }

    /// Classify one row and apply the search overlay. Returns whether its
    /// open-comment flag changed.
    fn highlight_row(&mut self, i: usize, open_in: bool) -> bool {
        let syntax = self.syntax;
        let row = &mut self.rows[i];
        let was_open = row.open_comment;
        row.open_comment = syntax::highlight_line(syntax, &row.bytes, open_in, &mut row.hl);
        if !self.search.is_empty() {
            let active = self
                .search_cursor
                .filter(|c| c.line == i)
                .map(|c| c.col);
            syntax::overlay_matches(&row.bytes, &mut row.hl, &self.search, active);
        }
        row.open_comment != was_open
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// UTF-8 stepping
// ---------------------------------------------------------------------------

#[inline]
const fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Offset of the next UTF-8 boundary after `col` (at most `bytes.len()`).
#[must_use]
pub fn next_boundary(bytes: &[u8], col: usize) -> usize {
    if col >= bytes.len() {
        return bytes.len();
    }
    let mut i = col + 1;
    while i < bytes.len() && is_continuation(bytes[i]) {
        i += 1;
    }
    i
}

/// Offset of the previous UTF-8 boundary before `col` (at least 0).
#[must_use]
pub fn prev_boundary(bytes: &[u8], col: usize) -> usize {
    if col == 0 {
        return 0;
    }
    let mut i = col.min(bytes.len()) - 1;
    while i > 0 && is_continuation(bytes[i]) {
        i -= 1;
    }
    i
}

/// Snap `col` back onto a boundary if it points into a multi-byte sequence.
#[must_use]
pub fn snap_boundary(bytes: &[u8], col: usize) -> usize {
    let mut i = col.min(bytes.len());
    while i > 0 && i < bytes.len() && is_continuation(bytes[i]) {
        i -= 1;
    }
    i
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
