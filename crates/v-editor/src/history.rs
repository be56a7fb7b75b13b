//! Undo/redo history built from whole-buffer snapshots.
//!
//! Every mutating command calls [`History::save`] *before* it touches the
//! buffer. A snapshot is a deep copy of the rows (content, highlight arrays,
//! open-comment flags) plus the cursor and the marks, so undoing is a plain
//! swap:
//!
//! ```text
//! history.save(&buf, cursor, &marks);   // before the edit
//! // ... mutate buf ...
//! history.undo(&mut buf, cursor, &mut marks) -> Some(cursor_before)
//! history.redo(&mut buf, cursor, &mut marks) -> Some(cursor_after)
//! ```
//!
//! An insert session is one step: the dispatcher saves once on entering
//! insert mode and drops the snapshot again with
//! [`History::discard_unchanged`] if nothing was typed.
//!
//! Saving clears the redo stack; history never branches.

use tracing::debug;

use crate::buffer::{Buffer, Row};
use crate::marks::Marks;
use crate::position::Position;

/// Default bound on the undo stack depth.
pub const DEFAULT_UNDO_LEVELS: usize = 1000;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Buffer rows, cursor and marks at one moment.
#[derive(Debug, Clone)]
struct Snapshot {
    rows: Vec<Row>,
    cursor: Position,
    marks: Marks,
    /// Dirty counter at capture time; unchanged means nothing was edited.
    dirty: u64,
}

impl Snapshot {
    fn capture(buf: &Buffer, cursor: Position, marks: &Marks) -> Self {
        Self {
            rows: buf.snapshot(),
            cursor,
            marks: marks.clone(),
            dirty: buf.dirty(),
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Two LIFO stacks of snapshots.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    limit: usize,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LEVELS)
    }

    /// History that keeps at most `limit` undo steps (at least one).
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: if limit == 0 { 1 } else { limit },
        }
    }

    /// Change the depth bound, dropping the oldest steps if needed.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.trim();
    }

    #[inline]
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    // -- Recording ----------------------------------------------------------

    /// Capture the state before a mutation. Clears the redo stack.
    ///
    /// The snapshot is fully built before it is pushed, so the stacks never
    /// hold a partial state.
    pub fn save(&mut self, buf: &Buffer, cursor: Position, marks: &Marks) {
        let snap = Snapshot::capture(buf, cursor, marks);
        self.undo_stack.push(snap);
        self.redo_stack.clear();
        self.trim();
        debug!(depth = self.undo_stack.len(), "undo state saved");
    }

    /// Drop the newest snapshot if the buffer has not changed since it was
    /// taken. Returns whether one was dropped.
    pub fn discard_unchanged(&mut self, buf: &Buffer) -> bool {
        if self.undo_stack.last().is_some_and(|s| s.dirty == buf.dirty()) {
            self.undo_stack.pop();
            return true;
        }
        false
    }

    // -- Undo / redo --------------------------------------------------------

    /// Restore the newest undo snapshot. The current state moves onto the
    /// redo stack. `marks` is restored in place. Returns the cursor to
    /// restore, or `None` when there is nothing to undo.
    pub fn undo(
        &mut self,
        buf: &mut Buffer,
        cursor: Position,
        marks: &mut Marks,
    ) -> Option<Position> {
        let snap = self.undo_stack.pop()?;
        self.redo_stack.push(Snapshot::capture(buf, cursor, marks));
        buf.restore(snap.rows);
        *marks = snap.marks;
        debug!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "undo"
        );
        Some(snap.cursor)
    }

    /// Re-apply the newest redo snapshot. The current state moves back onto
    /// the undo stack.
    pub fn redo(
        &mut self,
        buf: &mut Buffer,
        cursor: Position,
        marks: &mut Marks,
    ) -> Option<Position> {
        let snap = self.redo_stack.pop()?;
        self.undo_stack.push(Snapshot::capture(buf, cursor, marks));
        buf.restore(snap.rows);
        *marks = snap.marks;
        debug!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "redo"
        );
        Some(snap.cursor)
    }

    // -- Queries ------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Forget everything (a new file was loaded).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn trim(&mut self) {
        if self.undo_stack.len() > self.limit {
            let excess = self.undo_stack.len() - self.limit;
            self.undo_stack.drain(..excess);
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
