//! Named marks `a`–`z`.
//!
//! A mark is a remembered position. Marks follow their text through
//! structural edits: rows inserted above a mark push it down, rows deleted
//! above pull it up, and a mark inside deleted rows is cleared.

use crate::position::Position;

/// The 26 lowercase marks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marks {
    slots: [Option<Position>; 26],
}

impl Marks {
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: [None; 26] }
    }

    const fn index(name: u8) -> Option<usize> {
        if name.is_ascii_lowercase() {
            Some((name - b'a') as usize)
        } else {
            None
        }
    }

    /// Set mark `name`. Returns `false` for a byte that is not `a`–`z`.
    pub fn set(&mut self, name: u8, pos: Position) -> bool {
        let Some(i) = Self::index(name) else {
            return false;
        };
        self.slots[i] = Some(pos);
        true
    }

    #[must_use]
    pub fn get(&self, name: u8) -> Option<Position> {
        self.slots[Self::index(name)?]
    }

    /// `count` rows were inserted before row `at`.
    pub fn rows_inserted(&mut self, at: usize, count: usize) {
        for pos in self.slots.iter_mut().flatten() {
            if pos.line >= at {
                pos.line += count;
            }
        }
    }

    /// Rows `at..at + count` were removed.
    pub fn rows_deleted(&mut self, at: usize, count: usize) {
        let end = at + count;
        for slot in &mut self.slots {
            match *slot {
                Some(ref mut pos) if pos.line >= end => pos.line -= count,
                Some(pos) if pos.line >= at => *slot = None,
                _ => {}
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots = [None; 26];
    }
}
