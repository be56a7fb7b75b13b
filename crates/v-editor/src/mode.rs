//! Editing modes.
//!
//! | Mode        | Cursor limit          | Purpose                        |
//! |-------------|-----------------------|--------------------------------|
//! | Normal      | `0..=len-1`           | Navigation, operators          |
//! | Insert      | `0..=len`             | Typing text                    |
//! | Visual      | `0..=len-1`           | Character-wise selection       |
//! | Visual Line | `0..=len-1`           | Whole-row selection            |
//!
//! The `:` and `/` prompts are not modes; they sit on top of Normal mode
//! while they collect input.

use std::fmt;

/// The shape of a visual selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    /// `v`: exact anchor/cursor bounds, byte by byte.
    Char,
    /// `V`: every row between anchor and cursor, columns ignored.
    Line,
}

/// The current editing mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual(VisualKind),
}

impl Mode {
    /// Name for the status line.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Visual(VisualKind::Char) => "VISUAL",
            Self::Visual(VisualKind::Line) => "VISUAL LINE",
        }
    }

    /// Renderer hint: block outside insert, bar inside.
    #[must_use]
    pub const fn cursor_shape(self) -> CursorShape {
        match self {
            Self::Insert => CursorShape::Bar,
            Self::Normal | Self::Visual(_) => CursorShape::Block,
        }
    }

    /// True if the cursor may sit one past the last byte of a row.
    #[inline]
    #[must_use]
    pub const fn cursor_past_end(self) -> bool {
        matches!(self, Self::Insert)
    }

    #[inline]
    #[must_use]
    pub const fn is_visual(self) -> bool {
        matches!(self, Self::Visual(_))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Cursor shape for the render collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorShape {
    Block,
    Bar,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(Mode::Normal.to_string(), "NORMAL");
        assert_eq!(Mode::Insert.to_string(), "INSERT");
        assert_eq!(Mode::Visual(VisualKind::Char).to_string(), "VISUAL");
        assert_eq!(Mode::Visual(VisualKind::Line).to_string(), "VISUAL LINE");
    }

    #[test]
    fn only_insert_goes_past_end() {
        assert!(Mode::Insert.cursor_past_end());
        assert!(!Mode::Normal.cursor_past_end());
        assert!(!Mode::Visual(VisualKind::Line).cursor_past_end());
    }

    #[test]
    fn shapes() {
        assert_eq!(Mode::Insert.cursor_shape(), CursorShape::Bar);
        assert_eq!(Mode::Visual(VisualKind::Char).cursor_shape(), CursorShape::Block);
    }

    #[test]
    fn default_is_normal() {
        assert_eq!(Mode::default(), Mode::Normal);
        assert!(!Mode::default().is_visual());
    }
}
