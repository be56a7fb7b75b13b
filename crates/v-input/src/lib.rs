// SPDX-License-Identifier: MIT
//
// Logical input events.
//
// The terminal layer decodes raw bytes (CSI sequences, SGR mouse reports,
// bracketed paste) and hands the editor these values. Nothing in here
// knows about escape bytes; the one piece of wire knowledge kept is the
// xterm button mask, because mouse records arrive as {x, y, mask, release}
// and [`MouseEvent::from_mask`] turns them into something matchable.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// One input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste content, raw bytes. Line breaks may be `\r\n`, `\r`
    /// or `\n`.
    Paste(Vec<u8>),
}

impl Event {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code, Modifiers::empty()))
    }

    /// A printable character.
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// `Ctrl` + `c`.
    #[must_use]
    pub const fn ctrl(c: char) -> Self {
        Self::Key(KeyEvent::new(KeyCode::Char(c), Modifiers::CTRL))
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Whether Ctrl is held (Alt and Shift are ignored).
    #[must_use]
    pub const fn is_ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// The character for an unmodified (or shifted) printable key.
    #[must_use]
    pub const fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.modifiers.intersects(Modifiers::CTRL.union(Modifiers::ALT)) => {
                Some(c)
            }
            _ => None,
        }
    }
}

/// Identity of a key.
///
/// Printable characters use [`Char`](KeyCode::Char); control combinations
/// arrive as `Char` plus [`Modifiers::CTRL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// Keyboard modifier flags, in xterm order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

// ─── Mouse ──────────────────────────────────────────────────────────────────

bitflags! {
    /// What kind of mouse report this was, beyond the button.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct MouseFlags: u8 {
        const RELEASE = 0b001;
        const DRAG    = 0b010;
        const WHEEL   = 0b100;
    }
}

/// A mouse record: 0-indexed cell, xterm button mask, flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: u16,
    pub y: u16,
    /// The raw xterm button mask (button in bits 0–1).
    pub button_mask: u16,
    pub flags: MouseFlags,
    pub modifiers: Modifiers,
}

/// Classified mouse action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    /// Movement with a button held.
    Drag(MouseButton),
    /// Movement with no button held.
    Move,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseEvent {
    /// Decode an xterm/SGR button mask. Bits 2–4 carry Shift/Alt/Ctrl,
    /// bit 5 motion, bit 6 the wheel.
    #[must_use]
    pub fn from_mask(mask: u16, x: u16, y: u16, release: bool) -> Self {
        let mut modifiers = Modifiers::empty();
        if mask & 4 != 0 {
            modifiers |= Modifiers::SHIFT;
        }
        if mask & 8 != 0 {
            modifiers |= Modifiers::ALT;
        }
        if mask & 16 != 0 {
            modifiers |= Modifiers::CTRL;
        }

        let mut flags = MouseFlags::empty();
        if mask & 64 != 0 {
            flags |= MouseFlags::WHEEL;
        } else if mask & 32 != 0 {
            flags |= MouseFlags::DRAG;
        }
        if release {
            flags |= MouseFlags::RELEASE;
        }

        Self {
            x,
            y,
            button_mask: mask,
            flags,
            modifiers,
        }
    }

    /// A left-button press at a cell, for hosts and tests that build
    /// events directly.
    #[must_use]
    pub fn left_press(x: u16, y: u16) -> Self {
        Self::from_mask(0, x, y, false)
    }

    #[must_use]
    pub const fn kind(&self) -> MouseEventKind {
        let base = self.button_mask & 3;
        if self.flags.contains(MouseFlags::WHEEL) {
            match base {
                0 => MouseEventKind::ScrollUp,
                1 => MouseEventKind::ScrollDown,
                2 => MouseEventKind::ScrollLeft,
                _ => MouseEventKind::ScrollRight,
            }
        } else if self.flags.contains(MouseFlags::DRAG) {
            match base {
                0 => MouseEventKind::Drag(MouseButton::Left),
                1 => MouseEventKind::Drag(MouseButton::Middle),
                2 => MouseEventKind::Drag(MouseButton::Right),
                _ => MouseEventKind::Move,
            }
        } else if self.flags.contains(MouseFlags::RELEASE) {
            MouseEventKind::Release(decode_button(base))
        } else {
            MouseEventKind::Press(decode_button(base))
        }
    }
}

/// Base button value (mask bits 0–1) to `MouseButton`.
const fn decode_button(base: u16) -> MouseButton {
    match base {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        _ => MouseButton::Right,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
