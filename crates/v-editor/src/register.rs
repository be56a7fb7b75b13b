//! Registers: storage for yanked and deleted text.
//!
//! Every yank and delete lands in the unnamed register (`"`). A register
//! also remembers whether its text was captured line-wise, because paste
//! behaves differently:
//!
//! - **Char-wise**: `p` inserts after the cursor, `P` before it.
//! - **Line-wise**: `p` inserts whole rows below the cursor row, `P` above.
//!
//! There are 256 slots, one per byte value. `"a`–`"z` overwrite, `"A`–`"Z`
//! append to the matching lowercase slot.

/// Slot every yank and delete writes to.
pub const UNNAMED: u8 = b'"';

/// How the content was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterKind {
    #[default]
    Char,
    Line,
}

/// One register slot.
///
/// Line-wise content stores every row followed by `\n`. Char-wise content is
/// the exact bytes, with `\n` between rows when the capture spanned several.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
    content: Vec<u8>,
    kind: RegisterKind,
}

impl Register {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            content: Vec::new(),
            kind: RegisterKind::Char,
        }
    }

    /// Replace the content.
    pub fn yank(&mut self, bytes: Vec<u8>, kind: RegisterKind) {
        self.content = bytes;
        self.kind = kind;
    }

    /// Append to the content. Mixing in line-wise text makes the whole
    /// register line-wise.
    pub fn append(&mut self, bytes: &[u8], kind: RegisterKind) {
        if kind == RegisterKind::Line || self.kind == RegisterKind::Line {
            if !self.content.is_empty() && !self.content.ends_with(b"\n") {
                self.content.push(b'\n');
            }
            self.content.extend_from_slice(bytes);
            if !self.content.ends_with(b"\n") {
                self.content.push(b'\n');
            }
            self.kind = RegisterKind::Line;
        } else {
            self.content.extend_from_slice(bytes);
        }
    }

    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    #[must_use]
    pub const fn kind(&self) -> RegisterKind {
        self.kind
    }

    #[must_use]
    pub const fn is_linewise(&self) -> bool {
        matches!(self.kind, RegisterKind::Line)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The rows of line-wise content (without their terminators).
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        let body = self.content.strip_suffix(b"\n").unwrap_or(&self.content);
        let empty = self.content.is_empty();
        body.split(|&b| b == b'\n').filter(move |_| !empty)
    }
}

// ---------------------------------------------------------------------------
// Register file
// ---------------------------------------------------------------------------

/// All 256 slots.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    slots: Box<[Register; 256]>,
}

impl RegisterFile {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Box::new(std::array::from_fn(|_| Register::new())),
        }
    }

    /// Store text.
    ///
    /// - `None` or `Some(b'"')` → unnamed only
    /// - `Some(b'A'..=b'Z')` → append to the lowercase slot, copy the result
    ///   to unnamed
    /// - any other byte → overwrite that slot, copy to unnamed
    pub fn yank(&mut self, name: Option<u8>, bytes: Vec<u8>, kind: RegisterKind) {
        match name {
            None | Some(UNNAMED) => self.slots[usize::from(UNNAMED)].yank(bytes, kind),
            Some(upper @ b'A'..=b'Z') => {
                let idx = usize::from(upper.to_ascii_lowercase());
                self.slots[idx].append(&bytes, kind);
                let full = self.slots[idx].clone();
                self.slots[usize::from(UNNAMED)] = full;
            }
            Some(name) => {
                self.slots[usize::from(name)].yank(bytes.clone(), kind);
                self.slots[usize::from(UNNAMED)].yank(bytes, kind);
            }
        }
    }

    /// The slot to paste from. Uppercase names read their lowercase slot.
    #[must_use]
    pub fn get(&self, name: Option<u8>) -> &Register {
        let idx = name.map_or(UNNAMED, |b| b.to_ascii_lowercase());
        &self.slots[usize::from(idx)]
    }

    #[must_use]
    pub fn unnamed(&self) -> &Register {
        &self.slots[usize::from(UNNAMED)]
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
