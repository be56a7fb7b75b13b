//! Insert mode and bracketed paste.

use tracing::debug;

use v_editor::buffer::{next_boundary, prev_boundary};
use v_editor::mode::Mode;
use v_editor::position::{Position, Range};
use v_input::{KeyCode, KeyEvent, Modifiers};

use crate::editor::{Action, Editor, motion_code};

/// `\r\n` and lone `\r` become `\n`.
fn normalize_newlines(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().peekable();
    while let Some(&b) = iter.next() {
        if b == b'\r' {
            if iter.peek() == Some(&&b'\n') {
                continue;
            }
            out.push(b'\n');
        } else {
            out.push(b);
        }
    }
    out
}

impl Editor {
    pub(crate) fn handle_insert(&mut self, key: &KeyEvent) -> Action {
        if key.is_ctrl() {
            return Action::Continue;
        }
        let code = motion_code(key);
        if code != key.code {
            let mut cursor = self.cursor.clone();
            if self.run_motion(&mut cursor, code, None, true) {
                self.cursor = cursor;
            }
            return Action::Continue;
        }
        let buf = &self.buffer;
        match key.code {
            KeyCode::Escape => self.leave_insert(),
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Tab => {
                if self.options.expand_tab {
                    let spaces = vec![b' '; self.options.tab_stop];
                    self.insert_at_cursor(&spaces);
                } else {
                    self.insert_at_cursor(b"\t");
                }
            }
            KeyCode::Backspace => self.insert_backspace(),
            KeyCode::Delete => self.insert_delete(),

            KeyCode::Left => self.cursor.arrow_left(buf, true),
            KeyCode::Right => self.cursor.arrow_right(buf, true),
            KeyCode::Up => self.cursor.move_up(1, buf, true),
            KeyCode::Down => self.cursor.move_down(1, buf, true),
            KeyCode::Home => self.cursor.move_to_line_start(),
            KeyCode::End => self.cursor.move_to_line_end(buf, true),
            KeyCode::PageUp => self.cursor.move_up(self.text_height, buf, true),
            KeyCode::PageDown => self.cursor.move_down(self.text_height, buf, true),

            KeyCode::Char(c) => {
                let mut enc = [0u8; 4];
                self.insert_at_cursor(c.encode_utf8(&mut enc).as_bytes());
            }
        }
        Action::Continue
    }

    fn insert_at_cursor(&mut self, bytes: &[u8]) {
        self.ensure_row();
        let pos = self.cursor.position();
        match self.buffer.insert_bytes(pos.line, pos.col, bytes) {
            Ok(()) => {
                let after = pos.with_col(pos.col + bytes.len());
                self.cursor.set_position(after, &self.buffer, true);
            }
            Err(e) => self.report(e),
        }
    }

    fn insert_newline(&mut self) {
        self.ensure_row();
        let pos = self.cursor.position();
        if self.split_row(pos.line, pos.col) {
            self.cursor
                .set_position(Position::new(pos.line + 1, 0), &self.buffer, true);
        }
    }

    /// Delete the character before the cursor; at column 0 join onto the
    /// previous row.
    fn insert_backspace(&mut self) {
        let pos = self.cursor.position();
        if pos.col > 0 {
            let prev = prev_boundary(self.buffer.line(pos.line), pos.col);
            let at = self.delete_span(Range::new(pos.with_col(prev), pos.with_col(pos.col - 1)));
            self.cursor.set_position(at, &self.buffer, true);
        } else if pos.line > 0 {
            if let Some(col) = self.join_rows(pos.line - 1) {
                self.cursor
                    .set_position(Position::new(pos.line - 1, col), &self.buffer, true);
            }
        }
    }

    /// Delete the character under the cursor; at the row end pull the next
    /// row up.
    fn insert_delete(&mut self) {
        let pos = self.cursor.position();
        let bytes = self.buffer.line(pos.line);
        if pos.col < bytes.len() {
            let end = next_boundary(bytes, pos.col) - 1;
            self.delete_span(Range::new(pos, pos.with_col(end)));
        } else {
            self.join_rows(pos.line);
        }
    }

    // ── Paste events ────────────────────────────────────────────────────

    /// Bracketed paste: the payload goes in as text, never as commands.
    /// In normal mode it lands at the cursor as one undo step; in insert
    /// mode it joins the current insert session.
    pub(crate) fn handle_paste(&mut self, bytes: &[u8]) {
        let text = normalize_newlines(bytes);
        if text.is_empty() {
            return;
        }
        debug!(len = text.len(), mode = %self.mode, "paste event");

        if self.prompt.is_some() {
            let pasted = String::from_utf8_lossy(&text).into_owned();
            for c in pasted.chars().filter(|&c| c != '\n') {
                self.handle_prompt(&KeyEvent::new(KeyCode::Char(c), Modifiers::empty()));
            }
            return;
        }

        match self.mode {
            Mode::Visual(kind) => {
                if let Some(span) = self.take_selection(kind) {
                    self.replace_span(span, &text, false);
                }
            }
            Mode::Normal | Mode::Insert => {
                self.cancel_pending();
                let inserting = self.mode == Mode::Insert;
                if !inserting {
                    self.save_undo();
                }
                let at = self.cursor.position();
                if let Some(end) = self.insert_text(at, &text) {
                    if inserting {
                        self.cursor.set_position(end, &self.buffer, true);
                    } else {
                        let last = prev_boundary(self.buffer.line(end.line), end.col);
                        self.cursor.set_position(end.with_col(last), &self.buffer, false);
                    }
                }
                if !inserting {
                    self.history.discard_unchanged(&self.buffer);
                }
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
