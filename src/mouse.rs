//! Mouse: click to place the cursor, drag to select, double click selects a
//! word, the wheel scrolls.
//!
//! Cells are mapped back to byte columns with the same widths the renderer
//! uses: tabs advance to the next tab stop, other characters take their
//! Unicode display width.

use std::time::{Duration, Instant};

use tracing::trace;
use unicode_width::UnicodeWidthChar;

use v_editor::buffer::next_boundary;
use v_editor::cursor;
use v_editor::mode::{Mode, VisualKind};
use v_editor::position::Position;
use v_editor::text_object;
use v_input::{MouseButton, MouseEvent, MouseEventKind};

use crate::editor::Editor;

/// Two presses on the same cell within this window make a double click.
const DOUBLE_CLICK: Duration = Duration::from_millis(500);

/// Rows moved per wheel notch.
const WHEEL_ROWS: usize = 3;

impl Editor {
    pub(crate) fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        if self.prompt.is_some() {
            return;
        }
        trace!(?mouse, "mouse");
        match mouse.kind() {
            MouseEventKind::Press(MouseButton::Left) => self.mouse_press(mouse.x, mouse.y, now),
            MouseEventKind::Drag(MouseButton::Left) => self.mouse_drag(mouse.x, mouse.y),
            MouseEventKind::Release(_) => self.drag_origin = None,
            MouseEventKind::ScrollUp => self.scroll_rows(false),
            MouseEventKind::ScrollDown => self.scroll_rows(true),
            _ => {}
        }
    }

    /// Buffer position under screen cell (`x`, `y`) of the text area.
    pub(crate) fn cell_position(&self, x: u16, y: u16) -> Position {
        let line = self
            .top_line
            .saturating_add(usize::from(y))
            .min(self.buffer.len().saturating_sub(1));
        let bytes = self.buffer.line(line);
        let target = usize::from(x);
        let tab = self.options.tab_stop.max(1);

        let mut cell = 0;
        let mut col = 0;
        while col < bytes.len() {
            let next = next_boundary(bytes, col);
            let width = if bytes[col] == b'\t' {
                tab - cell % tab
            } else {
                std::str::from_utf8(&bytes[col..next])
                    .ok()
                    .and_then(|s| s.chars().next())
                    .and_then(UnicodeWidthChar::width)
                    .unwrap_or(1)
            };
            if target < cell + width {
                return Position::new(line, col);
            }
            cell += width;
            col = next;
        }
        Position::new(line, col)
    }

    fn mouse_press(&mut self, x: u16, y: u16, now: Instant) {
        self.cancel_pending();
        if self.buffer.is_empty() {
            return;
        }
        let double = self.last_click.is_some_and(|(at, cx, cy)| {
            cx == x && cy == y && now.saturating_duration_since(at) <= DOUBLE_CLICK
        });
        let pos = self.cell_position(x, y);
        if self.mode.is_visual() {
            self.leave_visual();
        }

        if double {
            self.last_click = None;
            self.drag_origin = None;
            if let Some(word) = text_object::inner_word(&self.buffer, pos) {
                if self.mode == Mode::Insert {
                    self.leave_insert();
                }
                self.cursor.set_anchor_at(word.start);
                self.cursor.set_position(word.end, &self.buffer, false);
                self.mode = Mode::Visual(VisualKind::Char);
                return;
            }
        } else {
            self.last_click = Some((now, x, y));
        }

        self.cursor
            .set_position(pos, &self.buffer, self.mode.cursor_past_end());
        self.drag_origin = Some(self.cursor.position());
    }

    /// Dragging with the left button held selects from the press cell.
    fn mouse_drag(&mut self, x: u16, y: u16) {
        let Some(origin) = self.drag_origin else {
            return;
        };
        let pos = self.cell_position(x, y);
        if !self.mode.is_visual() {
            if self.mode == Mode::Insert {
                self.leave_insert();
            }
            self.cursor
                .set_anchor_at(cursor::clamp(origin, &self.buffer, false));
            self.mode = Mode::Visual(VisualKind::Char);
        }
        self.cursor.set_position(pos, &self.buffer, false);
    }

    fn scroll_rows(&mut self, down: bool) {
        let past_end = self.mode.cursor_past_end();
        if down {
            let last = self.buffer.len().saturating_sub(1);
            self.top_line = (self.top_line + WHEEL_ROWS).min(last);
            self.cursor.move_down(WHEEL_ROWS, &self.buffer, past_end);
        } else {
            self.top_line = self.top_line.saturating_sub(WHEEL_ROWS);
            self.cursor.move_up(WHEEL_ROWS, &self.buffer, past_end);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use pretty_assertions::assert_eq;
    use v_editor::mode::{Mode, VisualKind};
    use v_editor::position::Position;
    use v_input::{Event, MouseEvent};

    use crate::Editor;
    use crate::editor::testing::*;

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    fn click(ed: &mut Editor, x: u16, y: u16, at: Instant) {
        ed.handle_event_at(&Event::Mouse(MouseEvent::left_press(x, y)), at);
    }

    fn drag(ed: &mut Editor, x: u16, y: u16, at: Instant) {
        ed.handle_event_at(&Event::Mouse(MouseEvent::from_mask(32, x, y, false)), at);
    }

    fn release(ed: &mut Editor, x: u16, y: u16, at: Instant) {
        ed.handle_event_at(&Event::Mouse(MouseEvent::from_mask(0, x, y, true)), at);
    }

    fn wheel(ed: &mut Editor, down: bool, at: Instant) {
        let mask = if down { 65 } else { 64 };
        ed.handle_event_at(&Event::Mouse(MouseEvent::from_mask(mask, 0, 0, false)), at);
    }

    #[test]
    fn click_places_cursor() {
        let mut ed = editor_with(&["hello", "world wide"]);
        let t = Instant::now();
        click(&mut ed, 3, 1, t);
        assert_eq!(ed.cursor(), p(1, 3));
        click(&mut ed, 40, 0, t + Duration::from_secs(1));
        assert_eq!(ed.cursor(), p(0, 4));
        click(&mut ed, 0, 9, t + Duration::from_secs(2));
        assert_eq!(ed.cursor(), p(1, 0));
    }

    #[test]
    fn click_respects_tabs_and_wide_chars() {
        let mut ed = editor_with(&["\tx", "日本y"]);
        let t = Instant::now();
        click(&mut ed, 2, 0, t);
        assert_eq!(ed.cursor(), p(0, 0));
        click(&mut ed, 4, 0, t + Duration::from_secs(1));
        assert_eq!(ed.cursor(), p(0, 1));
        click(&mut ed, 3, 1, t + Duration::from_secs(2));
        assert_eq!(ed.cursor(), p(1, 3));
        click(&mut ed, 4, 1, t + Duration::from_secs(3));
        assert_eq!(ed.cursor(), p(1, 6));
    }

    #[test]
    fn click_uses_viewport_offset() {
        let lines_owned: Vec<String> = (0..30).map(|i| format!("row {i}")).collect();
        let rows: Vec<&str> = lines_owned.iter().map(String::as_str).collect();
        let mut ed = editor_with(&rows);
        ed.set_viewport(10, 10);
        click(&mut ed, 0, 2, Instant::now());
        assert_eq!(ed.cursor(), p(12, 0));
    }

    #[test]
    fn drag_selects_from_press() {
        let mut ed = editor_with(&["abcdef", "ghijkl"]);
        let t = Instant::now();
        click(&mut ed, 1, 0, t);
        drag(&mut ed, 3, 1, t);
        assert_eq!(ed.mode(), Mode::Visual(VisualKind::Char));
        let r = ed.selection().map(|s| s.range(ed.buffer()));
        assert_eq!(r.map(|r| (r.start, r.end)), Some((p(0, 1), p(1, 3))));
        release(&mut ed, 3, 1, t);
        drag(&mut ed, 5, 1, t);
        assert_eq!(ed.cursor(), p(1, 3));
        keys(&mut ed, "d");
        assert_eq!(lines(&ed), vec!["akl"]);
    }

    #[test]
    fn drag_from_insert_mode_leaves_insert() {
        let mut ed = editor_with(&["abcdef"]);
        keys(&mut ed, "i");
        let t = Instant::now();
        click(&mut ed, 1, 0, t);
        drag(&mut ed, 2, 0, t);
        assert_eq!(ed.mode(), Mode::Visual(VisualKind::Char));
        keys(&mut ed, "y");
        assert_eq!(ed.registers().unnamed().content(), b"bc");
    }

    #[test]
    fn double_click_selects_word() {
        let mut ed = editor_with(&["one two three"]);
        let t = Instant::now();
        click(&mut ed, 5, 0, t);
        assert_eq!(ed.mode(), Mode::Normal);
        click(&mut ed, 5, 0, t + Duration::from_millis(200));
        assert_eq!(ed.mode(), Mode::Visual(VisualKind::Char));
        let r = ed.selection().map(|s| s.range(ed.buffer()));
        assert_eq!(r.map(|r| (r.start, r.end)), Some((p(0, 4), p(0, 6))));
        // A third press starts over as a plain click.
        click(&mut ed, 5, 0, t + Duration::from_millis(300));
        assert_eq!(ed.mode(), Mode::Normal);
    }

    #[test]
    fn slow_or_moved_second_click_is_single() {
        let mut ed = editor_with(&["one two"]);
        let t = Instant::now();
        click(&mut ed, 5, 0, t);
        click(&mut ed, 5, 0, t + Duration::from_millis(900));
        assert_eq!(ed.mode(), Mode::Normal);
        click(&mut ed, 6, 0, t + Duration::from_millis(1000));
        assert_eq!(ed.mode(), Mode::Normal);
    }

    #[test]
    fn wheel_scrolls_viewport_and_cursor() {
        let lines_owned: Vec<String> = (0..40).map(|i| i.to_string()).collect();
        let rows: Vec<&str> = lines_owned.iter().map(String::as_str).collect();
        let mut ed = editor_with(&rows);
        ed.set_viewport(0, 10);
        let t = Instant::now();
        wheel(&mut ed, true, t);
        wheel(&mut ed, true, t);
        assert_eq!(ed.top_line(), 6);
        assert_eq!(ed.cursor(), p(6, 0));
        wheel(&mut ed, false, t);
        assert_eq!(ed.top_line(), 3);
        assert_eq!(ed.cursor(), p(3, 0));
    }

    #[test]
    fn mouse_ignored_while_prompt_open() {
        let mut ed = editor_with(&["abc", "def"]);
        keys(&mut ed, ":");
        click(&mut ed, 1, 1, Instant::now());
        assert_eq!(ed.cursor(), p(0, 0));
        assert_eq!(ed.status_line(), ":");
    }
}
