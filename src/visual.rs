//! Visual modes: the anchor stays put, motions move the cursor, and an
//! operator acts on everything in between.

use v_editor::mode::{Mode, VisualKind};
use v_editor::position::Position;
use v_editor::search::SearchDirection;
use v_input::{KeyCode, KeyEvent};

use crate::editor::{Action, Editor, Pending, Span, motion_code, motion_kind};
use crate::normal::find_kind;
use crate::ops::swap_case;

impl Editor {
    pub(crate) fn handle_visual(&mut self, key: &KeyEvent, kind: VisualKind) -> Action {
        self.clear_message();

        if let Some(pending) = self.pending.take() {
            return self.handle_pending(pending, key);
        }
        if key.is_ctrl() {
            return Action::Continue;
        }
        if self.accept_count_digit(key) {
            return Action::Continue;
        }

        let raw_count = self.take_raw_count();
        let code = motion_code(key);
        if motion_kind(code).is_some() {
            let mut cursor = self.cursor.clone();
            if self.run_motion(&mut cursor, code, raw_count, false) {
                self.cursor = cursor;
            }
            return Action::Continue;
        }

        let count = raw_count.unwrap_or(1);
        match key.code {
            KeyCode::Escape => self.leave_visual(),
            KeyCode::Delete => self.visual_operator('d', kind),
            KeyCode::Char(ch) => match ch {
                'v' | 'V' => {
                    let want = if ch == 'v' {
                        VisualKind::Char
                    } else {
                        VisualKind::Line
                    };
                    if want == kind {
                        self.leave_visual();
                    } else {
                        self.mode = Mode::Visual(want);
                    }
                }
                'o' => self.cursor.swap_anchor(),

                'i' | 'a' => {
                    self.pending = Some(Pending::TextObject {
                        op: None,
                        inner: ch == 'i',
                    });
                }
                'f' | 'F' | 't' | 'T' => {
                    if let Some(find) = find_kind(ch) {
                        self.pending = Some(Pending::Find {
                            kind: find,
                            count,
                            op: None,
                        });
                    }
                }
                'g' => {
                    self.pending = Some(Pending::G {
                        op: None,
                        count: raw_count,
                    });
                }
                '\'' | '`' => {
                    self.pending = Some(Pending::GotoMark {
                        exact: ch == '`',
                        op: None,
                    });
                }
                '"' => self.pending = Some(Pending::Register),
                '/' => self.start_search(SearchDirection::Forward),
                '?' => self.start_search(SearchDirection::Backward),

                'd' | 'y' | 'c' | '>' | '<' => self.visual_operator(ch, kind),
                'x' => self.visual_operator('d', kind),
                'X' | 'D' => self.visual_line_operator('d', kind),
                'Y' => self.visual_line_operator('y', kind),
                'u' => self.visual_case(kind, |b| b.to_ascii_lowercase()),
                'U' => self.visual_case(kind, |b| b.to_ascii_uppercase()),
                '~' => self.visual_case(kind, swap_case),
                'J' => self.visual_join(kind),
                'p' | 'P' => self.visual_paste(kind),
                _ => {}
            },
            _ => {}
        }
        Action::Continue
    }

    fn visual_span(&self, kind: VisualKind) -> Option<Span> {
        if self.buffer.is_empty() {
            return None;
        }
        let selection = self.cursor.selection(kind)?;
        Some(match kind {
            VisualKind::Char => Span::Chars(selection.range(&self.buffer)),
            VisualKind::Line => {
                let rows = selection.rows();
                Span::Lines(*rows.start(), *rows.end())
            }
        })
    }

    /// Leave visual mode with the cursor on the start of the selection,
    /// which is where undo should bring it back to.
    pub(crate) fn take_selection(&mut self, kind: VisualKind) -> Option<Span> {
        let span = self.visual_span(kind);
        self.leave_visual();
        let span = span?;
        let start = match span {
            Span::Chars(r) => r.start,
            Span::Lines(first, _) => Position::new(first, 0),
        };
        self.cursor.set_position(start, &self.buffer, false);
        Some(span)
    }

    fn visual_operator(&mut self, op: char, kind: VisualKind) {
        if let Some(span) = self.take_selection(kind) {
            self.apply_operator(op, span);
        }
    }

    /// `X`, `D`, `Y`: always whole rows, even from a character selection.
    fn visual_line_operator(&mut self, op: char, kind: VisualKind) {
        if let Some(span) = self.take_selection(kind) {
            let (first, last) = span.rows();
            self.cursor.set_position(Position::new(first, 0), &self.buffer, false);
            self.apply_operator(op, Span::Lines(first, last));
        }
    }

    fn visual_case(&mut self, kind: VisualKind, f: fn(u8) -> u8) {
        if let Some(span) = self.take_selection(kind) {
            self.transform_span(span, f);
        }
    }

    fn visual_join(&mut self, kind: VisualKind) {
        if let Some(span) = self.take_selection(kind) {
            let (first, last) = span.rows();
            self.join_lines(first, (last - first).max(1));
        }
    }

    fn visual_paste(&mut self, kind: VisualKind) {
        let reg = self.registers.get(self.register.take()).clone();
        if reg.is_empty() {
            self.leave_visual();
            self.set_error("Nothing in register");
            return;
        }
        if let Some(span) = self.take_selection(kind) {
            self.replace_span(span, reg.content(), reg.is_linewise());
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
