//! Normal mode: counts, pending multi-key commands, and single-key
//! commands.
//!
//! | Keys                    | Command                                   |
//! |-------------------------|-------------------------------------------|
//! | `i` `a` `I` `A` `o` `O` | enter insert mode                         |
//! | `v` `V`                 | enter visual mode                         |
//! | `d` `c` `y` `>` `<`     | operators, waiting for a motion           |
//! | `x` `D` `C` `Y`         | `dl`, `d$`, `c$`, `yy`                    |
//! | `p` `P`                 | paste after / before                      |
//! | `J` `r` `~`             | join, replace, toggle case                |
//! | `u` `Ctrl-R`            | undo / redo                               |
//! | `Ctrl-A` `Ctrl-X`       | add / subtract the count from a number    |
//! | `m` `'` `` ` ``         | set mark, jump to mark row / position     |
//! | `"x`                    | use register `x` for the next command     |
//! | `ZZ` `ZQ`               | write and quit / quit without writing     |

use tracing::debug;

use v_editor::mode::{Mode, VisualKind};
use v_editor::motion::FindKind;
use v_editor::position::Position;
use v_editor::search::SearchDirection;
use v_editor::text_object;
use v_input::{KeyCode, KeyEvent};

use crate::editor::{
    Action, Editor, MotionKind, Pending, PendingOp, Span, motion_code, motion_kind,
};

/// The find kind bound to `f`, `F`, `t`, `T`.
pub(crate) const fn find_kind(c: char) -> Option<FindKind> {
    match c {
        'f' => Some(FindKind::Forward),
        'F' => Some(FindKind::Backward),
        't' => Some(FindKind::TillForward),
        'T' => Some(FindKind::TillBackward),
        _ => None,
    }
}

/// The key as a single ASCII byte (mark, register and find targets).
pub(crate) fn ascii_byte(key: &KeyEvent) -> Option<u8> {
    key.printable().filter(char::is_ascii).map(|c| c as u8)
}

impl Editor {
    // ── Dispatch ────────────────────────────────────────────────────────

    pub(crate) fn handle_normal(&mut self, key: &KeyEvent) -> Action {
        self.clear_message();

        if let Some(pending) = self.pending.take() {
            return self.handle_pending(pending, key);
        }
        if key.is_ctrl() {
            self.handle_normal_ctrl(key);
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
        match key.code {
            KeyCode::Char(ch) => self.normal_command(ch, raw_count),
            KeyCode::Delete => self.delete_chars(raw_count.unwrap_or(1)),
            KeyCode::Escape => self.cancel_pending(),
            _ => {}
        }
        Action::Continue
    }

    fn handle_normal_ctrl(&mut self, key: &KeyEvent) {
        let count = self.take_count();
        self.register = None;
        let delta = i64::try_from(count).unwrap_or(i64::MAX);
        match key.code {
            KeyCode::Char('r') => self.redo(count),
            KeyCode::Char('a') => self.increment(delta),
            KeyCode::Char('x') => self.increment(-delta),
            _ => {}
        }
    }

    fn normal_command(&mut self, ch: char, raw_count: Option<usize>) {
        let count = raw_count.unwrap_or(1);
        match ch {
            // Multi-key commands
            'd' | 'c' | 'y' | '>' | '<' => {
                self.pending = Some(Pending::Operator {
                    op: ch,
                    count: raw_count,
                });
            }
            'g' => {
                self.pending = Some(Pending::G {
                    op: None,
                    count: raw_count,
                });
            }
            'f' | 'F' | 't' | 'T' => {
                if let Some(kind) = find_kind(ch) {
                    self.pending = Some(Pending::Find { kind, count, op: None });
                }
            }
            'r' => self.pending = Some(Pending::Replace { count }),
            'm' => self.pending = Some(Pending::SetMark),
            'Z' => self.pending = Some(Pending::Z),
            '\'' | '`' => {
                self.pending = Some(Pending::GotoMark {
                    exact: ch == '`',
                    op: None,
                });
            }
            '"' => {
                // The count survives the register name: `3"ap`.
                self.pending = Some(Pending::Register);
                self.count = raw_count;
            }

            // Prompts
            '/' => self.start_search(SearchDirection::Forward),
            '?' => self.start_search(SearchDirection::Backward),
            ':' => self.start_command(),

            // Insert and visual entry
            'i' => self.begin_insert(true),
            'a' => {
                self.begin_insert(true);
                self.cursor.move_right(1, &self.buffer, true);
            }
            'I' => {
                self.begin_insert(true);
                self.cursor.move_to_first_non_blank(&self.buffer, true);
            }
            'A' => {
                self.begin_insert(true);
                self.cursor.move_to_line_end(&self.buffer, true);
            }
            'o' => self.open_line(true),
            'O' => self.open_line(false),
            'v' => self.enter_visual(VisualKind::Char),
            'V' => self.enter_visual(VisualKind::Line),

            // Edits
            'x' => self.delete_chars(count),
            'D' => self.operate_motion('d', KeyCode::Char('$'), raw_count),
            'C' => self.operate_motion('c', KeyCode::Char('$'), raw_count),
            'Y' => self.operate_lines('y', count),
            'p' => self.paste(true, count),
            'P' => self.paste(false, count),
            'J' => self.join_lines(self.cursor.line(), count.max(2) - 1),
            '~' => self.toggle_case(count),
            'u' => self.undo(count),
            _ => {}
        }
    }

    // ── Pending commands ────────────────────────────────────────────────

    /// Finish a multi-key command. Shared with visual mode, where every
    /// variant arrives with `op: None` and moves the selection head.
    pub(crate) fn handle_pending(&mut self, pending: Pending, key: &KeyEvent) -> Action {
        if key.code == KeyCode::Escape {
            self.cancel_pending();
            return Action::Continue;
        }

        match pending {
            Pending::Operator { op, count } => self.pending_operator(op, count, key),
            Pending::TextObject { op, inner } => {
                if let Some(object) = ascii_byte(key) {
                    self.text_object(op, inner, object);
                }
            }
            Pending::Find { kind, count, op } => {
                if let Some(target) = ascii_byte(key) {
                    self.last_find = Some(target);
                    self.find_target(kind, target, count, op);
                }
            }
            Pending::Replace { count } => {
                if let Some(ch) = key.printable() {
                    self.replace_chars(ch, count);
                }
            }
            Pending::SetMark => {
                if let Some(name) = ascii_byte(key) {
                    self.marks.set(name, self.cursor.position());
                }
            }
            Pending::GotoMark { exact, op } => {
                if let Some(name) = ascii_byte(key) {
                    self.goto_mark(name, exact, op);
                }
            }
            Pending::Register => match ascii_byte(key) {
                Some(name) => self.register = Some(name),
                None => self.cancel_pending(),
            },
            Pending::G { op, count } => {
                if key.code == KeyCode::Char('g') {
                    match op {
                        Some((op, _)) => self.operate_motion(op, KeyCode::Char('g'), count),
                        None => {
                            let mut cursor = self.cursor.clone();
                            self.run_motion(&mut cursor, KeyCode::Char('g'), count, false);
                            self.cursor = cursor;
                        }
                    }
                }
            }
            Pending::Z => match key.code {
                KeyCode::Char('Z') => return Action::WriteQuit,
                KeyCode::Char('Q') => return Action::Quit,
                _ => {}
            },
        }
        Action::Continue
    }

    /// The key after an operator: a count digit, the operator again (line
    /// form), a text object, or a motion.
    fn pending_operator(&mut self, op: char, count: Option<usize>, key: &KeyEvent) {
        if self.accept_count_digit(key) {
            self.pending = Some(Pending::Operator { op, count });
            return;
        }
        let merged = Self::merge_counts(count, self.take_raw_count());

        let Some(ch) = key.printable() else {
            // Arrows, Home, End.
            self.operate_motion(op, key.code, merged);
            return;
        };
        if ch == op {
            self.operate_lines(op, merged.unwrap_or(1));
            return;
        }
        match ch {
            'i' | 'a' => {
                self.pending = Some(Pending::TextObject {
                    op: Some((op, merged)),
                    inner: ch == 'i',
                });
            }
            'f' | 'F' | 't' | 'T' => {
                if let Some(kind) = find_kind(ch) {
                    self.pending = Some(Pending::Find {
                        kind,
                        count: merged.unwrap_or(1),
                        op: Some((op, None)),
                    });
                }
            }
            'g' => {
                self.pending = Some(Pending::G {
                    op: Some((op, None)),
                    count: merged,
                });
            }
            '\'' | '`' => {
                self.pending = Some(Pending::GotoMark {
                    exact: ch == '`',
                    op: Some((op, None)),
                });
            }
            '/' | '?' => {
                self.search_operator = Some((op, merged));
                let direction = if ch == '/' {
                    SearchDirection::Forward
                } else {
                    SearchDirection::Backward
                };
                self.start_search(direction);
            }
            _ => self.operate_motion(op, KeyCode::Char(ch), merged),
        }
    }

    /// `iw`, `a(`, `i"`, ... after an operator, or in visual mode.
    fn text_object(&mut self, op: Option<PendingOp>, inner: bool, object: u8) {
        let Some(range) = text_object::select(&self.buffer, self.cursor.position(), object, inner)
        else {
            return;
        };
        match op {
            Some((op, _)) => self.apply_operator(op, Span::Chars(range)),
            None => {
                self.cursor.set_anchor_at(range.start);
                self.cursor.set_position(range.end, &self.buffer, false);
                self.mode = Mode::Visual(VisualKind::Char);
            }
        }
    }

    fn find_target(&mut self, kind: FindKind, target: u8, count: usize, op: Option<PendingOp>) {
        match op {
            None => {
                self.cursor.find_char(&self.buffer, kind, target, count, false);
            }
            Some((op, _)) => {
                let mut cursor = self.cursor.clone();
                if cursor.find_char(&self.buffer, kind, target, count, true) {
                    let motion = if kind.is_inclusive() {
                        MotionKind::Inclusive
                    } else {
                        MotionKind::Exclusive
                    };
                    self.operate_to(op, cursor.position(), motion);
                }
            }
        }
    }

    fn goto_mark(&mut self, name: u8, exact: bool, op: Option<PendingOp>) {
        let Some(pos) = self.marks.get(name) else {
            self.set_error(format!("Mark not set: {}", char::from(name)));
            return;
        };
        let mut cursor = self.cursor.clone();
        cursor.set_position(pos, &self.buffer, false);
        if !exact {
            cursor.move_to_first_non_blank(&self.buffer, false);
        }
        match op {
            None => self.cursor = cursor,
            Some((op, _)) => {
                let motion = if exact {
                    MotionKind::Exclusive
                } else {
                    MotionKind::Linewise
                };
                self.operate_to(op, cursor.position(), motion);
            }
        }
    }

    // ── Line opening ────────────────────────────────────────────────────

    /// `o` / `O`: a fresh row below or above, in insert mode. One undo step
    /// with the text typed into it.
    fn open_line(&mut self, below: bool) {
        self.save_undo();
        self.ensure_row();
        let line = self.cursor.line();
        let at = if below { line + 1 } else { line };
        if !self.insert_row(at, b"") {
            self.history.discard_unchanged(&self.buffer);
            return;
        }
        self.cursor.set_position(Position::new(at, 0), &self.buffer, true);
        self.begin_insert(false);
    }

    // ── Undo / redo ─────────────────────────────────────────────────────

    pub(crate) fn undo(&mut self, count: usize) {
        let mut done = 0;
        while done < count.max(1) {
            let Some(pos) =
                self.history
                    .undo(&mut self.buffer, self.cursor.position(), &mut self.marks)
            else {
                break;
            };
            self.cursor.set_position(pos, &self.buffer, false);
            done += 1;
        }
        if done == 0 {
            self.set_message("Already at oldest change");
        } else {
            self.set_message("Undo");
        }
    }

    pub(crate) fn redo(&mut self, count: usize) {
        let mut done = 0;
        while done < count.max(1) {
            let Some(pos) =
                self.history
                    .redo(&mut self.buffer, self.cursor.position(), &mut self.marks)
            else {
                break;
            };
            self.cursor.set_position(pos, &self.buffer, false);
            done += 1;
        }
        if done == 0 {
            self.set_message("Already at newest change");
        } else {
            self.set_message("Redo");
        }
    }

    // ── Increment / decrement ───────────────────────────────────────────

    /// `Ctrl-A` / `Ctrl-X`: add `delta` to the decimal number under or after
    /// the cursor. A `-` right before the digits makes it negative. The
    /// cursor lands on the last digit of the result.
    fn increment(&mut self, delta: i64) {
        let pos = self.cursor.position();
        let bytes = self.buffer.line(pos.line);
        let Some(mut start) = (pos.col..bytes.len()).find(|&i| bytes[i].is_ascii_digit()) else {
            return;
        };
        while start > 0 && bytes[start - 1].is_ascii_digit() {
            start -= 1;
        }
        let end = start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();
        let Some(magnitude) = std::str::from_utf8(&bytes[start..end])
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
        else {
            return;
        };
        let negative = start > 0 && bytes[start - 1] == b'-';
        let from = if negative { start - 1 } else { start };
        let value = if negative { -magnitude } else { magnitude };
        let text = value.saturating_add(delta).to_string();

        let mut row = bytes[..from].to_vec();
        row.extend_from_slice(text.as_bytes());
        row.extend_from_slice(&bytes[end..]);

        self.save_undo();
        if let Err(e) = self.buffer.set_row(pos.line, row) {
            self.history.discard_unchanged(&self.buffer);
            self.report(e);
            return;
        }
        debug!(value, delta, "increment");
        let last_digit = Position::new(pos.line, from + text.len() - 1);
        self.cursor.set_position(last_digit, &self.buffer, false);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use v_editor::position::Position;
    use v_input::KeyCode;

    use crate::Action;
    use crate::editor::testing::*;

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    // ── Motions and counts ──────────────────────────────────────────────

    #[test]
    fn hjkl_with_counts() {
        let mut ed = editor_with(&["hello world", "second", "third"]);
        keys(&mut ed, "3l");
        assert_eq!(ed.cursor(), p(0, 3));
        keys(&mut ed, "2j");
        assert_eq!(ed.cursor(), p(2, 3));
        keys(&mut ed, "k");
        assert_eq!(ed.cursor(), p(1, 3));
        keys(&mut ed, "10h");
        assert_eq!(ed.cursor(), p(1, 0));
    }

    #[test]
    fn preferred_column_survives_short_rows() {
        let mut ed = editor_with(&["abcdefgh", "ab", "abcdefgh"]);
        keys(&mut ed, "$j");
        assert_eq!(ed.cursor(), p(1, 1));
        keys(&mut ed, "j");
        assert_eq!(ed.cursor(), p(2, 7));
    }

    #[test]
    fn goto_line_with_count() {
        let mut ed = editor_with(&["a", "  b", "c"]);
        keys(&mut ed, "2G");
        assert_eq!(ed.cursor(), p(1, 2));
        keys(&mut ed, "gg");
        assert_eq!(ed.cursor(), p(0, 0));
        keys(&mut ed, "G");
        assert_eq!(ed.cursor(), p(2, 0));
        keys(&mut ed, "2gg");
        assert_eq!(ed.cursor(), p(1, 2));
    }

    #[test]
    fn bracket_match_scenario() {
        let mut ed = editor_with(&["foo(bar(baz))"]);
        keys(&mut ed, "3l%");
        assert_eq!(ed.cursor(), p(0, 12));
        keys(&mut ed, "%");
        assert_eq!(ed.cursor(), p(0, 3));
    }

    #[test]
    fn find_and_repeat() {
        let mut ed = editor_with(&["a,b,c,d"]);
        keys(&mut ed, "f,");
        assert_eq!(ed.cursor(), p(0, 1));
        keys(&mut ed, ";");
        assert_eq!(ed.cursor(), p(0, 3));
        keys(&mut ed, ",");
        assert_eq!(ed.cursor(), p(0, 1));
        keys(&mut ed, "tc");
        assert_eq!(ed.cursor(), p(0, 3));
        keys(&mut ed, "Fa");
        assert_eq!(ed.cursor(), p(0, 0));
    }

    #[test]
    fn escape_cancels_count_and_operator() {
        let mut ed = editor_with(&["abc def"]);
        keys(&mut ed, "3\x1bl");
        assert_eq!(ed.cursor(), p(0, 1));
        keys(&mut ed, "d\x1bw");
        assert_eq!(lines(&ed), vec!["abc def"]);
        assert_eq!(ed.cursor(), p(0, 4));
    }

    // ── Insert entry ────────────────────────────────────────────────────

    #[test]
    fn insert_entry_points() {
        let mut ed = editor_with(&["  abc"]);
        keys(&mut ed, "$ax\x1b");
        assert_eq!(lines(&ed), vec!["  abcx"]);
        keys(&mut ed, "Iy\x1b");
        assert_eq!(lines(&ed), vec!["  yabcx"]);
        keys(&mut ed, "0Az\x1b");
        assert_eq!(lines(&ed), vec!["  yabcxz"]);
    }

    #[test]
    fn open_lines_below_and_above() {
        let mut ed = editor_with(&["one", "three"]);
        keys(&mut ed, "otwo\x1b");
        assert_eq!(lines(&ed), vec!["one", "two", "three"]);
        keys(&mut ed, "ggOzero\x1b");
        assert_eq!(lines(&ed), vec!["zero", "one", "two", "three"]);
        keys(&mut ed, "u");
        assert_eq!(lines(&ed), vec!["one", "two", "three"]);
    }

    #[test]
    fn typing_into_empty_buffer() {
        let mut ed = editor_with(&[]);
        keys(&mut ed, "ihi\x1b");
        assert_eq!(lines(&ed), vec!["hi"]);
        assert_eq!(ed.cursor(), p(0, 1));
    }

    // ── Undo / redo ─────────────────────────────────────────────────────

    #[test]
    fn undo_redo_with_messages() {
        let mut ed = editor_with(&["abc"]);
        keys(&mut ed, "u");
        assert_eq!(ed.message(), Some("Already at oldest change"));
        keys(&mut ed, "xx");
        assert_eq!(lines(&ed), vec!["c"]);
        keys(&mut ed, "2u");
        assert_eq!(lines(&ed), vec!["abc"]);
        assert_eq!(ed.message(), Some("Undo"));
        feed(&mut ed, &[ctrl('r')]);
        assert_eq!(lines(&ed), vec!["bc"]);
        assert_eq!(ed.message(), Some("Redo"));
        feed(&mut ed, &[ctrl('r'), ctrl('r')]);
        assert_eq!(lines(&ed), vec!["c"]);
        assert_eq!(ed.message(), Some("Already at newest change"));
    }

    #[test]
    fn new_change_clears_redo() {
        let mut ed = editor_with(&["abc"]);
        keys(&mut ed, "xux");
        feed(&mut ed, &[ctrl('r')]);
        assert_eq!(lines(&ed), vec!["bc"]);
        assert_eq!(ed.message(), Some("Already at newest change"));
    }

    #[test]
    fn insert_session_is_one_undo_step() {
        let mut ed = editor_with(&["x"]);
        keys(&mut ed, "ahello\nworld\x1b");
        assert_eq!(lines(&ed), vec!["xhello", "world"]);
        keys(&mut ed, "u");
        assert_eq!(lines(&ed), vec!["x"]);
        assert_eq!(ed.cursor(), p(0, 0));
    }

    #[test]
    fn empty_insert_session_leaves_no_undo_step() {
        let mut ed = editor_with(&["abc"]);
        keys(&mut ed, "x");
        keys(&mut ed, "i\x1b");
        keys(&mut ed, "u");
        assert_eq!(lines(&ed), vec!["abc"]);
    }

    // ── Increment ───────────────────────────────────────────────────────

    #[test]
    fn increment_number_after_cursor() {
        let mut ed = editor_with(&["width: 9px"]);
        feed(&mut ed, &[ctrl('a')]);
        assert_eq!(lines(&ed), vec!["width: 10px"]);
        assert_eq!(ed.cursor(), p(0, 8));
    }

    #[test]
    fn increment_from_middle_of_number() {
        let mut ed = editor_with(&["x 1299"]);
        keys(&mut ed, "4l5");
        feed(&mut ed, &[ctrl('a')]);
        assert_eq!(lines(&ed), vec!["x 1304"]);
    }

    #[test]
    fn decrement_through_zero() {
        let mut ed = editor_with(&["n = 1;"]);
        keys(&mut ed, "3");
        feed(&mut ed, &[ctrl('x')]);
        assert_eq!(lines(&ed), vec!["n = -2;"]);
        assert_eq!(ed.cursor(), p(0, 5));
        feed(&mut ed, &[ctrl('a'), ctrl('a'), ctrl('a')]);
        assert_eq!(lines(&ed), vec!["n = 1;"]);
    }

    #[test]
    fn increment_without_number_is_noop() {
        let mut ed = editor_with(&["none here"]);
        feed(&mut ed, &[ctrl('a')]);
        assert_eq!(lines(&ed), vec!["none here"]);
        assert!(!ed.buffer().is_dirty());
    }

    // ── Marks and registers ─────────────────────────────────────────────

    #[test]
    fn marks_jump_to_row_or_position() {
        let mut ed = editor_with(&["  first", "second", "third"]);
        keys(&mut ed, "4lma");
        keys(&mut ed, "G");
        keys(&mut ed, "'a");
        assert_eq!(ed.cursor(), p(0, 2));
        keys(&mut ed, "G`a");
        assert_eq!(ed.cursor(), p(0, 4));
    }

    #[test]
    fn unset_mark_reports_error() {
        let mut ed = editor_with(&["a"]);
        keys(&mut ed, "'q");
        assert_eq!(ed.message(), Some("Mark not set: q"));
        assert!(ed.message_is_error());
    }

    #[test]
    fn marks_follow_row_deletes() {
        let mut ed = editor_with(&["a", "b", "c"]);
        keys(&mut ed, "Gmcggdd");
        keys(&mut ed, "'c");
        assert_eq!(ed.cursor(), p(1, 0));
        assert_eq!(ed.marks().get(b'c'), Some(p(1, 0)));
    }

    #[test]
    fn marks_return_with_undo_and_redo() {
        let mut ed = editor_with(&["zero", "one", "two"]);
        keys(&mut ed, "jjmaggdd");
        assert_eq!(ed.marks().get(b'a'), Some(p(1, 0)));
        keys(&mut ed, "u");
        assert_eq!(ed.marks().get(b'a'), Some(p(2, 0)));
        keys(&mut ed, "gg'a");
        assert_eq!(ed.cursor(), p(2, 0));
        assert_eq!(lines(&ed)[ed.cursor().line], "two");
        feed(&mut ed, &[ctrl('r')]);
        assert_eq!(ed.marks().get(b'a'), Some(p(1, 0)));
    }

    #[test]
    fn mark_inside_deleted_rows_comes_back_on_undo() {
        let mut ed = editor_with(&["a", "b", "c"]);
        keys(&mut ed, "jmbdd");
        assert_eq!(ed.marks().get(b'b'), None);
        keys(&mut ed, "u");
        assert_eq!(ed.marks().get(b'b'), Some(p(1, 0)));
    }

    #[test]
    fn zz_writes_and_quits_zq_just_quits() {
        let mut ed = editor_with(&["a"]);
        keys(&mut ed, "x");
        assert_eq!(keys(&mut ed, "ZZ"), Action::WriteQuit);
        assert_eq!(keys(&mut ed, "ZQ"), Action::Quit);
        assert_eq!(keys(&mut ed, "Zx"), Action::Continue);
        assert_eq!(lines(&ed), vec![""]);
    }

    #[test]
    fn shifted_arrows_move_by_paragraph_and_word() {
        let mut ed = editor_with(&["one two", "three", "", "four"]);
        feed(&mut ed, &[shift(KeyCode::Right)]);
        assert_eq!(ed.cursor(), p(0, 4));
        feed(&mut ed, &[shift(KeyCode::Down)]);
        assert_eq!(ed.cursor(), p(3, 0));
        feed(&mut ed, &[shift(KeyCode::Up)]);
        assert_eq!(ed.cursor(), p(0, 0));
        feed(&mut ed, &[shift(KeyCode::Left)]);
        assert_eq!(ed.cursor(), p(0, 0));
    }

    #[test]
    fn named_register_keeps_its_text() {
        let mut ed = editor_with(&["alpha beta"]);
        keys(&mut ed, "\"ayw");
        keys(&mut ed, "wyw");
        assert_eq!(ed.registers().get(Some(b'a')).content(), b"alpha ");
        assert_eq!(ed.registers().unnamed().content(), b"beta");
        keys(&mut ed, "\"aP");
        assert_eq!(lines(&ed), vec!["alpha alpha beta"]);
    }

    #[test]
    fn replace_with_count() {
        let mut ed = editor_with(&["abcd"]);
        keys(&mut ed, "3rx");
        assert_eq!(lines(&ed), vec!["xxxd"]);
        assert_eq!(ed.cursor(), p(0, 2));
        keys(&mut ed, "5rz");
        assert_eq!(lines(&ed), vec!["xxxd"]);
    }

    #[test]
    fn toggle_case_advances() {
        let mut ed = editor_with(&["abC1"]);
        keys(&mut ed, "~");
        assert_eq!(lines(&ed), vec!["AbC1"]);
        assert_eq!(ed.cursor(), p(0, 1));
        keys(&mut ed, "9~");
        assert_eq!(lines(&ed), vec!["ABc1"]);
        assert_eq!(ed.cursor(), p(0, 3));
    }
}
