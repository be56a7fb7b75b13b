//! Status-line prompts: incremental `/` `?` search and the `:` command line.

use tracing::{debug, info};

use v_editor::command::{Command, CommandLine, Substitute};
use v_editor::cursor::Cursor;
use v_editor::error::CommandError;
use v_editor::options::SetDirective;
use v_editor::position::Position;
use v_editor::search::{self, SearchDirection, SearchState};
use v_input::{KeyCode, KeyEvent};

use crate::editor::{Action, Editor, MotionKind, Prompt};

/// Whether a search from `from` that found `to` went around the buffer end.
fn wrapped(direction: SearchDirection, from: Position, to: Position) -> bool {
    match direction {
        SearchDirection::Forward => to <= from,
        SearchDirection::Backward => to >= from,
    }
}

const fn wrap_message(direction: SearchDirection) -> &'static str {
    match direction {
        SearchDirection::Forward => "search hit BOTTOM, continuing at TOP",
        SearchDirection::Backward => "search hit TOP, continuing at BOTTOM",
    }
}

impl Editor {
    pub(crate) fn start_search(&mut self, direction: SearchDirection) {
        let state = SearchState::new(direction, self.cursor.position(), self.top_line);
        self.prompt = Some(Prompt::Search(state));
    }

    pub(crate) fn start_command(&mut self) {
        self.prompt = Some(Prompt::Command {
            line: CommandLine::new(),
            saved_pos: self.cursor.position(),
            saved_top: self.top_line,
        });
    }

    /// A key while a prompt is open. The prompt is taken out of the editor
    /// and put back unless the key closed it.
    pub(crate) fn handle_prompt(&mut self, key: &KeyEvent) -> Action {
        match self.prompt.take() {
            Some(Prompt::Search(state)) => {
                self.search_key(state, key);
                Action::Continue
            }
            Some(Prompt::Command {
                line,
                saved_pos,
                saved_top,
            }) => self.command_key(line, saved_pos, saved_top, key),
            None => Action::Continue,
        }
    }

    // ── Search prompt ───────────────────────────────────────────────────

    fn search_key(&mut self, mut state: SearchState, key: &KeyEvent) {
        match key.code {
            KeyCode::Escape => self.cancel_search(&state),
            KeyCode::Backspace => {
                if state.backspace() {
                    self.preview_search(&state);
                    self.prompt = Some(Prompt::Search(state));
                } else {
                    self.cancel_search(&state);
                }
            }
            KeyCode::Enter => self.confirm_search(&state),
            _ => {
                if let Some(c) = key.printable() {
                    let mut enc = [0u8; 4];
                    for &b in c.encode_utf8(&mut enc).as_bytes() {
                        state.push(b);
                    }
                    self.preview_search(&state);
                }
                self.prompt = Some(Prompt::Search(state));
            }
        }
    }

    /// Move the cursor to the first match from the saved position, or back
    /// to the saved position when there is none.
    fn preview_search(&mut self, state: &SearchState) {
        let found = search::find(
            &self.buffer,
            state.input(),
            state.saved_pos(),
            state.direction(),
            self.options.wrap_scan,
        );
        self.cursor
            .set_position(found.unwrap_or(state.saved_pos()), &self.buffer, false);
        if self.options.hl_search {
            self.buffer.set_search_overlay(state.input(), found);
        }
    }

    fn cancel_search(&mut self, state: &SearchState) {
        self.cursor.set_position(state.saved_pos(), &self.buffer, false);
        self.top_line = state.saved_top_line();
        self.search_operator = None;
        if self.options.hl_search {
            self.buffer.set_search_overlay(&self.last_search, None);
        } else {
            self.buffer.set_search_overlay(b"", None);
        }
    }

    /// Return in the search prompt. Empty input repeats the last pattern.
    fn confirm_search(&mut self, state: &SearchState) {
        let saved = state.saved_pos();
        self.cursor.set_position(saved, &self.buffer, false);
        let op = self.search_operator.take();

        if !state.is_empty() {
            self.last_search = state.input().to_vec();
        }
        if self.last_search.is_empty() {
            self.set_error("No previous search pattern");
            return;
        }
        self.last_search_direction = state.direction();
        debug!(pattern = %String::from_utf8_lossy(&self.last_search), "search");

        let direction = state.direction();
        let Some(target) = search::find(
            &self.buffer,
            &self.last_search,
            saved,
            direction,
            self.options.wrap_scan,
        ) else {
            self.set_error(format!(
                "Pattern not found: {}",
                String::from_utf8_lossy(&self.last_search)
            ));
            return;
        };

        if self.options.hl_search {
            self.buffer.set_search_overlay(&self.last_search, Some(target));
        }
        if wrapped(direction, saved, target) {
            self.set_message(wrap_message(direction));
        }
        match op {
            Some((op, _)) => self.operate_to(op, target, MotionKind::Exclusive),
            None => self.cursor.set_position(target, &self.buffer, false),
        }
    }

    /// `n` (or `N` with `reverse`): the `count`th match of the last pattern.
    pub(crate) fn search_motion(&mut self, cursor: &mut Cursor, reverse: bool, count: usize) -> bool {
        if self.last_search.is_empty() {
            self.set_error("No previous search pattern");
            return false;
        }
        let direction = if reverse {
            self.last_search_direction.opposite()
        } else {
            self.last_search_direction
        };

        let mut pos = cursor.position();
        let mut went_around = false;
        for _ in 0..count.max(1) {
            let Some(next) = search::find(
                &self.buffer,
                &self.last_search,
                pos,
                direction,
                self.options.wrap_scan,
            ) else {
                self.set_error(format!(
                    "Pattern not found: {}",
                    String::from_utf8_lossy(&self.last_search)
                ));
                return false;
            };
            went_around |= wrapped(direction, pos, next);
            pos = next;
        }

        if went_around {
            self.set_message(wrap_message(direction));
        }
        if self.options.hl_search {
            self.buffer.set_search_overlay(&self.last_search, Some(pos));
        }
        cursor.set_position(pos, &self.buffer, false);
        true
    }

    // ── Command prompt ──────────────────────────────────────────────────

    fn command_key(
        &mut self,
        mut line: CommandLine,
        saved_pos: Position,
        saved_top: usize,
        key: &KeyEvent,
    ) -> Action {
        match key.code {
            KeyCode::Escape => self.restore_view(saved_pos, saved_top),
            KeyCode::Backspace => {
                if line.backspace() {
                    self.prompt = Some(Prompt::Command {
                        line,
                        saved_pos,
                        saved_top,
                    });
                } else {
                    self.restore_view(saved_pos, saved_top);
                }
            }
            KeyCode::Enter => return self.execute_command(&line),
            _ => {
                if let Some(c) = key.printable() {
                    line.push(c);
                }
                self.prompt = Some(Prompt::Command {
                    line,
                    saved_pos,
                    saved_top,
                });
            }
        }
        Action::Continue
    }

    fn restore_view(&mut self, pos: Position, top: usize) {
        self.cursor.set_position(pos, &self.buffer, false);
        self.top_line = top;
    }

    fn execute_command(&mut self, line: &CommandLine) -> Action {
        let command = match line.parse() {
            Ok(command) => command,
            Err(e) => {
                self.set_error(e.to_string());
                return Action::Continue;
            }
        };
        debug!(?command, "command");

        match command {
            Command::Empty => {}
            Command::Write => return Action::Write,
            Command::WriteQuit => return Action::WriteQuit,
            Command::Quit { force } => {
                if force || !self.buffer.is_dirty() {
                    info!(force, "quit");
                    return Action::Quit;
                }
                self.set_error(CommandError::UnsavedChanges.to_string());
            }
            Command::Goto(n) => {
                self.cursor.goto_line(n.saturating_sub(1), &self.buffer, false);
                self.cursor.move_to_first_non_blank(&self.buffer, false);
            }
            Command::GotoLast => {
                self.cursor.move_to_last_line(&self.buffer, false);
                self.cursor.move_to_first_non_blank(&self.buffer, false);
            }
            Command::Substitute(sub) => self.substitute(&sub),
            Command::Set(directives) => self.set_options(&directives),
            Command::NoHighlight => self.buffer.set_search_overlay(b"", None),
            Command::Unknown(name) => self.set_error(CommandError::Unknown(name).to_string()),
        }
        Action::Continue
    }

    fn substitute(&mut self, sub: &Substitute) {
        let rows = sub.rows(&self.buffer, self.cursor.line());
        self.save_undo();
        match sub.apply(&mut self.buffer, rows) {
            Ok(1) => self.set_message("1 substitution"),
            Ok(n) => self.set_message(format!("{n} substitutions")),
            Err(e) => {
                self.history.discard_unchanged(&self.buffer);
                self.set_error(e.to_string());
            }
        }
    }

    /// `:set`. Directives apply left to right and stop at the first error.
    fn set_options(&mut self, directives: &[SetDirective]) {
        let hl_before = self.options.hl_search;
        let mut shown = Vec::new();
        let mut failed = None;
        for directive in directives {
            match self.options.apply(directive) {
                Ok(Some(text)) if !text.is_empty() => shown.push(text),
                Ok(_) => {}
                Err(e) => {
                    failed = Some(e);
                    break;
                }
            }
        }

        self.history.set_limit(self.options.undo_levels);
        if self.options.hl_search != hl_before {
            if self.options.hl_search {
                self.buffer.set_search_overlay(&self.last_search, None);
            } else {
                self.buffer.set_search_overlay(b"", None);
            }
        }

        match failed {
            Some(e) => self.set_error(e.to_string()),
            None if !shown.is_empty() => self.set_message(shown.join("  ")),
            None => {}
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use v_editor::position::Position;
    use v_editor::syntax::HighlightClass;

    use crate::Action;
    use crate::editor::testing::*;

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    // ── Search ──────────────────────────────────────────────────────────

    #[test]
    fn incremental_search_previews_and_confirms() {
        let mut ed = editor_with(&["the cat sat", "a cat ran"]);
        keys(&mut ed, "/c");
        assert_eq!(ed.cursor(), p(0, 4));
        keys(&mut ed, "at r");
        assert_eq!(ed.cursor(), p(1, 2));
        keys(&mut ed, "\n");
        assert_eq!(ed.cursor(), p(1, 2));
        assert_eq!(ed.status_line(), "");
    }

    #[test]
    fn escape_restores_cursor() {
        let mut ed = editor_with(&["abc abc"]);
        keys(&mut ed, "/abc");
        assert_eq!(ed.cursor(), p(0, 4));
        keys(&mut ed, "\x1b");
        assert_eq!(ed.cursor(), p(0, 0));
        keys(&mut ed, "n");
        assert_eq!(ed.message(), Some("No previous search pattern"));
    }

    #[test]
    fn backspace_on_empty_search_cancels() {
        let mut ed = editor_with(&["xy"]);
        keys(&mut ed, "/y");
        feed(&mut ed, &[backspace()]);
        assert_eq!(ed.status_line(), "/");
        assert_eq!(ed.cursor(), p(0, 0));
        feed(&mut ed, &[backspace()]);
        assert_eq!(ed.status_line(), "");
        keys(&mut ed, "x");
        assert_eq!(lines(&ed), vec!["y"]);
    }

    #[test]
    fn n_and_big_n_wrap_with_messages() {
        let mut ed = editor_with(&["the cat sat", "a cat ran"]);
        keys(&mut ed, "/cat\n");
        assert_eq!(ed.cursor(), p(0, 4));
        keys(&mut ed, "n");
        assert_eq!(ed.cursor(), p(1, 2));
        assert_eq!(ed.message(), None);
        keys(&mut ed, "n");
        assert_eq!(ed.cursor(), p(0, 4));
        assert_eq!(ed.message(), Some("search hit BOTTOM, continuing at TOP"));
        keys(&mut ed, "N");
        assert_eq!(ed.cursor(), p(1, 2));
        assert_eq!(ed.message(), Some("search hit TOP, continuing at BOTTOM"));
    }

    #[test]
    fn backward_search_reverses_n() {
        let mut ed = editor_with(&["x1 x2 x3"]);
        keys(&mut ed, "$?x\n");
        assert_eq!(ed.cursor(), p(0, 6));
        keys(&mut ed, "n");
        assert_eq!(ed.cursor(), p(0, 3));
        keys(&mut ed, "N");
        assert_eq!(ed.cursor(), p(0, 6));
    }

    #[test]
    fn missing_pattern_reports_and_stays() {
        let mut ed = editor_with(&["abc"]);
        keys(&mut ed, "l/zzz\n");
        assert_eq!(ed.cursor(), p(0, 1));
        assert_eq!(ed.message(), Some("Pattern not found: zzz"));
        assert!(ed.message_is_error());
    }

    #[test]
    fn nowrapscan_stops_at_end() {
        let mut ed = editor_with(&["ab", "ab"]);
        keys(&mut ed, ":set nows\n");
        keys(&mut ed, "/ab\n");
        assert_eq!(ed.cursor(), p(1, 0));
        keys(&mut ed, "n");
        assert_eq!(ed.cursor(), p(1, 0));
        assert_eq!(ed.message(), Some("Pattern not found: ab"));
    }

    #[test]
    fn empty_search_repeats_last_pattern() {
        let mut ed = editor_with(&["a.a.a"]);
        keys(&mut ed, "/.\n/\n");
        assert_eq!(ed.cursor(), p(0, 3));
    }

    #[test]
    fn search_as_operator_target() {
        let mut ed = editor_with(&["keep delete stop here"]);
        keys(&mut ed, "wd/stop\n");
        assert_eq!(lines(&ed), vec!["keep stop here"]);
        keys(&mut ed, "dn");
        assert_eq!(lines(&ed), vec!["keep stop here"]);
    }

    #[test]
    fn highlight_follows_hlsearch() {
        let mut ed = editor_with(&["ab ab"]);
        keys(&mut ed, "/ab\n");
        assert_eq!(ed.render_row(0)[0], HighlightClass::Match);
        assert_eq!(ed.render_row(0)[3], HighlightClass::MatchActive);
        keys(&mut ed, ":noh\n");
        assert_eq!(ed.render_row(0)[3], HighlightClass::Normal);
        keys(&mut ed, ":set nohls\n/ab\n");
        assert_eq!(ed.render_row(0)[0], HighlightClass::Normal);
    }

    #[test]
    fn active_match_follows_cursor_motion() {
        let mut ed = editor_with(&["ab ab", "x ab"]);
        keys(&mut ed, "/ab\n");
        assert_eq!(ed.cursor().col, 3);
        keys(&mut ed, "h");
        assert_eq!(ed.render_row(0)[3], HighlightClass::Match);
        assert_eq!(ed.render_row(0)[0], HighlightClass::Match);
        keys(&mut ed, "0");
        assert_eq!(ed.render_row(0)[0], HighlightClass::MatchActive);
        keys(&mut ed, "j$");
        assert_eq!(ed.render_row(0)[0], HighlightClass::Match);
        assert_eq!(ed.render_row(1)[3], HighlightClass::MatchActive);
    }

    #[test]
    fn undo_after_nohlsearch_keeps_overlay_cleared() {
        let mut ed = editor_with(&["cat dog"]);
        keys(&mut ed, "/cat\nx:noh\nu");
        assert_eq!(lines(&ed), vec!["cat dog"]);
        assert!(ed.render_row(0).iter().all(|&c| c == HighlightClass::Normal));
    }

    #[test]
    fn undo_recomputes_overlay_for_current_pattern() {
        let mut ed = editor_with(&["cat dog"]);
        keys(&mut ed, "x/dog\nu");
        assert_eq!(lines(&ed), vec!["cat dog"]);
        let row = ed.render_row(0);
        assert_eq!(row[0], HighlightClass::Normal);
        assert_eq!(row[4], HighlightClass::Match);
    }

    // ── Commands ────────────────────────────────────────────────────────

    #[test]
    fn write_and_quit_actions() {
        let mut ed = editor_with(&["x"]);
        assert_eq!(keys(&mut ed, ":w\n"), Action::Write);
        assert_eq!(keys(&mut ed, ":q\n"), Action::Quit);
        assert_eq!(keys(&mut ed, ":wq\n"), Action::WriteQuit);
        assert_eq!(keys(&mut ed, ":x\n"), Action::WriteQuit);
    }

    #[test]
    fn quit_refused_when_dirty() {
        let mut ed = editor_with(&["x"]);
        keys(&mut ed, "x");
        assert_eq!(keys(&mut ed, ":q\n"), Action::Continue);
        assert_eq!(
            ed.message(),
            Some("No write since last change (add ! to override)")
        );
        assert!(ed.message_is_error());
        assert_eq!(keys(&mut ed, ":q!\n"), Action::Quit);
    }

    #[test]
    fn goto_row_commands() {
        let mut ed = editor_with(&["a", "  b", "c"]);
        keys(&mut ed, ":2\n");
        assert_eq!(ed.cursor(), p(1, 2));
        keys(&mut ed, ":$\n");
        assert_eq!(ed.cursor(), p(2, 0));
        keys(&mut ed, ":99\n");
        assert_eq!(ed.cursor(), p(2, 0));
        keys(&mut ed, ":0\n");
        assert_eq!(ed.cursor(), p(0, 0));
    }

    #[test]
    fn substitute_counts_and_undoes() {
        let mut ed = editor_with(&["a-a-a", "a"]);
        keys(&mut ed, ":s/a/b/\n");
        assert_eq!(lines(&ed), vec!["b-a-a", "a"]);
        assert_eq!(ed.message(), Some("1 substitution"));
        keys(&mut ed, ":%s/a/c/g\n");
        assert_eq!(lines(&ed), vec!["b-c-c", "c"]);
        assert_eq!(ed.message(), Some("3 substitutions"));
        keys(&mut ed, "u");
        assert_eq!(lines(&ed), vec!["b-a-a", "a"]);
    }

    #[test]
    fn substitute_failure_leaves_no_undo_step() {
        let mut ed = editor_with(&["abc"]);
        keys(&mut ed, ":s/zzz/y/\n");
        assert_eq!(ed.message(), Some("Pattern not found: zzz"));
        keys(&mut ed, "u");
        assert_eq!(ed.message(), Some("Already at oldest change"));
    }

    #[test]
    fn set_reports_and_errors() {
        let mut ed = editor_with(&["x"]);
        keys(&mut ed, ":set ts=8 sw?\n");
        assert_eq!(ed.options().tab_stop, 8);
        assert_eq!(ed.message(), Some("shiftwidth=4"));
        keys(&mut ed, ":set bogus\n");
        assert_eq!(ed.message(), Some("Unknown option: bogus"));
        assert!(ed.message_is_error());
    }

    #[test]
    fn undolevels_limits_history() {
        let mut ed = editor_with(&["abcd"]);
        keys(&mut ed, ":set ul=1\n");
        keys(&mut ed, "xxx");
        keys(&mut ed, "2u");
        assert_eq!(lines(&ed), vec!["cd"]);
        assert_eq!(ed.message(), Some("Undo"));
        keys(&mut ed, "u");
        assert_eq!(ed.message(), Some("Already at oldest change"));
    }

    #[test]
    fn unknown_command_and_cancel() {
        let mut ed = editor_with(&["x"]);
        keys(&mut ed, ":frob\n");
        assert_eq!(ed.message(), Some("Not an editor command: frob"));
        keys(&mut ed, ":q\x1b");
        assert_eq!(ed.status_line(), "");
        keys(&mut ed, ":");
        feed(&mut ed, &[backspace()]);
        assert_eq!(ed.status_line(), "");
        keys(&mut ed, "x");
        assert_eq!(lines(&ed), vec![""]);
    }
}
