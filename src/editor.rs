//! The editor: state, event entry point, and the helpers every mode shares.
//!
//! Each input event flows through:
//!
//!   `handle_event` → prompt or mode dispatch → buffer/cursor mutation
//!                  → clamp cursor → keep the cursor inside the viewport
//!
//! The mode handlers live in their own files (`normal.rs`, `insert.rs`,
//! `visual.rs`, `prompt.rs`, `mouse.rs`) as further `impl Editor` blocks;
//! operators and the edits they share are in `ops.rs`.

use std::time::Instant;

use tracing::{trace, warn};

use v_editor::buffer::Buffer;
use v_editor::command::CommandLine;
use v_editor::cursor::{Cursor, Selection};
use v_editor::error::EditError;
use v_editor::history::History;
use v_editor::marks::Marks;
use v_editor::mode::{CursorShape, Mode, VisualKind};
use v_editor::motion::FindKind;
use v_editor::options::Options;
use v_editor::position::{Position, Range};
use v_editor::register::RegisterFile;
use v_editor::search::{SearchDirection, SearchState};
use v_editor::syntax::{self, HighlightClass};
use v_input::{Event, KeyCode, KeyEvent, Modifiers};

/// Text-area height assumed until the host reports one.
const DEFAULT_TEXT_HEIGHT: usize = 24;

// ─── Action ─────────────────────────────────────────────────────────────────

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
    /// Persist the buffer, then call [`Editor::mark_saved`].
    Write,
    WriteQuit,
}

// ─── Pending state ──────────────────────────────────────────────────────────

/// An operator waiting for its motion, with the count typed before it.
pub(crate) type PendingOp = (char, Option<usize>);

/// Multi-key command state.
///
/// Vim's grammar: `["x] [count] operator [count] (motion | text-object)`.
/// Variants carrying `op: Option<PendingOp>` serve both a bare motion
/// (`None`) and an operator target (`Some`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pending {
    /// `d`, `c`, `y`, `>` or `<` pressed.
    Operator { op: char, count: Option<usize> },
    /// `i`/`a` pressed after an operator or in visual mode.
    TextObject { op: Option<PendingOp>, inner: bool },
    /// `f`/`F`/`t`/`T` waiting for the target byte.
    Find {
        kind: FindKind,
        count: usize,
        op: Option<PendingOp>,
    },
    /// `r` waiting for the replacement.
    Replace { count: usize },
    /// `m` waiting for the mark name.
    SetMark,
    /// `'` (row) or `` ` `` (exact) waiting for the mark name.
    GotoMark { exact: bool, op: Option<PendingOp> },
    /// `"` waiting for the register name.
    Register,
    /// First `g` of `gg`.
    G {
        op: Option<PendingOp>,
        count: Option<usize>,
    },
    /// First `Z` of `ZZ` / `ZQ`.
    Z,
}

/// An open status-line prompt.
#[derive(Debug, Clone)]
pub(crate) enum Prompt {
    Search(SearchState),
    Command {
        line: CommandLine,
        saved_pos: Position,
        saved_top: usize,
    },
}

// ─── Motions and spans ──────────────────────────────────────────────────────

/// How an operator treats the span a motion covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MotionKind {
    /// The target byte is left out (`w`, `b`, `h`, search).
    Exclusive,
    /// The target byte is included (`e`, `$`, `f`, `%`).
    Inclusive,
    /// Whole rows (`j`, `k`, `G`, `'a`).
    Linewise,
}

/// The text an operator acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Span {
    /// An inclusive byte span, possibly across rows.
    Chars(Range),
    /// Rows `first..=last`.
    Lines(usize, usize),
}

impl Span {
    /// First and last row touched.
    pub(crate) const fn rows(self) -> (usize, usize) {
        match self {
            Self::Chars(r) => (r.start.line, r.end.line),
            Self::Lines(first, last) => (first, last),
        }
    }
}

/// The motion key an event stands for. Shifted arrows are paragraph
/// (up/down) and word (left/right) motions.
pub(crate) fn motion_code(key: &KeyEvent) -> KeyCode {
    if !key.modifiers.contains(Modifiers::SHIFT) {
        return key.code;
    }
    match key.code {
        KeyCode::Up => KeyCode::Char('{'),
        KeyCode::Down => KeyCode::Char('}'),
        KeyCode::Left => KeyCode::Char('b'),
        KeyCode::Right => KeyCode::Char('w'),
        code => code,
    }
}

/// The motion class of a key, or `None` when the key is not a motion.
pub(crate) const fn motion_kind(code: KeyCode) -> Option<MotionKind> {
    Some(match code {
        KeyCode::Char('h' | 'l' | '0' | '^' | 'w' | 'W' | 'b' | 'B' | 'n' | 'N' | ',')
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Home => MotionKind::Exclusive,
        KeyCode::Char('e' | 'E' | '$' | '%' | ';') | KeyCode::End => MotionKind::Inclusive,
        KeyCode::Char('j' | 'k' | 'G' | '{' | '}')
        | KeyCode::Up
        | KeyCode::Down
        | KeyCode::PageUp
        | KeyCode::PageDown => MotionKind::Linewise,
        _ => return None,
    })
}

// ─── Editor ─────────────────────────────────────────────────────────────────

/// The editor state. One value, owned by the host, mutated through
/// [`handle_event`](Self::handle_event).
#[derive(Debug)]
pub struct Editor {
    pub(crate) buffer: Buffer,
    pub(crate) cursor: Cursor,
    pub(crate) mode: Mode,
    pub(crate) history: History,
    pub(crate) registers: RegisterFile,
    pub(crate) marks: Marks,
    pub(crate) options: Options,

    /// Multi-key command in progress.
    pub(crate) pending: Option<Pending>,
    /// Count typed so far; `None` when no digit was pressed.
    pub(crate) count: Option<usize>,
    /// Register named with `"x` for the next yank, delete or paste.
    pub(crate) register: Option<u8>,

    pub(crate) prompt: Option<Prompt>,
    /// Operator waiting for a `/` or `?` search to finish (`d/foo`).
    pub(crate) search_operator: Option<PendingOp>,
    /// Last confirmed search pattern; empty when there was none.
    pub(crate) last_search: Vec<u8>,
    pub(crate) last_search_direction: SearchDirection,
    /// Target byte of the last `f`/`F`/`t`/`T`, for `;` and `,`.
    pub(crate) last_find: Option<u8>,

    pub(crate) message: Option<String>,
    pub(crate) message_is_error: bool,

    /// First visible row and the text-area height, from the renderer.
    pub(crate) top_line: usize,
    pub(crate) text_height: usize,

    /// Where the left button went down, while it is held.
    pub(crate) drag_origin: Option<Position>,
    /// Time and cell of the last left press, for double-click detection.
    pub(crate) last_click: Option<(Instant, u16, u16)>,
}

impl Editor {
    /// An editor over an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer(Buffer::new())
    }

    /// An editor over a loaded buffer, cursor at the top.
    #[must_use]
    pub fn with_buffer(buffer: Buffer) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(),
            mode: Mode::Normal,
            history: History::new(),
            registers: RegisterFile::new(),
            marks: Marks::new(),
            options: Options::default(),
            pending: None,
            count: None,
            register: None,
            prompt: None,
            search_operator: None,
            last_search: Vec::new(),
            last_search_direction: SearchDirection::Forward,
            last_find: None,
            message: None,
            message_is_error: false,
            top_line: 0,
            text_height: DEFAULT_TEXT_HEIGHT,
            drag_origin: None,
            last_click: None,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Direct buffer access for the host (loading, renaming). Edits made
    /// here bypass undo.
    pub const fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor.position()
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn cursor_shape(&self) -> CursorShape {
        if self.prompt.is_some() {
            CursorShape::Bar
        } else {
            self.mode.cursor_shape()
        }
    }

    /// The visual selection, when in a visual mode.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        match self.mode {
            Mode::Visual(kind) => self.cursor.selection(kind),
            _ => None,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    #[must_use]
    pub const fn marks(&self) -> &Marks {
        &self.marks
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn message_is_error(&self) -> bool {
        self.message_is_error
    }

    #[must_use]
    pub const fn top_line(&self) -> usize {
        self.top_line
    }

    /// Tell the editor which rows are on screen. Mouse rows are relative to
    /// `top_line`, and the cursor is kept inside `text_height` rows.
    pub fn set_viewport(&mut self, top_line: usize, text_height: usize) {
        self.top_line = top_line.min(self.buffer.len().saturating_sub(1));
        self.text_height = text_height.max(1);
    }

    /// The host wrote the buffer out.
    pub fn mark_saved(&mut self) {
        self.buffer.mark_saved();
        let name = self.buffer.filename().unwrap_or("[No Name]");
        let msg = format!("\"{name}\" {}L written", self.buffer.len());
        self.set_message(msg);
    }

    // ── Rendering queries ───────────────────────────────────────────────

    /// Highlight classes for row `line` with the visual selection laid on
    /// top. Empty for a row outside the buffer.
    #[must_use]
    pub fn render_row(&self, line: usize) -> Vec<HighlightClass> {
        let Some(row) = self.buffer.row(line) else {
            return Vec::new();
        };
        let mut hl = row.hl().to_vec();
        if let Some(sel) = self.selection() {
            if let Some((first, last)) = sel.columns_on(line, &self.buffer) {
                syntax::overlay_selection(&mut hl, first..last + 1);
            }
        }
        hl
    }

    /// The bottom line: the open prompt with its prefix, else the last
    /// message, else nothing.
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.prompt {
            Some(Prompt::Search(state)) => {
                format!("{}{}", state.prefix(), String::from_utf8_lossy(state.input()))
            }
            Some(Prompt::Command { line, .. }) => format!(":{}", line.input()),
            None => self.message.clone().unwrap_or_default(),
        }
    }

    // ── Event entry point ───────────────────────────────────────────────

    /// Process one event.
    pub fn handle_event(&mut self, event: &Event) -> Action {
        self.handle_event_at(event, Instant::now())
    }

    /// Process one event that arrived at `now` (double clicks compare
    /// press times).
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> Action {
        let action = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse, now);
                Action::Continue
            }
            Event::Paste(bytes) => {
                self.handle_paste(bytes);
                Action::Continue
            }
        };
        self.cursor.clamp(&self.buffer, self.mode.cursor_past_end());
        self.buffer.set_search_cursor(self.cursor.position());
        self.scroll_to_cursor();
        action
    }

    pub(crate) fn handle_key(&mut self, key: &KeyEvent) -> Action {
        trace!(code = ?key.code, modifiers = ?key.modifiers, mode = %self.mode, "key");
        if self.prompt.is_some() {
            return self.handle_prompt(key);
        }
        match self.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::Insert => self.handle_insert(key),
            Mode::Visual(kind) => self.handle_visual(key, kind),
        }
    }

    /// Scroll so the cursor row is on screen.
    fn scroll_to_cursor(&mut self) {
        let line = self.cursor.line();
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + self.text_height {
            self.top_line = line + 1 - self.text_height;
        }
    }

    // ── Messages ────────────────────────────────────────────────────────

    pub(crate) fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_is_error = false;
    }

    pub(crate) fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_is_error = true;
    }

    pub(crate) fn clear_message(&mut self) {
        self.message = None;
        self.message_is_error = false;
    }

    /// Show a refused buffer mutation.
    pub(crate) fn report(&mut self, err: EditError) {
        warn!(%err, "edit rejected");
        self.set_error(err.to_string());
    }

    // ── Count accumulation ──────────────────────────────────────────────

    /// Take the count, `None` when no digit was pressed.
    pub(crate) const fn take_raw_count(&mut self) -> Option<usize> {
        self.count.take()
    }

    /// Take the count as a repeat multiplier (default 1).
    pub(crate) fn take_count(&mut self) -> usize {
        self.count.take().unwrap_or(1)
    }

    pub(crate) fn push_count_digit(&mut self, digit: u8) {
        let current = self.count.unwrap_or(0);
        self.count = Some(current.saturating_mul(10).saturating_add(usize::from(digit)));
    }

    /// Feed a count digit if `key` is one. `0` only extends a count that
    /// already started, since a bare `0` is a motion.
    pub(crate) fn accept_count_digit(&mut self, key: &KeyEvent) -> bool {
        match key.printable() {
            Some(d @ '1'..='9') => {
                self.push_count_digit(d as u8 - b'0');
                true
            }
            Some('0') if self.count.is_some() => {
                self.push_count_digit(0);
                true
            }
            _ => false,
        }
    }

    /// `2d3w` deletes six words: counts on both sides multiply.
    pub(crate) const fn merge_counts(a: Option<usize>, b: Option<usize>) -> Option<usize> {
        match (a, b) {
            (Some(x), Some(y)) => Some(x.saturating_mul(y)),
            (Some(x), None) | (None, Some(x)) => Some(x),
            (None, None) => None,
        }
    }

    /// Drop every half-typed command.
    pub(crate) fn cancel_pending(&mut self) {
        self.pending = None;
        self.count = None;
        self.register = None;
    }

    // ── Shared motion dispatch ──────────────────────────────────────────

    /// Move `cursor` by the motion bound to `code`. Returns `false` when the
    /// key is not a motion or the motion has no target (`%` off a bracket,
    /// `;` with nothing to repeat, a failed search).
    ///
    /// `raw_count` repeats most motions; for `G` and `gg` it is a 1-based
    /// row number. Callers move a clone so operators can compare the
    /// target against the start.
    pub(crate) fn run_motion(
        &mut self,
        cursor: &mut Cursor,
        code: KeyCode,
        raw_count: Option<usize>,
        pe: bool,
    ) -> bool {
        let count = raw_count.unwrap_or(1);
        let buf = &self.buffer;
        match code {
            KeyCode::Char('h') => cursor.move_left(count, buf, pe),
            KeyCode::Char('l') => cursor.move_right(count, buf, pe),
            KeyCode::Left => {
                for _ in 0..count {
                    cursor.arrow_left(buf, pe);
                }
            }
            KeyCode::Right => {
                for _ in 0..count {
                    cursor.arrow_right(buf, pe);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => cursor.move_down(count, buf, pe),
            KeyCode::Char('k') | KeyCode::Up => cursor.move_up(count, buf, pe),
            KeyCode::PageDown => {
                cursor.move_down(count.saturating_mul(self.text_height), buf, pe);
            }
            KeyCode::PageUp => cursor.move_up(count.saturating_mul(self.text_height), buf, pe),

            KeyCode::Char('0') | KeyCode::Home => cursor.move_to_line_start(),
            KeyCode::Char('^') => cursor.move_to_first_non_blank(buf, pe),
            KeyCode::Char('$') | KeyCode::End => {
                cursor.move_down(count.saturating_sub(1), buf, pe);
                cursor.move_to_line_end(buf, pe);
            }

            KeyCode::Char('w') => cursor.word_forward(count, buf, pe),
            KeyCode::Char('b') => cursor.word_backward(count, buf, pe),
            KeyCode::Char('e') => cursor.word_end_forward(count, buf, pe),
            KeyCode::Char('W') => cursor.big_word_forward(count, buf, pe),
            KeyCode::Char('B') => cursor.big_word_backward(count, buf, pe),
            KeyCode::Char('E') => cursor.big_word_end_forward(count, buf, pe),

            // `gg` arrives here as a single 'g' once the pending layer saw
            // both keys.
            KeyCode::Char('g' | 'G') => {
                match raw_count {
                    Some(n) => cursor.goto_line(n.saturating_sub(1), buf, pe),
                    None if code == KeyCode::Char('g') => cursor.move_to_first_line(buf, pe),
                    None => cursor.move_to_last_line(buf, pe),
                }
                cursor.move_to_first_non_blank(buf, pe);
            }
            KeyCode::Char('}') => cursor.paragraph_forward(count, buf),
            KeyCode::Char('{') => cursor.paragraph_backward(count, buf),
            KeyCode::Char('%') => return cursor.matching_bracket(buf),

            KeyCode::Char(c @ (';' | ',')) => {
                let Some(target) = self.last_find else {
                    return false;
                };
                let kind = if c == ';' {
                    FindKind::Forward
                } else {
                    FindKind::Backward
                };
                return cursor.find_char(buf, kind, target, count, pe);
            }
            KeyCode::Char('n') => return self.search_motion(cursor, false, count),
            KeyCode::Char('N') => return self.search_motion(cursor, true, count),

            _ => return false,
        }
        true
    }

    // ── Structural edits (mark-aware) ───────────────────────────────────

    /// Give an empty buffer its first row so typing has somewhere to go.
    pub(crate) fn ensure_row(&mut self) {
        if self.buffer.is_empty() {
            if let Err(e) = self.buffer.insert_row(0, b"") {
                self.report(e);
            }
        }
    }

    pub(crate) fn insert_row(&mut self, at: usize, bytes: &[u8]) -> bool {
        match self.buffer.insert_row(at, bytes) {
            Ok(()) => {
                self.marks.rows_inserted(at, 1);
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    /// Remove `count` rows starting at `at` and return their bytes.
    pub(crate) fn delete_rows(&mut self, at: usize, count: usize) -> Vec<Vec<u8>> {
        let count = count.min(self.buffer.len().saturating_sub(at));
        let removed: Vec<Vec<u8>> = (0..count).filter_map(|_| self.buffer.delete_row(at)).collect();
        self.marks.rows_deleted(at, count);
        removed
    }

    pub(crate) fn split_row(&mut self, row: usize, col: usize) -> bool {
        match self.buffer.split_row(row, col) {
            Ok(()) => {
                self.marks.rows_inserted(row + 1, 1);
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    /// Join row `row + 1` onto `row`; returns the join column.
    pub(crate) fn join_rows(&mut self, row: usize) -> Option<usize> {
        match self.buffer.join_rows(row) {
            Ok(Some(col)) => {
                self.marks.rows_deleted(row + 1, 1);
                Some(col)
            }
            Ok(None) => None,
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    /// Delete an inclusive byte span; returns where the cursor belongs.
    pub(crate) fn delete_span(&mut self, range: Range) -> Position {
        let start = match self.buffer.delete_range(range.start, range.end) {
            Ok(Some(start)) => start,
            Ok(None) => return range.start,
            Err(e) => {
                self.report(e);
                return range.start;
            }
        };
        if range.end.line > range.start.line {
            self.marks
                .rows_deleted(range.start.line + 1, range.end.line - range.start.line);
        }
        start
    }

    /// Insert `text` at `at`; `\n` splits the row. Returns the position just
    /// past the inserted text, or `None` when a cap stopped it.
    pub(crate) fn insert_text(&mut self, at: Position, text: &[u8]) -> Option<Position> {
        self.ensure_row();
        let mut pos = at;
        for (i, piece) in text.split(|&b| b == b'\n').enumerate() {
            if i > 0 {
                if !self.split_row(pos.line, pos.col) {
                    return None;
                }
                pos = Position::new(pos.line + 1, 0);
            }
            if !piece.is_empty() {
                if let Err(e) = self.buffer.insert_bytes(pos.line, pos.col, piece) {
                    self.report(e);
                    return None;
                }
                pos.col = pos.col.min(self.buffer.row_len(pos.line)) + piece.len();
            }
        }
        Some(pos)
    }

    // ── Undo ────────────────────────────────────────────────────────────

    /// Snapshot before a mutating command.
    pub(crate) fn save_undo(&mut self) {
        self.history
            .save(&self.buffer, self.cursor.position(), &self.marks);
    }

    // ── Mode changes ────────────────────────────────────────────────────

    /// Enter insert mode. `snapshot` is false when the command that led
    /// here already saved one (`c`, `o`), so the whole change undoes at once.
    pub(crate) fn begin_insert(&mut self, snapshot: bool) {
        if snapshot {
            self.save_undo();
        }
        self.ensure_row();
        self.cursor.clear_anchor();
        self.mode = Mode::Insert;
    }

    /// Back to normal mode from insert: an unchanged session leaves no undo
    /// step, and the cursor steps back onto the last typed character.
    pub(crate) fn leave_insert(&mut self) {
        self.history.discard_unchanged(&self.buffer);
        self.mode = Mode::Normal;
        self.cursor.move_left(1, &self.buffer, true);
        self.cursor.clamp(&self.buffer, false);
    }

    pub(crate) fn enter_visual(&mut self, kind: VisualKind) {
        self.cursor.set_anchor();
        self.mode = Mode::Visual(kind);
    }

    pub(crate) fn leave_visual(&mut self) {
        self.cursor.clear_anchor();
        self.mode = Mode::Normal;
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Test support ───────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Once;

    use tracing_subscriber::EnvFilter;
    use v_editor::buffer::Buffer;
    use v_input::{Event, KeyCode, KeyEvent, Modifiers};

    use super::{Action, Editor};

    /// Route `tracing` output through the test harness. `RUST_LOG` picks
    /// the level; nothing is printed by default.
    pub fn init_logging() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        });
    }

    pub fn press(ch: char) -> Event {
        Event::char(ch)
    }

    pub fn esc() -> Event {
        Event::key(KeyCode::Escape)
    }

    pub fn enter() -> Event {
        Event::key(KeyCode::Enter)
    }

    pub fn backspace() -> Event {
        Event::key(KeyCode::Backspace)
    }

    pub fn ctrl(ch: char) -> Event {
        Event::ctrl(ch)
    }

    pub fn shift(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, Modifiers::SHIFT))
    }

    pub fn feed(editor: &mut Editor, events: &[Event]) -> Action {
        let mut last = Action::Continue;
        for e in events {
            last = editor.handle_event(e);
        }
        last
    }

    /// Type a key string: `\x1b` is Escape, `\n` is Return, anything else
    /// is a printable key.
    pub fn keys(editor: &mut Editor, text: &str) -> Action {
        let events: Vec<Event> = text
            .chars()
            .map(|c| match c {
                '\x1b' => esc(),
                '\n' => enter(),
                c => press(c),
            })
            .collect();
        feed(editor, &events)
    }

    pub fn editor_with(lines: &[&str]) -> Editor {
        init_logging();
        Editor::with_buffer(Buffer::from_lines(lines))
    }

    pub fn lines(editor: &Editor) -> Vec<String> {
        editor
            .buffer()
            .rows()
            .iter()
            .map(|r| String::from_utf8_lossy(r.bytes()).into_owned())
            .collect()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
