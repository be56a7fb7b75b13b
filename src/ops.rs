//! Operators and the buffer edits behind normal- and visual-mode commands.
//!
//! An operator (`d`, `c`, `y`, `>`, `<`) always ends up as a [`Span`]:
//! motions are turned into one by [`Editor::motion_span`], text objects and
//! visual selections produce one directly. [`Editor::apply_operator`] is the
//! single place that acts on it.

use tracing::debug;

use v_editor::buffer::{next_boundary, prev_boundary};
use v_editor::position::{Position, Range};
use v_editor::register::RegisterKind;
use v_editor::word;
use v_input::KeyCode;

use crate::editor::{Editor, MotionKind, Span, motion_kind};

pub(crate) const fn swap_case(b: u8) -> u8 {
    if b.is_ascii_lowercase() {
        b.to_ascii_uppercase()
    } else {
        b.to_ascii_lowercase()
    }
}

/// Rows of line-wise text: one per `\n`-terminated line.
fn text_rows(text: &[u8]) -> impl Iterator<Item = &[u8]> {
    text.strip_suffix(b"\n")
        .unwrap_or(text)
        .split(|&b| b == b'\n')
}

impl Editor {
    // ── Spans ───────────────────────────────────────────────────────────

    /// Last byte of the character at `pos` (or `pos` itself past the row end).
    fn char_end(&self, pos: Position) -> Position {
        let bytes = self.buffer.line(pos.line);
        if pos.col < bytes.len() {
            pos.with_col(next_boundary(bytes, pos.col) - 1)
        } else {
            pos
        }
    }

    /// The span an operator covers when the cursor moves from `start` to
    /// `target`. `None` for an exclusive motion that went nowhere.
    ///
    /// Exclusive spans stop one byte short of the far end. When that end is
    /// column 0 of a later row the span stops at the end of the row before
    /// it, so `dw` on the last word of a row leaves the next row alone.
    pub(crate) fn motion_span(
        &self,
        start: Position,
        target: Position,
        kind: MotionKind,
    ) -> Option<Span> {
        match kind {
            MotionKind::Linewise => Some(Span::Lines(
                start.line.min(target.line),
                start.line.max(target.line),
            )),
            MotionKind::Inclusive => {
                let r = Range::ordered(start, target);
                Some(Span::Chars(Range::new(r.start, self.char_end(r.end))))
            }
            MotionKind::Exclusive => {
                if target == start {
                    return None;
                }
                let r = Range::ordered(start, target);
                let end = if r.end.col > 0 {
                    r.end.with_col(r.end.col - 1)
                } else if r.end.line > r.start.line {
                    let line = r.end.line - 1;
                    Position::new(line, self.buffer.row_len(line))
                } else {
                    return None;
                };
                (end >= r.start).then_some(Span::Chars(Range::new(r.start, end)))
            }
        }
    }

    /// Text covered by `span`, ready for a register.
    pub(crate) fn span_text(&self, span: Span) -> (Vec<u8>, RegisterKind) {
        let mut out = Vec::new();
        if self.buffer.is_empty() {
            return (out, RegisterKind::Char);
        }
        let last_row = self.buffer.len() - 1;
        match span {
            Span::Lines(first, last) => {
                for row in first..=last.min(last_row) {
                    out.extend_from_slice(self.buffer.line(row));
                    out.push(b'\n');
                }
                (out, RegisterKind::Line)
            }
            Span::Chars(r) => {
                for row in r.start.line..=r.end.line.min(last_row) {
                    let bytes = self.buffer.line(row);
                    let from = if row == r.start.line { r.start.col } else { 0 };
                    let to = if row == r.end.line {
                        r.end.col.saturating_add(1)
                    } else {
                        bytes.len()
                    };
                    let to = to.min(bytes.len());
                    if row > r.start.line {
                        out.push(b'\n');
                    }
                    if from < to {
                        out.extend_from_slice(&bytes[from..to]);
                    }
                }
                (out, RegisterKind::Char)
            }
        }
    }

    /// Store `span` in the selected register (unnamed by default).
    fn yank_span(&mut self, span: Span) {
        let (text, kind) = self.span_text(span);
        let name = self.register.take();
        debug!(len = text.len(), ?kind, register = ?name.map(char::from), "yank");
        self.registers.yank(name, text, kind);
    }

    // ── Operator entry points ───────────────────────────────────────────

    /// Operator followed by a motion key.
    pub(crate) fn operate_motion(&mut self, op: char, code: KeyCode, raw_count: Option<usize>) {
        let kind = if code == KeyCode::Char('g') {
            Some(MotionKind::Linewise)
        } else {
            motion_kind(code)
        };
        let Some(kind) = kind else {
            self.cancel_pending();
            return;
        };

        // `cw` on a word changes to the end of that word, not up to the
        // next one.
        if op == 'c' {
            if let KeyCode::Char(w @ ('w' | 'W')) = code {
                if let Some(end) = self.change_word_end(w == 'W', raw_count.unwrap_or(1)) {
                    let span = Range::new(self.cursor.position(), self.char_end(end));
                    self.apply_operator(op, Span::Chars(span));
                    return;
                }
            }
        }

        let mut cursor = self.cursor.clone();
        if !self.run_motion(&mut cursor, code, raw_count, true) {
            self.register = None;
            return;
        }
        self.operate_to(op, cursor.position(), kind);
    }

    fn change_word_end(&self, big: bool, count: usize) -> Option<Position> {
        let mut end = word::run_end(&self.buffer, self.cursor.position(), big)?;
        let step = if big {
            word::big_word_end_forward
        } else {
            word::word_end_forward
        };
        for _ in 1..count {
            end = step(&self.buffer, end);
        }
        Some(end)
    }

    /// Operator from the cursor to an already-computed target.
    pub(crate) fn operate_to(&mut self, op: char, target: Position, kind: MotionKind) {
        match self.motion_span(self.cursor.position(), target, kind) {
            Some(span) => self.apply_operator(op, span),
            None => self.register = None,
        }
    }

    /// `dd`, `yy`, `cc`, `>>`, `<<`: `count` rows from the cursor.
    pub(crate) fn operate_lines(&mut self, op: char, count: usize) {
        if self.buffer.is_empty() {
            if op == 'c' {
                self.begin_insert(true);
            }
            return;
        }
        let first = self.cursor.line();
        let last = first
            .saturating_add(count.max(1) - 1)
            .min(self.buffer.len() - 1);
        self.apply_operator(op, Span::Lines(first, last));
    }

    /// Run operator `op` over `span`.
    pub(crate) fn apply_operator(&mut self, op: char, span: Span) {
        debug!(op = %op, ?span, "operator");
        match op {
            'y' => {
                self.yank_span(span);
                match span {
                    Span::Chars(r) => self.cursor.set_position(r.start, &self.buffer, false),
                    Span::Lines(first, _) => {
                        if self.cursor.line() > first {
                            self.cursor.goto_line(first, &self.buffer, false);
                        }
                    }
                }
            }
            'd' => {
                self.save_undo();
                self.yank_span(span);
                self.remove_span(span);
                self.history.discard_unchanged(&self.buffer);
            }
            'c' => {
                self.save_undo();
                self.yank_span(span);
                self.change_span(span);
            }
            '>' | '<' => {
                let (first, last) = span.rows();
                self.shift_rows(first, last, op == '>');
            }
            _ => {}
        }
    }

    fn remove_span(&mut self, span: Span) {
        match span {
            Span::Chars(range) => {
                let at = self.delete_span(range);
                self.cursor.set_position(at, &self.buffer, false);
            }
            Span::Lines(first, last) => {
                let removed = self.delete_rows(first, last - first + 1);
                self.ensure_row();
                self.cursor.goto_line(first, &self.buffer, false);
                self.cursor.move_to_first_non_blank(&self.buffer, false);
                if removed.len() >= 3 {
                    self.set_message(format!("{} fewer lines", removed.len()));
                }
            }
        }
    }

    /// Delete for `c`, then insert mode in the gap. Line spans keep one
    /// empty row to type into.
    fn change_span(&mut self, span: Span) {
        match span {
            Span::Chars(range) => {
                let at = self.delete_span(range);
                self.cursor.set_position(at, &self.buffer, true);
            }
            Span::Lines(first, last) => {
                if last > first {
                    self.delete_rows(first + 1, last - first);
                }
                if let Err(e) = self.buffer.set_row(first, Vec::new()) {
                    self.report(e);
                }
                self.cursor.set_position(Position::new(first, 0), &self.buffer, true);
            }
        }
        self.begin_insert(false);
    }

    // ── Character edits ─────────────────────────────────────────────────

    /// End byte offset after stepping over `count` characters from `col`,
    /// stopping at the row end.
    fn chars_end(bytes: &[u8], col: usize, count: usize) -> usize {
        let mut end = col;
        for _ in 0..count.max(1) {
            if end >= bytes.len() {
                break;
            }
            end = next_boundary(bytes, end);
        }
        end
    }

    /// `x` / Delete: `count` characters under and after the cursor.
    pub(crate) fn delete_chars(&mut self, count: usize) {
        let pos = self.cursor.position();
        let bytes = self.buffer.line(pos.line);
        if pos.col >= bytes.len() {
            self.register = None;
            return;
        }
        let end = Self::chars_end(bytes, pos.col, count);
        self.apply_operator('d', Span::Chars(Range::new(pos, pos.with_col(end - 1))));
    }

    /// `~`: flip the case of `count` characters and step past them.
    pub(crate) fn toggle_case(&mut self, count: usize) {
        let pos = self.cursor.position();
        let bytes = self.buffer.line(pos.line);
        if pos.col >= bytes.len() {
            return;
        }
        let end = Self::chars_end(bytes, pos.col, count);
        let mut row = bytes.to_vec();
        for b in &mut row[pos.col..end] {
            *b = swap_case(*b);
        }
        self.save_undo();
        if let Err(e) = self.buffer.set_row(pos.line, row) {
            self.report(e);
        }
        self.history.discard_unchanged(&self.buffer);
        self.cursor.set_position(pos.with_col(end), &self.buffer, false);
    }

    /// `r`: overwrite `count` characters with `ch`. Nothing happens when the
    /// row has fewer than `count` characters left.
    pub(crate) fn replace_chars(&mut self, ch: char, count: usize) {
        let pos = self.cursor.position();
        let bytes = self.buffer.line(pos.line);
        let count = count.max(1);
        let mut end = pos.col;
        for _ in 0..count {
            if end >= bytes.len() {
                return;
            }
            end = next_boundary(bytes, end);
        }

        let mut enc = [0u8; 4];
        let with = ch.encode_utf8(&mut enc).as_bytes();
        let mut row = bytes[..pos.col].to_vec();
        for _ in 0..count {
            row.extend_from_slice(with);
        }
        row.extend_from_slice(&bytes[end..]);

        self.save_undo();
        if let Err(e) = self.buffer.set_row(pos.line, row) {
            self.history.discard_unchanged(&self.buffer);
            self.report(e);
            return;
        }
        let last = pos.col + (count - 1) * with.len();
        self.cursor.set_position(pos.with_col(last), &self.buffer, false);
    }

    /// Apply a byte mapping to every byte of `span` (visual `u`, `U`, `~`).
    pub(crate) fn transform_span(&mut self, span: Span, f: fn(u8) -> u8) {
        if self.buffer.is_empty() {
            return;
        }
        let (first, last) = span.rows();
        self.save_undo();
        for row in first..=last.min(self.buffer.len() - 1) {
            let mut bytes = self.buffer.line(row).to_vec();
            let (from, to) = match span {
                Span::Chars(r) => (
                    if row == r.start.line { r.start.col } else { 0 },
                    if row == r.end.line {
                        r.end.col.saturating_add(1)
                    } else {
                        bytes.len()
                    },
                ),
                Span::Lines(..) => (0, bytes.len()),
            };
            let to = to.min(bytes.len());
            let from = from.min(to);
            for b in &mut bytes[from..to] {
                *b = f(*b);
            }
            if let Err(e) = self.buffer.set_row(row, bytes) {
                self.report(e);
                break;
            }
        }
        self.history.discard_unchanged(&self.buffer);
    }

    // ── Paste ───────────────────────────────────────────────────────────

    /// `p` / `P`. Line-wise text opens rows below or above the cursor row;
    /// character text goes after or before the cursor character.
    pub(crate) fn paste(&mut self, after: bool, count: usize) {
        let reg = self.registers.get(self.register.take()).clone();
        if reg.is_empty() {
            self.set_error("Nothing in register");
            return;
        }
        self.save_undo();
        self.ensure_row();
        let count = count.max(1);
        let line = self.cursor.line();

        if reg.is_linewise() {
            let at = if after { line + 1 } else { line };
            let mut next = at;
            'paste: for _ in 0..count {
                for row in reg.lines() {
                    if !self.insert_row(next, row) {
                        break 'paste;
                    }
                    next += 1;
                }
            }
            debug!(rows = next - at, "paste lines");
            self.cursor.goto_line(at, &self.buffer, false);
            self.cursor.move_to_first_non_blank(&self.buffer, false);
        } else {
            let bytes = self.buffer.line(line);
            let col = self.cursor.col();
            let col = if after && col < bytes.len() {
                next_boundary(bytes, col)
            } else {
                col.min(bytes.len())
            };
            let at = Position::new(line, col);
            let text = reg.content().repeat(count);
            debug!(len = text.len(), "paste");
            if let Some(end) = self.insert_text(at, &text) {
                if text.contains(&b'\n') {
                    self.cursor.set_position(at, &self.buffer, false);
                } else {
                    let last = prev_boundary(self.buffer.line(end.line), end.col);
                    self.cursor.set_position(end.with_col(last), &self.buffer, false);
                }
            }
        }
        self.history.discard_unchanged(&self.buffer);
    }

    /// Replace `span` with `text` (visual `p`, or a paste event over a
    /// selection). The replaced text goes to the unnamed register.
    pub(crate) fn replace_span(&mut self, span: Span, text: &[u8], linewise: bool) {
        if self.buffer.is_empty() {
            return;
        }
        self.save_undo();
        let (old, kind) = self.span_text(span);
        self.registers.yank(None, old, kind);

        match (span, linewise) {
            (Span::Lines(first, last), true) => {
                self.delete_rows(first, last - first + 1);
                let mut at = first;
                for row in text_rows(text) {
                    if !self.insert_row(at, row) {
                        break;
                    }
                    at += 1;
                }
                self.ensure_row();
                self.cursor.goto_line(first, &self.buffer, false);
                self.cursor.move_to_first_non_blank(&self.buffer, false);
            }
            (Span::Lines(first, last), false) => {
                self.delete_rows(first, last - first + 1);
                if self.insert_row(first, b"") {
                    self.insert_text(Position::new(first, 0), text);
                }
                self.cursor.set_position(Position::new(first, 0), &self.buffer, false);
            }
            (Span::Chars(range), true) => {
                let at = self.delete_span(range);
                if self.split_row(at.line, at.col) {
                    let mut row_at = at.line + 1;
                    for row in text_rows(text) {
                        if !self.insert_row(row_at, row) {
                            break;
                        }
                        row_at += 1;
                    }
                }
                self.cursor.goto_line(at.line + 1, &self.buffer, false);
                self.cursor.move_to_first_non_blank(&self.buffer, false);
            }
            (Span::Chars(range), false) => {
                let at = self.delete_span(range);
                if let Some(end) = self.insert_text(at, text) {
                    let last = prev_boundary(self.buffer.line(end.line), end.col);
                    self.cursor.set_position(end.with_col(last), &self.buffer, false);
                }
            }
        }
        self.history.discard_unchanged(&self.buffer);
    }

    // ── Row edits ───────────────────────────────────────────────────────

    /// `J`: pull `joins` following rows onto `line`. Leading blanks of each
    /// joined row are dropped and one space separates the parts, unless the
    /// left side is empty or already ends in a blank, or nothing is left of
    /// the right side.
    pub(crate) fn join_lines(&mut self, line: usize, joins: usize) {
        if line + 1 >= self.buffer.len() {
            return;
        }
        self.save_undo();
        let mut col = self.buffer.row_len(line);
        for _ in 0..joins.max(1) {
            if line + 1 >= self.buffer.len() {
                break;
            }
            let current = self.buffer.line(line);
            let next = self.buffer.line(line + 1);
            let rest = &next[next.iter().take_while(|&&b| word::is_blank(b)).count()..];
            let space = !current.is_empty()
                && !current.last().is_some_and(|&b| word::is_blank(b))
                && !rest.is_empty();

            let mut joined = current.to_vec();
            col = joined.len();
            if space {
                joined.push(b' ');
            }
            joined.extend_from_slice(rest);
            if let Err(e) = self.buffer.set_row(line, joined) {
                self.report(e);
                break;
            }
            self.delete_rows(line + 1, 1);
        }
        self.cursor.set_position(Position::new(line, col), &self.buffer, false);
        self.history.discard_unchanged(&self.buffer);
    }

    /// `>` / `<` over rows `first..=last`. Indenting prefixes every row,
    /// empty ones included; outdenting removes one tab or up to `shiftwidth` spaces.
    pub(crate) fn shift_rows(&mut self, first: usize, last: usize, indent: bool) {
        if self.buffer.is_empty() {
            return;
        }
        let last = last.min(self.buffer.len() - 1);
        let width = self.options.shift_width;
        self.save_undo();

        for row in first..=last {
            let bytes = self.buffer.line(row);
            let shifted = if indent {
                let mut out = vec![b' '; width];
                out.extend_from_slice(bytes);
                out
            } else {
                let strip = if bytes.first() == Some(&b'\t') {
                    1
                } else {
                    bytes.iter().take(width).take_while(|&&b| b == b' ').count()
                };
                if strip == 0 {
                    continue;
                }
                bytes[strip..].to_vec()
            };
            if let Err(e) = self.buffer.set_row(row, shifted) {
                self.history.discard_unchanged(&self.buffer);
                self.report(e);
                return;
            }
        }
        self.history.discard_unchanged(&self.buffer);

        self.cursor.goto_line(first, &self.buffer, false);
        self.cursor.move_to_first_non_blank(&self.buffer, false);
        let rows = last + 1 - first;
        let what = if indent { "indented" } else { "outdented" };
        if rows == 1 {
            self.set_message(format!("1 line {what}"));
        } else {
            self.set_message(format!("{rows} lines {what}"));
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use v_editor::mode::Mode;
    use v_editor::position::Position;

    use crate::editor::testing::*;

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    // ── Delete ──────────────────────────────────────────────────────────

    #[test]
    fn dw_deletes_to_next_word() {
        let mut ed = editor_with(&["foo bar baz"]);
        keys(&mut ed, "dw");
        assert_eq!(lines(&ed), vec!["bar baz"]);
        assert_eq!(ed.registers().unnamed().content(), b"foo ");
    }

    #[test]
    fn dw_on_last_word_keeps_next_row() {
        let mut ed = editor_with(&["foo bar", "next"]);
        keys(&mut ed, "wdw");
        assert_eq!(lines(&ed), vec!["foo ", "next"]);
    }

    #[test]
    fn de_and_db() {
        let mut ed = editor_with(&["alpha beta"]);
        keys(&mut ed, "de");
        assert_eq!(lines(&ed), vec![" beta"]);
        keys(&mut ed, "$db");
        assert_eq!(lines(&ed), vec![" a"]);
    }

    #[test]
    fn d_dollar_and_big_d() {
        let mut ed = editor_with(&["keep this", "and this"]);
        keys(&mut ed, "4ld$");
        assert_eq!(lines(&ed), vec!["keep", "and this"]);
        assert_eq!(ed.cursor(), p(0, 3));
        keys(&mut ed, "jwD");
        assert_eq!(lines(&ed), vec!["keep", "and "]);
    }

    #[test]
    fn dd_with_count_and_message() {
        let mut ed = editor_with(&["1", "2", "3", "4", "5"]);
        keys(&mut ed, "j3dd");
        assert_eq!(lines(&ed), vec!["1", "5"]);
        assert_eq!(ed.cursor(), p(1, 0));
        assert_eq!(ed.message(), Some("3 fewer lines"));
        assert!(ed.registers().unnamed().is_linewise());
        assert_eq!(ed.registers().unnamed().content(), b"2\n3\n4\n");
    }

    #[test]
    fn dd_on_last_row_leaves_one_empty_row() {
        let mut ed = editor_with(&["only"]);
        keys(&mut ed, "dd");
        assert_eq!(lines(&ed), vec![""]);
        keys(&mut ed, "u");
        assert_eq!(lines(&ed), vec!["only"]);
    }

    #[test]
    fn dj_and_dk_are_linewise() {
        let mut ed = editor_with(&["a", "b", "c", "d"]);
        keys(&mut ed, "jdj");
        assert_eq!(lines(&ed), vec!["a", "d"]);
        keys(&mut ed, "dk");
        assert_eq!(lines(&ed), vec![""]);
    }

    #[test]
    fn dgg_and_dg() {
        let mut ed = editor_with(&["a", "b", "c", "d"]);
        keys(&mut ed, "jjdgg");
        assert_eq!(lines(&ed), vec!["d"]);
        let mut ed = editor_with(&["a", "b", "c"]);
        keys(&mut ed, "jdG");
        assert_eq!(lines(&ed), vec!["a"]);
    }

    #[test]
    fn delete_with_find_motions() {
        let mut ed = editor_with(&["call(a, b)"]);
        keys(&mut ed, "dt(");
        assert_eq!(lines(&ed), vec!["(a, b)"]);
        keys(&mut ed, "df,");
        assert_eq!(lines(&ed), vec![" b)"]);
    }

    #[test]
    fn delete_to_bracket_match() {
        let mut ed = editor_with(&["x(a(b)c)y"]);
        keys(&mut ed, "ld%");
        assert_eq!(lines(&ed), vec!["xy"]);
    }

    #[test]
    fn x_with_count_and_utf8() {
        let mut ed = editor_with(&["héllo"]);
        keys(&mut ed, "l2x");
        assert_eq!(lines(&ed), vec!["hlo"]);
        assert_eq!(ed.registers().unnamed().content(), "él".as_bytes());
        keys(&mut ed, "$x");
        assert_eq!(lines(&ed), vec!["hl"]);
        assert_eq!(ed.cursor(), p(0, 1));
    }

    #[test]
    fn x_on_empty_row_is_noop() {
        let mut ed = editor_with(&[""]);
        keys(&mut ed, "x");
        assert!(!ed.buffer().is_dirty());
    }

    #[test]
    fn text_objects_with_operators() {
        let mut ed = editor_with(&["say \"hello there\" now"]);
        keys(&mut ed, "fhdi\"");
        assert_eq!(lines(&ed), vec!["say \"\" now"]);
        let mut ed = editor_with(&["f(a, (b), c)"]);
        keys(&mut ed, "fada(");
        assert_eq!(lines(&ed), vec!["f"]);
        let mut ed = editor_with(&["one two three"]);
        keys(&mut ed, "wdaw");
        assert_eq!(lines(&ed), vec!["one three"]);
    }

    // ── Change ──────────────────────────────────────────────────────────

    #[test]
    fn cw_changes_to_word_end() {
        let mut ed = editor_with(&["foo bar"]);
        keys(&mut ed, "cwbaz\x1b");
        assert_eq!(lines(&ed), vec!["baz bar"]);
        assert_eq!(ed.mode(), Mode::Normal);
        keys(&mut ed, "u");
        assert_eq!(lines(&ed), vec!["foo bar"]);
    }

    #[test]
    fn c2w_spans_two_words() {
        let mut ed = editor_with(&["a.b c"]);
        keys(&mut ed, "c2wX\x1b");
        assert_eq!(lines(&ed), vec!["Xb c"]);
        keys(&mut ed, "0c2WY\x1b");
        assert_eq!(lines(&ed), vec!["Y"]);
    }

    #[test]
    fn cc_keeps_an_empty_row() {
        let mut ed = editor_with(&["a", "b", "c"]);
        keys(&mut ed, "j2ccnew\x1b");
        assert_eq!(lines(&ed), vec!["a", "new"]);
    }

    #[test]
    fn big_c_changes_to_end() {
        let mut ed = editor_with(&["keep drop"]);
        keys(&mut ed, "wCgone\x1b");
        assert_eq!(lines(&ed), vec!["keep gone"]);
    }

    #[test]
    fn ciw_scenario() {
        let mut ed = editor_with(&["let value = 1;"]);
        keys(&mut ed, "wciwname\x1b");
        assert_eq!(lines(&ed), vec!["let name = 1;"]);
        assert_eq!(ed.registers().unnamed().content(), b"value");
    }

    // ── Yank and paste ──────────────────────────────────────────────────

    #[test]
    fn yank_word_then_paste_on_empty_row() {
        let mut ed = editor_with(&["hello", ""]);
        keys(&mut ed, "ye");
        assert_eq!(ed.registers().unnamed().content(), b"hello");
        keys(&mut ed, "jp");
        assert_eq!(lines(&ed), vec!["hello", "hello"]);
        assert_eq!(ed.cursor(), p(1, 4));
    }

    #[test]
    fn yank_does_not_modify() {
        let mut ed = editor_with(&["abc", "def"]);
        keys(&mut ed, "jykyyy$");
        assert_eq!(ed.cursor(), p(0, 0));
        assert!(!ed.buffer().is_dirty());
        assert_eq!(ed.registers().unnamed().content(), b"abc");
    }

    #[test]
    fn yy_p_and_big_p() {
        let mut ed = editor_with(&["one", "two"]);
        keys(&mut ed, "yyjp");
        assert_eq!(lines(&ed), vec!["one", "two", "one"]);
        assert_eq!(ed.cursor(), p(2, 0));
        keys(&mut ed, "ggP");
        assert_eq!(lines(&ed), vec!["one", "one", "two", "one"]);
        assert_eq!(ed.cursor(), p(0, 0));
    }

    #[test]
    fn paste_with_count() {
        let mut ed = editor_with(&["ab"]);
        keys(&mut ed, "yl3p");
        assert_eq!(lines(&ed), vec!["aaaab"]);
        assert_eq!(ed.cursor(), p(0, 3));
        keys(&mut ed, "Y2P");
        assert_eq!(lines(&ed), vec!["aaaab", "aaaab", "aaaab"]);
    }

    #[test]
    fn paste_empty_register_errors() {
        let mut ed = editor_with(&["x"]);
        keys(&mut ed, "p");
        assert_eq!(ed.message(), Some("Nothing in register"));
        assert!(!ed.buffer().is_dirty());
    }

    #[test]
    fn multi_row_char_paste() {
        let mut ed = editor_with(&["ab", "cd", "XY"]);
        keys(&mut ed, "lvjy");
        assert_eq!(ed.registers().unnamed().content(), b"b\ncd");
        keys(&mut ed, "Gp");
        assert_eq!(lines(&ed), vec!["ab", "cd", "Xb", "cdY"]);
        assert_eq!(ed.cursor(), p(2, 1));
    }

    #[test]
    fn uppercase_register_appends() {
        let mut ed = editor_with(&["one", "two"]);
        keys(&mut ed, "\"ayyj\"Ayy");
        assert_eq!(ed.registers().get(Some(b'a')).content(), b"one\ntwo\n");
        keys(&mut ed, "\"ap");
        assert_eq!(lines(&ed), vec!["one", "two", "one", "two"]);
    }

    // ── Join / shift ────────────────────────────────────────────────────

    #[test]
    fn join_strips_indent_and_adds_space() {
        let mut ed = editor_with(&["fn x() {", "    body", "}"]);
        keys(&mut ed, "J");
        assert_eq!(lines(&ed), vec!["fn x() { body", "}"]);
        assert_eq!(ed.cursor(), p(0, 8));
        keys(&mut ed, "u3J");
        assert_eq!(lines(&ed), vec!["fn x() { body }"]);
    }

    #[test]
    fn join_with_empty_sides() {
        let mut ed = editor_with(&["", "a", "b ", "   ", "c"]);
        keys(&mut ed, "J");
        assert_eq!(lines(&ed), vec!["a", "b ", "   ", "c"]);
        keys(&mut ed, "jJ");
        assert_eq!(lines(&ed), vec!["a", "b ", "c"]);
        keys(&mut ed, "J");
        assert_eq!(lines(&ed), vec!["a", "b c"]);
    }

    #[test]
    fn join_on_last_row_is_noop() {
        let mut ed = editor_with(&["a", "b"]);
        keys(&mut ed, "jJ");
        assert_eq!(lines(&ed), vec!["a", "b"]);
        assert!(!ed.buffer().is_dirty());
    }

    #[test]
    fn shift_rows_right_and_left() {
        let mut ed = editor_with(&["a", "", "b"]);
        keys(&mut ed, "3>>");
        assert_eq!(lines(&ed), vec!["    a", "    ", "    b"]);
        assert_eq!(ed.message(), Some("3 lines indented"));
        assert_eq!(ed.cursor(), p(0, 4));
        keys(&mut ed, "<j");
        assert_eq!(lines(&ed), vec!["a", "", "    b"]);
        assert_eq!(ed.message(), Some("2 lines outdented"));
    }

    #[test]
    fn outdent_removes_one_tab_or_partial_spaces() {
        let mut ed = editor_with(&["\t\tx", "  y", "z"]);
        keys(&mut ed, "<<j<<j<<");
        assert_eq!(lines(&ed), vec!["\tx", "y", "z"]);
    }

    #[test]
    fn shift_respects_shiftwidth() {
        let mut ed = editor_with(&["x"]);
        keys(&mut ed, ":set sw=2\n>>");
        assert_eq!(lines(&ed), vec!["  x"]);
        assert_eq!(ed.message(), Some("1 line indented"));
    }
}
