//! Command-line mode: the `:` prompt.
//!
//! | Command              | Action                                      |
//! |----------------------|---------------------------------------------|
//! | `:w`                 | Ask the host to write the buffer            |
//! | `:q`                 | Quit (refused when the buffer is modified)  |
//! | `:q!` `:qa!`         | Quit, discarding changes                    |
//! | `:wq` `:x`           | Write, then quit                            |
//! | `:N`                 | Go to row N (1-based, clamped)              |
//! | `:$`                 | Go to the last row                          |
//! | `:s/pat/rep/[g]`     | Substitute on the cursor row                |
//! | `:%s/pat/rep/[g]`    | Substitute on every row                     |
//! | `:set ...`           | Change or query options                     |
//! | `:noh`               | Hide search highlighting until next search  |
//!
//! The substitute pattern is a regular expression. Any byte may serve as the
//! delimiter (`:s#a/b#c#`); a backslash before the delimiter makes it
//! literal. In the replacement, `&` and `\0` insert the whole match,
//! `\1`–`\9` insert groups, and `\&` / `\\` are literal.

use std::ops::RangeInclusive;

use regex::bytes::{Captures, Regex};
use tracing::debug;

use crate::buffer::Buffer;
use crate::error::CommandError;
use crate::options::{self, SetDirective};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed `:s` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitute {
    /// `%` prefix: every row instead of the cursor row.
    pub all_rows: bool,
    pub pattern: String,
    pub replacement: String,
    /// `g` flag: every match on a row, not only the first.
    pub global: bool,
}

/// A parsed command-line command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank input: nothing to do.
    Empty,
    Write,
    Quit {
        force: bool,
    },
    WriteQuit,
    /// `:N`, 1-based.
    Goto(usize),
    GotoLast,
    Substitute(Substitute),
    Set(Vec<SetDirective>),
    NoHighlight,
    Unknown(String),
}

impl Command {
    /// Parse command text (without the leading `:`).
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidSubstitute`] when an `s` command has no
    /// pattern. Anything unrecognized parses to [`Command::Unknown`], which
    /// the dispatcher reports.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let cmd = input.trim();
        if cmd.is_empty() {
            return Ok(Self::Empty);
        }

        let (all_rows, rest) = cmd
            .strip_prefix('%')
            .map_or((false, cmd), |rest| (true, rest));
        if let Some(body) = rest.strip_prefix('s') {
            // `:set`, `:smagic`-style words are not substitutions.
            if body.chars().next().is_some_and(|c| !c.is_ascii_alphanumeric()) {
                return parse_substitute(all_rows, body).map(Self::Substitute);
            }
        }

        let (name, args) = cmd
            .split_once(char::is_whitespace)
            .map_or((cmd, ""), |(n, a)| (n, a.trim_start()));

        Ok(match name {
            "w" => Self::Write,
            "q" | "qa" => Self::Quit { force: false },
            "q!" | "qa!" => Self::Quit { force: true },
            "wq" | "x" => Self::WriteQuit,
            "$" => Self::GotoLast,
            "set" | "se" => Self::Set(options::parse_set(args)),
            "noh" | "nohlsearch" => Self::NoHighlight,
            _ => match cmd.parse::<usize>() {
                Ok(n) => Self::Goto(n),
                Err(_) => Self::Unknown(cmd.to_string()),
            },
        })
    }
}

/// Parse everything after the `s`.
fn parse_substitute(all_rows: bool, body: &str) -> Result<Substitute, CommandError> {
    let mut chars = body.chars();
    let delim = chars.next().ok_or(CommandError::InvalidSubstitute)?;
    let mut parts: Vec<String> = vec![String::new()];
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) if next == delim => push_char(&mut parts, next),
                Some(next) => {
                    push_char(&mut parts, '\\');
                    push_char(&mut parts, next);
                }
                None => push_char(&mut parts, '\\'),
            },
            c if c == delim => parts.push(String::new()),
            c => push_char(&mut parts, c),
        }
    }

    let mut parts = parts.into_iter();
    let pattern = parts.next().unwrap_or_default();
    if pattern.is_empty() {
        return Err(CommandError::InvalidSubstitute);
    }
    let replacement = parts.next().unwrap_or_default();
    let flags = parts.next().unwrap_or_default();
    Ok(Substitute {
        all_rows,
        pattern,
        replacement,
        global: flags.contains('g'),
    })
}

fn push_char(parts: &mut [String], c: char) {
    if let Some(last) = parts.last_mut() {
        last.push(c);
    }
}

// ---------------------------------------------------------------------------
// Substitution
// ---------------------------------------------------------------------------

impl Substitute {
    /// Rows this substitution covers, given the cursor row.
    #[must_use]
    pub fn rows(&self, buf: &Buffer, cursor_line: usize) -> RangeInclusive<usize> {
        if self.all_rows {
            0..=buf.len().saturating_sub(1)
        } else {
            cursor_line..=cursor_line
        }
    }

    /// Replace matches on `rows`. Returns the number of replacements.
    ///
    /// The caller snapshots for undo first; on error the buffer may have
    /// been partly rewritten only if a row hit the length cap.
    ///
    /// # Errors
    ///
    /// [`CommandError::BadPattern`] for an invalid regex,
    /// [`CommandError::PatternNotFound`] when nothing matched,
    /// [`CommandError::Edit`] when a rewritten row exceeds the row cap.
    pub fn apply(&self, buf: &mut Buffer, rows: RangeInclusive<usize>) -> Result<usize, CommandError> {
        let re = Regex::new(&self.pattern).map_err(|e| {
            debug!(error = %e, "bad substitute pattern");
            CommandError::BadPattern(self.pattern.clone())
        })?;
        let limit = if self.global { 0 } else { 1 };
        let rep = self.replacement.as_bytes();

        let mut total = 0;
        for row in rows {
            if row >= buf.len() {
                break;
            }
            let line = buf.line(row);
            let hits = re.find_iter(line).count();
            if hits == 0 {
                continue;
            }
            let out = re
                .replacen(line, limit, |caps: &Captures<'_>| expand(caps, rep))
                .into_owned();
            total += if self.global { hits } else { 1 };
            buf.set_row(row, out)?;
        }

        if total == 0 {
            return Err(CommandError::PatternNotFound(self.pattern.clone()));
        }
        debug!(total, pattern = %self.pattern, "substitute");
        Ok(total)
    }
}

/// Expand `&`, `\0`–`\9`, `\&`, `\\` in a replacement.
fn expand(caps: &Captures<'_>, rep: &[u8]) -> Vec<u8> {
    let group = |n: usize| caps.get(n).map_or(&[][..], |m| m.as_bytes());
    let mut out = Vec::with_capacity(rep.len());
    let mut i = 0;
    while i < rep.len() {
        match rep[i] {
            b'&' => out.extend_from_slice(group(0)),
            b'\\' if i + 1 < rep.len() => {
                i += 1;
                match rep[i] {
                    d @ b'0'..=b'9' => out.extend_from_slice(group(usize::from(d - b'0'))),
                    b'n' => out.push(b'\n'),
                    b't' => out.push(b'\t'),
                    other => out.push(other),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// CommandLine
// ---------------------------------------------------------------------------

/// The `:` input buffer. The leading `:` is not stored.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    input: String,
}

impl CommandLine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: String::new(),
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    /// Delete the last character. Returns `false` when already empty.
    pub fn backspace(&mut self) -> bool {
        self.input.pop().is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Parse the input.
    ///
    /// # Errors
    ///
    /// See [`Command::parse`].
    pub fn parse(&self) -> Result<Command, CommandError> {
        Command::parse(&self.input)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sub(all_rows: bool, pattern: &str, replacement: &str, global: bool) -> Command {
        Command::Substitute(Substitute {
            all_rows,
            pattern: pattern.into(),
            replacement: replacement.into(),
            global,
        })
    }

    fn lines(buf: &Buffer) -> Vec<String> {
        buf.rows()
            .iter()
            .map(|r| String::from_utf8_lossy(r.bytes()).into_owned())
            .collect()
    }

    // -- parsing ------------------------------------------------------------

    #[test]
    fn parse_quit_and_write() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit { force: false }));
        assert_eq!(Command::parse("q!"), Ok(Command::Quit { force: true }));
        assert_eq!(Command::parse("qa!"), Ok(Command::Quit { force: true }));
        assert_eq!(Command::parse("w"), Ok(Command::Write));
        assert_eq!(Command::parse(" wq "), Ok(Command::WriteQuit));
        assert_eq!(Command::parse("x"), Ok(Command::WriteQuit));
        assert_eq!(Command::parse(""), Ok(Command::Empty));
    }

    #[test]
    fn parse_goto() {
        assert_eq!(Command::parse("42"), Ok(Command::Goto(42)));
        assert_eq!(Command::parse("$"), Ok(Command::GotoLast));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            Command::parse("frobnicate"),
            Ok(Command::Unknown("frobnicate".into()))
        );
        assert_eq!(Command::parse("-3"), Ok(Command::Unknown("-3".into())));
    }

    #[test]
    fn parse_set_and_noh() {
        assert_eq!(
            Command::parse("set ts=2"),
            Ok(Command::Set(vec![SetDirective::Assign("ts".into(), "2".into())]))
        );
        assert_eq!(Command::parse("noh"), Ok(Command::NoHighlight));
    }

    #[test]
    fn parse_substitute_forms() {
        assert_eq!(Command::parse("s/a/b/"), Ok(sub(false, "a", "b", false)));
        assert_eq!(Command::parse("%s/a/b/g"), Ok(sub(true, "a", "b", true)));
        assert_eq!(Command::parse("s/a/b"), Ok(sub(false, "a", "b", false)));
        assert_eq!(Command::parse("s/a"), Ok(sub(false, "a", "", false)));
        assert_eq!(Command::parse("s#x/y#z#"), Ok(sub(false, "x/y", "z", false)));
    }

    #[test]
    fn escaped_delimiter_is_literal() {
        assert_eq!(Command::parse(r"s/a\/b/c/"), Ok(sub(false, "a/b", "c", false)));
        // Other escapes reach the regex untouched.
        assert_eq!(Command::parse(r"s/\d+/N/"), Ok(sub(false, r"\d+", "N", false)));
    }

    #[test]
    fn empty_substitute_pattern_is_invalid() {
        assert_eq!(Command::parse("s//x/"), Err(CommandError::InvalidSubstitute));
    }

    // -- applying -----------------------------------------------------------

    #[test]
    fn substitute_first_or_all() {
        let mut buf = Buffer::from_lines(&["a a a", "a"]);
        let Ok(Command::Substitute(s)) = Command::parse("s/a/b/") else {
            panic!("expected substitute");
        };
        let rows = s.rows(&buf, 0);
        assert_eq!(s.apply(&mut buf, rows), Ok(1));
        assert_eq!(lines(&buf), vec!["b a a", "a"]);

        let Ok(Command::Substitute(s)) = Command::parse("%s/a/c/g") else {
            panic!("expected substitute");
        };
        let rows = s.rows(&buf, 0);
        assert_eq!(s.apply(&mut buf, rows), Ok(3));
        assert_eq!(lines(&buf), vec!["b c c", "c"]);
    }

    #[test]
    fn substitute_groups_and_ampersand() {
        let mut buf = Buffer::from_lines(&["key=value"]);
        let Ok(Command::Substitute(s)) = Command::parse(r"s/(\w+)=(\w+)/\2=\1 [&]/") else {
            panic!("expected substitute");
        };
        s.apply(&mut buf, 0..=0).unwrap();
        assert_eq!(lines(&buf), vec!["value=key [key=value]"]);
    }

    #[test]
    fn substitute_reports_missing_pattern() {
        let mut buf = Buffer::from_lines(&["abc"]);
        let Ok(Command::Substitute(s)) = Command::parse("s/zzz/y/") else {
            panic!("expected substitute");
        };
        assert_eq!(
            s.apply(&mut buf, 0..=0),
            Err(CommandError::PatternNotFound("zzz".into()))
        );
        assert!(!buf.is_dirty());
    }

    #[test]
    fn substitute_rejects_bad_regex() {
        let mut buf = Buffer::from_lines(&["abc"]);
        let Ok(Command::Substitute(s)) = Command::parse("s/(/y/") else {
            panic!("expected substitute");
        };
        assert_eq!(
            s.apply(&mut buf, 0..=0),
            Err(CommandError::BadPattern("(".into()))
        );
    }

    // -- input buffer -------------------------------------------------------

    #[test]
    fn command_line_editing() {
        let mut cl = CommandLine::new();
        for c in "wq".chars() {
            cl.push(c);
        }
        assert_eq!(cl.input(), "wq");
        assert_eq!(cl.parse(), Ok(Command::WriteQuit));
        assert!(cl.backspace());
        assert!(cl.backspace());
        assert!(!cl.backspace());
        assert!(cl.is_empty());
    }
}
