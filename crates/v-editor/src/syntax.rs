//! Per-row syntax classification.
//!
//! Every byte of a row gets a [`HighlightClass`]. The classifier is a single
//! left-to-right scan over the row, seeded with whether the previous row left
//! a block comment open. It returns the same flag for the end of this row, and
//! [`Buffer`](crate::buffer::Buffer) uses it to propagate comment state
//! forward until it stops changing.
//!
//! Rule priority at each byte:
//!
//! | # | Rule |
//! |---|------|
//! | 1 | line-comment token (outside strings and block comments) → rest of row |
//! | 2 | inside block comment → until end token; block start token opens one |
//! | 3 | inside string → until matching quote, `\` escapes; `"`/`'` opens one |
//! | 4 | digit (or `.` + digit) at a separator boundary → number run |
//! | 5 | keyword at a separator boundary, followed by separator or row end |
//! | 6 | normal byte; updates the separator flag |
//!
//! Search matches and the visual selection are overlays applied on top by
//! [`overlay_matches`] and [`overlay_selection`].

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Highlight classes
// ---------------------------------------------------------------------------

/// Semantic category of a byte, for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum HighlightClass {
    #[default]
    Normal = 0,
    Comment,
    BlockComment,
    /// Primary keyword tier (control flow, declarations).
    Keyword1,
    /// Secondary keyword tier (types).
    Keyword2,
    String,
    Number,
    /// Search match.
    Match,
    /// The search match under the cursor.
    MatchActive,
    Visual,
}

impl HighlightClass {
    /// Stable numeric id for renderers that index color tables.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// True for the two comment classes.
    #[inline]
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::Comment | Self::BlockComment)
    }
}

// ---------------------------------------------------------------------------
// Syntax definitions
// ---------------------------------------------------------------------------

bitflags! {
    /// Optional highlighting features of a language.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SyntaxFlags: u8 {
        const NUMBERS = 0b01;
        const STRINGS = 0b10;
    }
}

/// A language definition.
///
/// Keywords ending in `|` belong to the secondary tier; the bar is not part
/// of the keyword. Empty comment tokens disable that comment kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxDef {
    pub name: &'static str,
    /// Patterns starting with `.` match the file extension, others match as a
    /// substring of the file name.
    pub filematch: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub line_comment: &'static str,
    pub block_start: &'static str,
    pub block_end: &'static str,
    pub flags: SyntaxFlags,
}

const ALL: SyntaxFlags = SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS);

/// Built-in language database.
pub static SYNTAXES: &[SyntaxDef] = &[
    SyntaxDef {
        name: "c",
        filematch: &[".c", ".h", ".cpp"],
        keywords: &[
            "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
            "union", "typedef", "static", "enum", "class", "case", "int|", "long|", "double|",
            "float|", "char|", "unsigned|", "signed|", "void|",
        ],
        line_comment: "//",
        block_start: "/*",
        block_end: "*/",
        flags: ALL,
    },
    SyntaxDef {
        name: "rust",
        filematch: &[".rs"],
        keywords: &[
            "fn", "let", "mut", "if", "else", "match", "impl", "struct", "enum", "use", "pub",
            "for", "while", "loop", "return", "mod", "trait", "where", "const", "static",
            "String|", "Vec|", "Option|", "Result|", "usize|", "u8|", "i32|", "bool|", "str|",
        ],
        line_comment: "//",
        block_start: "/*",
        block_end: "*/",
        flags: ALL,
    },
    SyntaxDef {
        name: "go",
        filematch: &[".go"],
        keywords: &[
            "package", "import", "func", "type", "struct", "interface", "if", "else", "for",
            "range", "return", "switch", "case", "defer", "go", "var", "const", "map|",
            "string|", "int|", "bool|", "error|", "byte|",
        ],
        line_comment: "//",
        block_start: "/*",
        block_end: "*/",
        flags: ALL,
    },
    SyntaxDef {
        name: "python",
        filematch: &[".py"],
        keywords: &[
            "def", "class", "if", "elif", "else", "for", "while", "return", "import", "from",
            "with", "as", "pass", "None|", "True|", "False|", "self|",
        ],
        line_comment: "#",
        block_start: "",
        block_end: "",
        flags: ALL,
    },
];

/// Pick a syntax definition for `filename`.
#[must_use]
pub fn find_syntax(filename: &str) -> Option<&'static SyntaxDef> {
    let ext = filename.rfind('.').map(|i| &filename[i..]);
    SYNTAXES.iter().find(|def| {
        def.filematch.iter().any(|pat| {
            if pat.starts_with('.') {
                ext == Some(*pat)
            } else {
                filename.contains(pat)
            }
        })
    })
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Separator bytes for keyword and number boundaries.
#[inline]
#[must_use]
pub const fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace()
        || b == 0
        || b == 0x0b
        || matches!(
            b,
            b',' | b'.' | b'(' | b')' | b'+' | b'-' | b'/' | b'*' | b'=' | b'~' | b'%' | b'<'
                | b'>' | b'[' | b']' | b';'
        )
}

/// Classify `bytes` into `hl` (resized to match) and return whether a block
/// comment is still open at the end of the row.
///
/// `open_in` is the previous row's exit flag. Without a definition every byte
/// is [`HighlightClass::Normal`] and the flag is always `false`.
pub fn highlight_line(
    def: Option<&SyntaxDef>,
    bytes: &[u8],
    open_in: bool,
    hl: &mut Vec<HighlightClass>,
) -> bool {
    hl.clear();
    hl.resize(bytes.len(), HighlightClass::Normal);
    let Some(def) = def else {
        return false;
    };

    let lc = def.line_comment.as_bytes();
    let bs = def.block_start.as_bytes();
    let be = def.block_end.as_bytes();
    let has_block = !bs.is_empty() && !be.is_empty();

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = has_block && open_in;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let rest = &bytes[i..];
        let prev_hl = if i > 0 { hl[i - 1] } else { HighlightClass::Normal };

        // 1. Line comment.
        if !lc.is_empty() && in_string.is_none() && !in_comment && rest.starts_with(lc) {
            hl[i..].fill(HighlightClass::Comment);
            break;
        }

        // 2. Block comment.
        if has_block && in_string.is_none() {
            if in_comment {
                if rest.starts_with(be) {
                    hl[i..i + be.len()].fill(HighlightClass::BlockComment);
                    i += be.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    hl[i] = HighlightClass::BlockComment;
                    i += 1;
                }
                continue;
            }
            if rest.starts_with(bs) {
                hl[i..i + bs.len()].fill(HighlightClass::BlockComment);
                i += bs.len();
                in_comment = true;
                continue;
            }
        }

        // 3. Strings.
        if def.flags.contains(SyntaxFlags::STRINGS) {
            if let Some(quote) = in_string {
                hl[i] = HighlightClass::String;
                if c == b'\\' && i + 1 < bytes.len() {
                    hl[i + 1] = HighlightClass::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            }
            if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = HighlightClass::String;
                i += 1;
                continue;
            }
        }

        // 4. Numbers.
        if def.flags.contains(SyntaxFlags::NUMBERS) {
            let next_is_digit = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            let starts = prev_sep && (c.is_ascii_digit() || (c == b'.' && next_is_digit));
            let continues = prev_hl == HighlightClass::Number
                && (c.is_ascii_digit() || (c == b'.' && next_is_digit));
            if starts || continues {
                hl[i] = HighlightClass::Number;
                i += 1;
                prev_sep = false;
                continue;
            }
        }

        // 5. Keywords.
        if prev_sep {
            if let Some((len, class)) = match_keyword(def, rest) {
                hl[i..i + len].fill(class);
                i += len;
                prev_sep = false;
                continue;
            }
        }

        // 6. Normal.
        prev_sep = is_separator(c);
        i += 1;
    }

    in_comment
}

/// Try every keyword at the start of `rest`. Returns the keyword length and
/// its tier class.
fn match_keyword(def: &SyntaxDef, rest: &[u8]) -> Option<(usize, HighlightClass)> {
    def.keywords.iter().find_map(|kw| {
        let (word, class) = kw.strip_suffix('|').map_or(
            (*kw, HighlightClass::Keyword1),
            |w| (w, HighlightClass::Keyword2),
        );
        let word = word.as_bytes();
        let bounded = rest.get(word.len()).is_none_or(|&b| is_separator(b));
        (rest.starts_with(word) && bounded).then_some((word.len(), class))
    })
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

/// Mark every literal occurrence of `pattern` in `bytes` (overlapping
/// occurrences included). The occurrence containing `active_col` becomes
/// [`HighlightClass::MatchActive`].
pub fn overlay_matches(
    bytes: &[u8],
    hl: &mut [HighlightClass],
    pattern: &[u8],
    active_col: Option<usize>,
) {
    if pattern.is_empty() || pattern.len() > bytes.len() {
        return;
    }
    for start in 0..=bytes.len() - pattern.len() {
        if !bytes[start..].starts_with(pattern) {
            continue;
        }
        let end = start + pattern.len();
        let active = active_col.is_some_and(|c| (start..end).contains(&c));
        for class in &mut hl[start..end] {
            if active {
                *class = HighlightClass::MatchActive;
            } else if *class != HighlightClass::MatchActive {
                *class = HighlightClass::Match;
            }
        }
    }
}

/// Mark the byte span `cols` (clamped to the row) as selected.
pub fn overlay_selection(hl: &mut [HighlightClass], cols: std::ops::Range<usize>) {
    let end = cols.end.min(hl.len());
    if cols.start < end {
        hl[cols.start..end].fill(HighlightClass::Visual);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
