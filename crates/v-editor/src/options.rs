//! Editor options and the `:set` command.
//!
//! | Syntax           | Effect                        |
//! |------------------|-------------------------------|
//! | `:set option`    | Enable boolean / show numeric |
//! | `:set nooption`  | Disable boolean               |
//! | `:set option!`   | Toggle boolean                |
//! | `:set option?`   | Query current value           |
//! | `:set option=N`  | Assign numeric value          |
//! | `:set`           | Show changed options          |
//! | `:set all`       | Show all options              |
//!
//! | Full name    | Abbrev | Type    | Default |
//! |--------------|--------|---------|---------|
//! | `tabstop`    | `ts`   | integer | 4       |
//! | `shiftwidth` | `sw`   | integer | 4       |
//! | `expandtab`  | `et`   | bool    | true    |
//! | `hlsearch`   | `hls`  | bool    | true    |
//! | `wrapscan`   | `ws`   | bool    | true    |
//! | `undolevels` | `ul`   | integer | 1000    |

use crate::error::CommandError;
use crate::history::DEFAULT_UNDO_LEVELS;

// ---------------------------------------------------------------------------
// Directives
// ---------------------------------------------------------------------------

/// One parsed `:set` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    On(String),
    Off(String),
    Toggle(String),
    Query(String),
    Assign(String, String),
    ShowChanged,
    ShowAll,
}

/// Parse everything after `:set`. Several arguments may be given at once.
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return vec![SetDirective::ShowChanged];
    }
    trimmed.split_whitespace().map(parse_set_arg).collect()
}

#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }
    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }
    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }
    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }
    // Only strip "no" when the rest names a boolean, so "nonsense" stays
    // an unknown option rather than turning into Off("nsense").
    if let Some(name) = arg.strip_prefix("no") {
        if matches!(OptionName::parse(name), Some(o) if o.is_bool()) {
            return SetDirective::Off(name.to_string());
        }
    }
    if matches!(OptionName::parse(arg), Some(o) if !o.is_bool()) {
        return SetDirective::Query(arg.to_string());
    }
    SetDirective::On(arg.to_string())
}

// ---------------------------------------------------------------------------
// Option names
// ---------------------------------------------------------------------------

/// A known option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionName {
    TabStop,
    ShiftWidth,
    ExpandTab,
    HlSearch,
    WrapScan,
    UndoLevels,
}

impl OptionName {
    pub const ALL: [Self; 6] = [
        Self::TabStop,
        Self::ShiftWidth,
        Self::ExpandTab,
        Self::HlSearch,
        Self::WrapScan,
        Self::UndoLevels,
    ];

    /// Resolve a full name or abbreviation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "tabstop" | "ts" => Self::TabStop,
            "shiftwidth" | "sw" => Self::ShiftWidth,
            "expandtab" | "et" => Self::ExpandTab,
            "hlsearch" | "hls" => Self::HlSearch,
            "wrapscan" | "ws" => Self::WrapScan,
            "undolevels" | "ul" => Self::UndoLevels,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TabStop => "tabstop",
            Self::ShiftWidth => "shiftwidth",
            Self::ExpandTab => "expandtab",
            Self::HlSearch => "hlsearch",
            Self::WrapScan => "wrapscan",
            Self::UndoLevels => "undolevels",
        }
    }

    #[must_use]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::ExpandTab | Self::HlSearch | Self::WrapScan)
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Runtime option values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub tab_stop: usize,
    pub shift_width: usize,
    pub expand_tab: bool,
    pub hl_search: bool,
    pub wrap_scan: bool,
    pub undo_levels: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tab_stop: 4,
            shift_width: 4,
            expand_tab: true,
            hl_search: true,
            wrap_scan: true,
            undo_levels: DEFAULT_UNDO_LEVELS,
        }
    }
}

impl Options {
    fn get_bool(&self, opt: OptionName) -> bool {
        match opt {
            OptionName::ExpandTab => self.expand_tab,
            OptionName::HlSearch => self.hl_search,
            OptionName::WrapScan => self.wrap_scan,
            _ => false,
        }
    }

    fn set_bool(&mut self, opt: OptionName, value: bool) {
        match opt {
            OptionName::ExpandTab => self.expand_tab = value,
            OptionName::HlSearch => self.hl_search = value,
            OptionName::WrapScan => self.wrap_scan = value,
            _ => {}
        }
    }

    fn get_number(&self, opt: OptionName) -> usize {
        match opt {
            OptionName::TabStop => self.tab_stop,
            OptionName::ShiftWidth => self.shift_width,
            OptionName::UndoLevels => self.undo_levels,
            _ => 0,
        }
    }

    /// `name=value` or `noname`/`name` for display.
    #[must_use]
    pub fn format(&self, opt: OptionName) -> String {
        if opt.is_bool() {
            if self.get_bool(opt) {
                opt.name().to_string()
            } else {
                format!("no{}", opt.name())
            }
        } else {
            format!("{}={}", opt.name(), self.get_number(opt))
        }
    }

    /// Apply one directive. Queries and listings return the text to show.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnknownOption`] for an unrecognized name,
    /// [`CommandError::InvalidValue`] for a value the option cannot take.
    pub fn apply(&mut self, directive: &SetDirective) -> Result<Option<String>, CommandError> {
        let resolve = |name: &str| {
            OptionName::parse(name).ok_or_else(|| CommandError::UnknownOption(name.to_string()))
        };
        match directive {
            SetDirective::ShowAll => Ok(Some(self.listing(|_| true))),
            SetDirective::ShowChanged => {
                let defaults = Self::default();
                Ok(Some(self.listing(|o| self.format(o) != defaults.format(o))))
            }
            SetDirective::Query(name) => Ok(Some(self.format(resolve(name)?))),
            SetDirective::On(name) => {
                let opt = resolve(name)?;
                if opt.is_bool() {
                    self.set_bool(opt, true);
                    Ok(None)
                } else {
                    Ok(Some(self.format(opt)))
                }
            }
            SetDirective::Off(name) | SetDirective::Toggle(name) => {
                let opt = resolve(name)?;
                if !opt.is_bool() {
                    return Err(CommandError::InvalidValue {
                        option: opt.name().to_string(),
                        value: String::new(),
                    });
                }
                let value = matches!(directive, SetDirective::Toggle(_)) && !self.get_bool(opt);
                self.set_bool(opt, value);
                Ok(None)
            }
            SetDirective::Assign(name, value) => {
                let opt = resolve(name)?;
                let invalid = || CommandError::InvalidValue {
                    option: opt.name().to_string(),
                    value: value.clone(),
                };
                let n: usize = value.parse().map_err(|_| invalid())?;
                match opt {
                    OptionName::TabStop if n >= 1 => self.tab_stop = n,
                    OptionName::ShiftWidth if n >= 1 => self.shift_width = n,
                    OptionName::UndoLevels => self.undo_levels = n,
                    _ => return Err(invalid()),
                }
                Ok(None)
            }
        }
    }

    fn listing(&self, include: impl Fn(OptionName) -> bool) -> String {
        OptionName::ALL
            .into_iter()
            .filter(|&o| include(o))
            .map(|o| self.format(o))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
