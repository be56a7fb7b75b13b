//! # v-editor: editing core for vedit
//!
//! Everything that inspects or mutates text lives here. The modal
//! dispatcher in the `vedit` crate drives these pieces:
//!
//! - **[`position`]**: `Position` (line, col) and inclusive `Range`, 0-indexed
//! - **[`buffer`]**: `Buffer`, a vector of byte rows with capacity caps,
//!   dirty counter, and incremental highlighting
//! - **[`syntax`]**: the built-in language table and per-byte classifier
//! - **[`history`]**: snapshot undo/redo
//! - **[`mode`]**: `Normal`, `Insert`, and the two visual shapes
//! - **[`cursor`]**: cursor movement with a sticky column, and `Selection`
//! - **[`word`]**, **[`motion`]**, **[`text_object`]**: pure position math
//! - **[`register`]**, **[`marks`]**: yank storage and named positions
//! - **[`search`]**: literal search and the search prompt state
//! - **[`command`]**, **[`options`]**: the `:` command line and `:set`
//! - **[`error`]**: `EditError` and `CommandError`

pub mod buffer;
pub mod command;
pub mod cursor;
pub mod error;
pub mod history;
pub mod marks;
pub mod mode;
pub mod motion;
pub mod options;
pub mod position;
pub mod register;
pub mod search;
pub mod syntax;
pub mod text_object;
pub mod word;
