//! # vedit: modal editing core
//!
//! The [`Editor`] is the whole dispatcher: a host owns one, feeds it logical
//! input events and draws what it exposes.
//!
//! ```text
//!   input collaborator → Event → Editor::handle_event → Action
//!                                   │
//!                                   ├─ mode dispatch (normal / insert / visual)
//!                                   ├─ prompts (/ ? :) and mouse
//!                                   └─ v-editor: buffer, cursor, history, ...
//!
//!   render collaborator ← buffer rows + Editor::render_row + status_line
//! ```
//!
//! The host handles what the core never touches: terminal setup, raw byte
//! decoding, drawing, and file I/O. `Action::Write` asks it to persist
//! [`Buffer::to_bytes`](v_editor::buffer::Buffer::to_bytes) and then call
//! [`Editor::mark_saved`].
//!
//! Logging goes through `tracing`; install a subscriber in the host to see
//! it.

mod editor;
mod insert;
mod mouse;
mod normal;
mod ops;
mod prompt;
mod visual;

pub use editor::{Action, Editor};

pub use v_editor;
pub use v_input;
