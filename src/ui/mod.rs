//! Status output on stderr
//!
//! Stdout carries the script the calling shell evaluates, so every
//! human-facing line goes to stderr. Colors and glyphs are used only when
//! stderr is an interactive terminal.

mod context;
mod output;

pub use context::UiContext;
pub use output::{intro, key_value, step_ok, step_ok_detail, step_warn, usage_hint};
