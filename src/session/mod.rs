//! Session environment and script emission

pub mod env;
pub mod script;

pub use env::{SessionEnv, LIST_SEPARATOR};
pub use script::{render_script, Shell};
