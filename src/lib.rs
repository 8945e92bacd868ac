//! swenv - Swift toolchain developer environments on Windows
//!
//! Computes PATH, INCLUDE, SDKROOT and CMAKE_ROOT for a shell session and
//! prepares the machine (pinned CMake, source drive alias) for building and
//! debugging the toolchain.

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod session;
pub mod setup;
pub mod ui;

pub use error::{SwenvError, SwenvResult};
