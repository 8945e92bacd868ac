//! CLI command implementations

pub mod config;
pub mod environment;

pub use config::execute as config;
pub use environment::execute as environment;
