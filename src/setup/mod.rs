//! Session setup operations
//!
//! Each operation mutates a caller-owned [`SessionEnv`](crate::session::SessionEnv)
//! in call order. Nothing is rolled back: when an operation fails, the
//! mutations already applied stay in the session.

pub mod arch;
pub mod cmake;
pub mod drive;
pub mod msvc;
pub mod paths;
pub mod toolchain;

pub use arch::{build_tool_arch, package_arch, Arch};
pub use cmake::{initialize_cmake_environment, CmakeOptions};
pub use drive::initialize_drive_alias;
pub use msvc::{initialize_vs_environment, rewrite_sdk_includes, VsOptions};
pub use paths::path_join;
pub use toolchain::{
    initialize_bootstrap_environment, initialize_build_environment,
    initialize_repro_environment, ToolchainLayout,
};
