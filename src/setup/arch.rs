//! Architecture name mapping
//!
//! Windows reports the host as `AMD64` or `ARM64` in
//! `PROCESSOR_ARCHITECTURE`. Visual Studio wants `amd64`/`arm64`, CMake
//! release archives are named `x86_64`/`arm64`.

use crate::error::{SwenvError, SwenvResult};
use crate::session::SessionEnv;

/// Variable carrying the host architecture token
pub const HOST_ARCH_VAR: &str = "PROCESSOR_ARCHITECTURE";

/// Recognized hardware architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    /// Parse a raw architecture token
    pub fn parse(raw: &str) -> SwenvResult<Self> {
        if raw.eq_ignore_ascii_case("AMD64") {
            Ok(Self::Amd64)
        } else if raw.eq_ignore_ascii_case("ARM64") {
            Ok(Self::Arm64)
        } else {
            Err(SwenvError::UnrecognizedArchitecture(raw.to_string()))
        }
    }

    /// Name in the Visual Studio developer-shell vocabulary
    pub fn build_tool_name(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }

    /// Name in the CMake release-archive vocabulary
    pub fn package_name(self) -> &'static str {
        match self {
            Self::Amd64 => "x86_64",
            Self::Arm64 => "arm64",
        }
    }
}

/// Map a host token to the developer-shell name (`amd64`/`arm64`)
pub fn build_tool_arch(raw: &str) -> SwenvResult<&'static str> {
    Arch::parse(raw).map(Arch::build_tool_name)
}

/// Map a host token to the CMake archive name (`x86_64`/`arm64`)
pub fn package_arch(raw: &str) -> SwenvResult<&'static str> {
    Arch::parse(raw).map(Arch::package_name)
}

/// Raw host token from the session; empty when unset
pub fn host_token(env: &SessionEnv) -> &str {
    env.get(HOST_ARCH_VAR).unwrap_or_default()
}
