//! Configuration schema for swenv
//!
//! Configuration is stored at `~/.config/swenv/config.toml` (or the
//! platform config directory, `%APPDATA%\swenv\config.toml` on Windows).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pinned CMake release
    pub cmake: CmakeConfig,

    /// Source-tree drive alias
    pub drive: DriveConfig,

    /// Toolchain layout defaults
    pub toolchain: ToolchainConfig,

    /// Visual Studio developer-shell defaults
    pub vs: VsConfig,
}

/// CMake release configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmakeConfig {
    /// Major.minor version
    pub version: String,

    /// Patch number
    pub patch: u32,

    /// Release download base URL
    pub download_base: String,
}

impl Default for CmakeConfig {
    fn default() -> Self {
        Self {
            version: "3.29".to_string(),
            patch: 2,
            download_base: "https://github.com/Kitware/CMake/releases/download".to_string(),
        }
    }
}

/// Drive alias configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Drive letter mapped onto the source tree
    pub letter: String,
}

impl DriveConfig {
    /// Drive designator, e.g. `S:`
    pub fn drive(&self) -> String {
        format!("{}:", self.letter.trim_end_matches(':'))
    }

    /// Root of the mapped drive, e.g. `S:\`
    pub fn root(&self) -> PathBuf {
        PathBuf::from(format!("{}\\", self.drive()))
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            letter: "S".to_string(),
        }
    }
}

/// Toolchain layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Default target architecture for repro/bootstrap sessions
    pub target_arch: String,

    /// Pinned bootstrap release
    pub bootstrap_version: String,

    /// Compiler executable to strip from PATH
    pub compiler: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            target_arch: "amd64".to_string(),
            bootstrap_version: "6.1.2".to_string(),
            compiler: "swift.exe".to_string(),
        }
    }
}

/// Visual Studio defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VsConfig {
    /// Windows SDK version (`-winsdk=`)
    pub sdk_version: Option<String>,

    /// MSVC toolset version (`-vcvars_ver=`)
    pub toolset_version: Option<String>,
}
