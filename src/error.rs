//! Error types for swenv
//!
//! All modules use `SwenvResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for swenv operations
pub type SwenvResult<T> = Result<T, SwenvError>;

/// All errors that can occur in swenv
#[derive(Error, Debug)]
pub enum SwenvError {
    // Environment errors
    #[error("Unrecognized architecture: {0:?}")]
    UnrecognizedArchitecture(String),

    #[error("{what} not found: {location}")]
    ToolNotFound { what: String, location: String },

    #[error("Unsupported platform: {0}. swenv only configures Windows sessions.")]
    UnsupportedPlatform(String),

    // Collaborator errors
    #[error("Failed to fetch or extract {archive}: {reason}")]
    DownloadOrExtract { archive: String, reason: String },

    #[error("Failed to map {drive} to {target}: {reason}")]
    AliasCreation {
        drive: String,
        target: PathBuf,
        reason: String,
    },

    #[error("{0} does not configure a session")]
    NotAnEnvironmentCommand(String),

    #[error("Developer shell activation failed: {0}")]
    ShellActivation(String),

    // Path errors
    #[error("Cannot join an empty list of path segments")]
    EmptyPath,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SwenvError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a tool-not-found error
    pub fn tool_not_found(what: impl Into<String>, location: impl Into<String>) -> Self {
        Self::ToolNotFound {
            what: what.into(),
            location: location.into(),
        }
    }

    /// Create a download/extract error
    pub fn download(archive: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DownloadOrExtract {
            archive: archive.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnrecognizedArchitecture(_) => {
                Some("Pass --host-arch/--arch explicitly (amd64 or arm64)")
            }
            Self::ToolNotFound { .. } => Some(
                "Install Visual Studio with the C++ workload and the Windows SDK",
            ),
            Self::AliasCreation { .. } => Some("Remove a stale mapping with: subst <drive>: /D"),
            Self::UnsupportedPlatform(_) => Some("Run swenv from a Windows shell"),
            _ => None,
        }
    }
}
