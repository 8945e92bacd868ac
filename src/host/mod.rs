//! Host collaborator abstraction
//!
//! Everything that touches the machine outside the session table goes
//! through [`Host`]: HTTP download, archive extraction, drive substitution,
//! the Visual Studio locator, the registry and developer-shell activation.
//! [`SystemHost`] implements it with real processes; tests use a recording
//! fake.

#[cfg(test)]
pub(crate) mod fake;
mod system;

pub use system::{parse_reg_query, parse_set_output, SystemHost};

use crate::error::SwenvResult;
use crate::session::SessionEnv;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Parameters for entering a Visual Studio developer shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevShellRequest {
    /// Visual Studio installation root
    pub installation_path: PathBuf,

    /// `VsDevCmd.bat` under the installation
    pub script: PathBuf,

    /// Target architecture (`-arch=`)
    pub arch: String,

    /// Remaining developer-shell arguments
    pub arguments: Vec<String>,
}

impl DevShellRequest {
    /// Argument string as passed to the developer shell
    pub fn argument_string(&self) -> String {
        self.arguments.join(" ")
    }
}

/// Abstract machine interface
#[async_trait]
pub trait Host: Send + Sync {
    /// Check whether a file, directory or drive root exists
    fn path_exists(&self, path: &Path) -> bool;

    /// Download `url` to `dest`
    async fn download(&self, url: &str, dest: &Path) -> SwenvResult<()>;

    /// Extract an archive into `dest`
    async fn extract(&self, archive: &Path, dest: &Path) -> SwenvResult<()>;

    /// Delete a file
    async fn remove_file(&self, path: &Path) -> SwenvResult<()>;

    /// Map a drive letter (`S:`) to a directory
    async fn create_alias(&self, drive: &str, target: &Path) -> SwenvResult<()>;

    /// Run the installation locator and return its JSON output
    async fn query_installations(&self, locator: &Path) -> SwenvResult<String>;

    /// Read a string value from the registry; `None` when key or value is absent
    async fn registry_value(&self, key: &str, value: &str) -> SwenvResult<Option<String>>;

    /// Enter the developer shell from `env` and return the resulting variables
    async fn activate_dev_shell(
        &self,
        env: &SessionEnv,
        request: &DevShellRequest,
    ) -> SwenvResult<Vec<(String, String)>>;
}
