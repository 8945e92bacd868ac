//! CMake environment
//!
//! Keeps one pinned CMake release under the per-user programs directory and
//! exposes it through PATH and CMAKE_ROOT.

use crate::config::CmakeConfig;
use crate::error::{SwenvError, SwenvResult};
use crate::host::Host;
use crate::session::SessionEnv;
use crate::setup::arch::{host_token, package_arch};
use crate::setup::paths::path_join;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which CMake release to provide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmakeOptions {
    /// Major.minor version, e.g. `3.29`
    pub version: String,

    /// Patch number
    pub patch: u32,

    /// Release download base URL
    pub download_base: String,
}

impl CmakeOptions {
    /// Full release number, e.g. `3.29.2`
    pub fn release(&self) -> String {
        format!("{}.{}", self.version, self.patch)
    }

    /// Installation directory / archive stem for an architecture
    pub fn package_name(&self, pkg_arch: &str) -> String {
        format!("cmake-{}-windows-{}", self.release(), pkg_arch)
    }

    pub fn download_url(&self, pkg_arch: &str) -> String {
        format!(
            "{}/v{}/{}.zip",
            self.download_base.trim_end_matches('/'),
            self.release(),
            self.package_name(pkg_arch)
        )
    }
}

impl Default for CmakeOptions {
    fn default() -> Self {
        Self::from(&CmakeConfig::default())
    }
}

impl From<&CmakeConfig> for CmakeOptions {
    fn from(config: &CmakeConfig) -> Self {
        Self {
            version: config.version.clone(),
            patch: config.patch,
            download_base: config.download_base.clone(),
        }
    }
}

/// Per-user programs directory (`%LOCALAPPDATA%\Programs`)
pub fn programs_dir(env: &SessionEnv) -> SwenvResult<PathBuf> {
    let local = env
        .get_nonempty("LOCALAPPDATA")
        .map(PathBuf::from)
        .or_else(dirs::data_local_dir)
        .ok_or_else(|| SwenvError::tool_not_found("Local application data", "LOCALAPPDATA"))?;
    path_join([local, PathBuf::from("Programs")])
}

/// Scratch directory for downloads
pub fn temp_dir(env: &SessionEnv) -> PathBuf {
    env.get_nonempty("TEMP")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

/// Ensure the CMake release is installed, then put it on PATH and set
/// CMAKE_ROOT. Returns the installation directory.
///
/// PATH is prepended on every call; calling this twice leaves two entries.
pub async fn initialize_cmake_environment(
    env: &mut SessionEnv,
    host: &dyn Host,
    options: &CmakeOptions,
) -> SwenvResult<PathBuf> {
    let pkg_arch = package_arch(host_token(env))?;
    let name = options.package_name(pkg_arch);
    let programs = programs_dir(env)?;
    let install_dir = path_join([programs.clone(), PathBuf::from(&name)])?;

    if host.path_exists(&install_dir) {
        debug!("CMake already installed at {}", install_dir.display());
    } else {
        let url = options.download_url(pkg_arch);
        let archive = path_join([temp_dir(env), PathBuf::from(format!("{}.zip", name))])?;

        host.download(&url, &archive).await?;
        host.extract(&archive, &programs).await?;
        host.remove_file(&archive).await?;
        info!("Installed CMake {} to {}", options.release(), install_dir.display());
    }

    let bin = path_join([install_dir.as_path(), Path::new("bin")])?;
    let module_root = path_join([
        install_dir.clone(),
        PathBuf::from("share"),
        PathBuf::from(format!("cmake-{}", options.version)),
    ])?;

    env.prepend_path(&[bin]);
    env.set("CMAKE_ROOT", module_root.display().to_string());

    Ok(install_dir)
}
