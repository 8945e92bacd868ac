//! Toolchain build environments
//!
//! `build` prepares a session for compiling the toolchain from source.
//! `repro` and `bootstrap` additionally enter the developer shell and put a
//! specific toolchain layout on PATH: the locally built `0.0.0` install, or
//! a pinned release unpacked under the build cache.

use crate::config::Config;
use crate::error::SwenvResult;
use crate::host::Host;
use crate::session::SessionEnv;
use crate::setup::cmake::{initialize_cmake_environment, CmakeOptions};
use crate::setup::drive::initialize_drive_alias;
use crate::setup::msvc::{initialize_vs_environment, VsOptions};
use crate::setup::paths::path_join;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Version of a toolchain built from source
pub const DEV_VERSION: &str = "0.0.0";

const ASSERTS_VARIANT: &str = "+Asserts";

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

/// Runtime directory paired with a toolchain `bin` directory:
/// `...\Toolchains\6.1.2+Asserts\usr\bin` becomes `...\Runtimes\6.1.2\usr\bin`.
/// `None` when the path has no `Toolchains` component.
pub fn paired_runtime_dir(toolchain_bin: &str) -> Option<String> {
    let mut out = String::with_capacity(toolchain_bin.len());
    let mut replaced = false;
    let mut strip_variant = false;

    for piece in toolchain_bin.split_inclusive(is_separator) {
        let name = piece.trim_end_matches(is_separator);
        let sep = &piece[name.len()..];

        if strip_variant {
            out.push_str(name.split('+').next().unwrap_or(name));
            strip_variant = false;
        } else if !replaced && name.eq_ignore_ascii_case("Toolchains") {
            out.push_str("Runtimes");
            replaced = true;
            strip_variant = true;
        } else {
            out.push_str(name);
        }
        out.push_str(sep);
    }

    replaced.then_some(out)
}

/// Remove a globally installed compiler and its runtime from PATH and clear
/// SDKROOT. Does nothing when `compiler` is not on PATH.
pub fn strip_global_compiler(env: &mut SessionEnv, compiler: &str) {
    let Some((bin_entry, exe)) = env.find_program(compiler) else {
        debug!("No global {} on PATH", compiler);
        return;
    };

    info!("Removing global toolchain {} from the session", exe.display());
    let runtime_entry = paired_runtime_dir(&bin_entry);

    let mut entries = vec![bin_entry.as_str()];
    if let Some(runtime) = runtime_entry.as_deref() {
        entries.push(runtime);
    }
    let removed = env.remove_path_entries(&entries);
    debug!("Removed {} PATH entries", removed);

    if env.remove("SDKROOT").is_some() {
        debug!("Cleared SDKROOT");
    }
}

/// Prepare a session for building the toolchain from `source`.
pub async fn initialize_build_environment(
    env: &mut SessionEnv,
    host: &dyn Host,
    config: &Config,
    source: &Path,
) -> SwenvResult<()> {
    strip_global_compiler(env, &config.toolchain.compiler);
    initialize_cmake_environment(env, host, &CmakeOptions::from(&config.cmake)).await?;
    initialize_drive_alias(env, host, &config.drive, source).await
}

/// On-disk toolchain layout (`Toolchains/`, `Runtimes/`, `Platforms/`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainLayout {
    pub root: PathBuf,
    pub version: String,
}

impl ToolchainLayout {
    /// Locally built toolchain installed under the drive alias
    pub fn repro(drive_root: &Path) -> SwenvResult<Self> {
        Ok(Self {
            root: path_join([drive_root, Path::new("Program Files"), Path::new("Swift")])?,
            version: DEV_VERSION.to_string(),
        })
    }

    /// Pinned release unpacked in the build cache
    pub fn bootstrap(drive_root: &Path, version: &str) -> SwenvResult<Self> {
        let release = format!("swift-{}-RELEASE-windows10", version);
        Ok(Self {
            root: path_join([
                drive_root,
                Path::new("b"),
                Path::new("toolchains"),
                Path::new(&release),
                Path::new("LocalApp"),
                Path::new("Programs"),
                Path::new("Swift"),
            ])?,
            version: version.to_string(),
        })
    }

    pub fn toolchain_bin(&self) -> SwenvResult<PathBuf> {
        let toolchain = format!("{}{}", self.version, ASSERTS_VARIANT);
        path_join([
            self.root.as_path(),
            Path::new("Toolchains"),
            Path::new(&toolchain),
            Path::new("usr"),
            Path::new("bin"),
        ])
    }

    pub fn runtime_bin(&self) -> SwenvResult<PathBuf> {
        path_join([
            self.root.as_path(),
            Path::new("Runtimes"),
            Path::new(&self.version),
            Path::new("usr"),
            Path::new("bin"),
        ])
    }

    pub fn sdk_root(&self) -> SwenvResult<PathBuf> {
        path_join([
            self.root.as_path(),
            Path::new("Platforms"),
            Path::new(&self.version),
            Path::new("Windows.platform"),
            Path::new("Developer"),
            Path::new("SDKs"),
            Path::new("Windows.sdk"),
        ])
    }

    /// Put the layout's binaries first on PATH and point SDKROOT at its SDK
    pub fn apply(&self, env: &mut SessionEnv) -> SwenvResult<()> {
        env.prepend_path(&[self.toolchain_bin()?, self.runtime_bin()?]);
        env.set("SDKROOT", self.sdk_root()?.display().to_string());
        Ok(())
    }
}

async fn initialize_layout_environment(
    env: &mut SessionEnv,
    host: &dyn Host,
    config: &Config,
    source: &Path,
    target_arch: Option<&str>,
    layout: &ToolchainLayout,
) -> SwenvResult<()> {
    initialize_build_environment(env, host, config, source).await?;

    let options = VsOptions {
        sdk_version: config.vs.sdk_version.clone(),
        toolset_version: config.vs.toolset_version.clone(),
        host_arch: None,
        target_arch: Some(
            target_arch
                .unwrap_or(&config.toolchain.target_arch)
                .to_string(),
        ),
    };
    initialize_vs_environment(env, host, &options).await?;

    layout.apply(env)?;
    info!("Toolchain {} from {}", layout.version, layout.root.display());
    Ok(())
}

/// Build session plus developer shell plus the locally built toolchain.
pub async fn initialize_repro_environment(
    env: &mut SessionEnv,
    host: &dyn Host,
    config: &Config,
    source: &Path,
    target_arch: Option<&str>,
) -> SwenvResult<()> {
    let layout = ToolchainLayout::repro(&config.drive.root())?;
    initialize_layout_environment(env, host, config, source, target_arch, &layout).await
}

/// Build session plus developer shell plus a pinned release toolchain.
pub async fn initialize_bootstrap_environment(
    env: &mut SessionEnv,
    host: &dyn Host,
    config: &Config,
    source: &Path,
    target_arch: Option<&str>,
    toolchain_version: Option<&str>,
) -> SwenvResult<()> {
    let version = toolchain_version.unwrap_or(&config.toolchain.bootstrap_version);
    let layout = ToolchainLayout::bootstrap(&config.drive.root(), version)?;
    initialize_layout_environment(env, host, config, source, target_arch, &layout).await
}
