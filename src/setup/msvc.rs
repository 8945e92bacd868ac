//! Visual Studio developer environment
//!
//! Finds the latest Visual Studio through `vswhere`, enters its developer
//! shell, and repairs INCLUDE when an explicit Windows SDK was requested:
//! `VsDevCmd -winsdk=` can leave the default SDK's include directories in
//! place, so every SDK include path is re-pointed at the requested version.

use crate::error::{SwenvError, SwenvResult};
use crate::host::{DevShellRequest, Host};
use crate::session::SessionEnv;
use crate::setup::arch::{build_tool_arch, host_token};
use crate::setup::paths::path_join;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Registry key holding the installed Windows Kits roots
pub const KITS_ROOTS_KEY: &str = r"HKLM\SOFTWARE\Microsoft\Windows Kits\Installed Roots";

/// Value naming the Windows 10/11 kits root
pub const KITS_ROOT_VALUE: &str = "KitsRoot10";

const INSTALLER_DIR: [&str; 2] = ["Microsoft Visual Studio", "Installer"];
const LOCATOR: &str = "vswhere.exe";
const DEV_SHELL_SCRIPT: [&str; 3] = ["Common7", "Tools", "VsDevCmd.bat"];

/// Developer-shell selection; `None` means "let Visual Studio decide" for
/// SDK and toolset, and "derive from the host" for architectures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VsOptions {
    pub sdk_version: Option<String>,
    pub toolset_version: Option<String>,
    pub host_arch: Option<String>,
    pub target_arch: Option<String>,
}

/// One entry of `vswhere -format json`
#[derive(Debug, Clone, Deserialize)]
pub struct Installation {
    #[serde(rename = "installationPath")]
    pub installation_path: PathBuf,

    #[serde(rename = "installationVersion", default)]
    pub installation_version: Option<String>,
}

fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Parse the locator's JSON array
pub fn parse_installations(json: &str) -> SwenvResult<Vec<Installation>> {
    Ok(serde_json::from_str(json)?)
}

/// Developer-shell arguments excluding the target architecture
pub fn dev_shell_arguments(options: &VsOptions, host_arch: &str) -> Vec<String> {
    let mut args = vec!["-no_logo".to_string()];
    if let Some(sdk) = given(&options.sdk_version) {
        args.push(format!("-winsdk={}", sdk));
    }
    if let Some(toolset) = given(&options.toolset_version) {
        args.push(format!("-vcvars_ver={}", toolset));
    }
    args.push(format!("-host_arch={}", host_arch));
    args
}

/// `<KitsRoot10>Include`, tolerant of a missing trailing backslash
pub fn sdk_include_root(kits_root: &str) -> String {
    format!("{}\\Include", kits_root.trim_end_matches(['\\', '/']))
}

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

fn rewrite_include(segment: &str, include_root: &str, version: &str) -> Option<String> {
    let prefix = segment.get(..include_root.len())?;
    if !prefix.eq_ignore_ascii_case(include_root) {
        return None;
    }

    let rest = &segment[include_root.len()..];
    let sep = rest.chars().next().filter(|c| is_separator(*c))?;
    let after = &rest[sep.len_utf8()..];
    let component_len = after.find(is_separator).unwrap_or(after.len());
    if component_len == 0 {
        return None;
    }
    if &after[..component_len] == version {
        return None;
    }

    Some(format!("{}{}{}{}", prefix, sep, version, &after[component_len..]))
}

/// Re-point SDK include directories at `version`.
///
/// Segments outside `include_root`, or already on `version`, are returned
/// unchanged; order is preserved.
pub fn rewrite_sdk_includes(segments: &[String], include_root: &str, version: &str) -> Vec<String> {
    let root = include_root.trim_end_matches(is_separator);
    segments
        .iter()
        .map(|seg| rewrite_include(seg, root, version).unwrap_or_else(|| seg.clone()))
        .collect()
}

fn installer_dir(env: &SessionEnv) -> SwenvResult<PathBuf> {
    let program_files = env.get_nonempty("ProgramFiles(x86)").ok_or_else(|| {
        SwenvError::tool_not_found("Visual Studio Installer", "ProgramFiles(x86) is not set")
    })?;
    path_join(std::iter::once(program_files).chain(INSTALLER_DIR))
}

async fn locate_installation(env: &SessionEnv, host: &dyn Host) -> SwenvResult<PathBuf> {
    let locator = path_join([installer_dir(env)?.as_path(), Path::new(LOCATOR)])?;
    if !host.path_exists(&locator) {
        return Err(SwenvError::tool_not_found(
            "Visual Studio Installer",
            locator.display().to_string(),
        ));
    }

    let output = host.query_installations(&locator).await?;
    let latest = parse_installations(&output)?.into_iter().next().ok_or_else(|| {
        SwenvError::tool_not_found("Visual Studio installation", "vswhere reported none")
    })?;

    if !host.path_exists(&latest.installation_path) {
        return Err(SwenvError::tool_not_found(
            "Visual Studio installation",
            latest.installation_path.display().to_string(),
        ));
    }

    debug!(
        "Using Visual Studio {} at {}",
        latest.installation_version.as_deref().unwrap_or("(unknown)"),
        latest.installation_path.display()
    );
    Ok(latest.installation_path)
}

/// Enter the Visual Studio developer shell in `env`.
pub async fn initialize_vs_environment(
    env: &mut SessionEnv,
    host: &dyn Host,
    options: &VsOptions,
) -> SwenvResult<()> {
    let installation_path = locate_installation(env, host).await?;

    let script = path_join(
        std::iter::once(installation_path.as_path())
            .chain(DEV_SHELL_SCRIPT.into_iter().map(Path::new)),
    )?;
    if !host.path_exists(&script) {
        return Err(SwenvError::tool_not_found(
            "Developer shell",
            script.display().to_string(),
        ));
    }

    let host_arch = match given(&options.host_arch) {
        Some(arch) => arch.to_string(),
        None => build_tool_arch(host_token(env))?.to_string(),
    };
    let arch = match given(&options.target_arch) {
        Some(arch) => arch.to_string(),
        None => build_tool_arch(host_token(env))?.to_string(),
    };

    let request = DevShellRequest {
        installation_path,
        script,
        arch,
        arguments: dev_shell_arguments(options, &host_arch),
    };
    let vars = host.activate_dev_shell(env, &request).await?;
    env.replace_vars(vars);
    info!("Developer shell active ({} -> {})", host_arch, request.arch);

    let Some(sdk_version) = given(&options.sdk_version) else {
        return Ok(());
    };

    let kits_root = host
        .registry_value(KITS_ROOTS_KEY, KITS_ROOT_VALUE)
        .await?
        .ok_or_else(|| {
            SwenvError::tool_not_found(
                "Windows SDK root",
                format!(r"{}\{}", KITS_ROOTS_KEY, KITS_ROOT_VALUE),
            )
        })?;

    if env.contains("INCLUDE") {
        let include_root = sdk_include_root(&kits_root);
        let corrected = rewrite_sdk_includes(&env.list("INCLUDE"), &include_root, sdk_version);
        env.set_list("INCLUDE", &corrected);
    }

    Ok(())
}
