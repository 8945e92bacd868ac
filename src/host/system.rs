//! Host implementation backed by real processes
//!
//! Downloads use `ureq` on a blocking thread; extraction, drive
//! substitution, registry reads and developer-shell activation shell out to
//! `tar`, `subst`, `reg` and `cmd.exe`.

use crate::error::{SwenvError, SwenvResult};
use crate::host::{DevShellRequest, Host};
use crate::session::SessionEnv;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Max number of output lines to include in activation error messages.
const ERROR_TAIL_LINES: usize = 20;

/// Host that runs against the local machine
pub struct SystemHost;

impl SystemHost {
    /// Create a new system host
    pub fn new() -> Self {
        Self
    }

    /// Execute a command and capture its output
    async fn exec(program: &str, args: &[&str]) -> SwenvResult<std::process::Output> {
        debug!("Executing: {} {:?}", program, args);

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SwenvError::command_failed(format!("{} {:?}", program, args), e))
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

fn download_blocking(url: &str, dest: &Path) -> SwenvResult<()> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| SwenvError::download(url, e.to_string()))?;

    let bar = match response.body().content_length() {
        Some(len) => ProgressBar::new(len).with_style(
            ProgressStyle::with_template("{msg} [{bar:30}] {bytes}/{total_bytes}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        ),
        None => ProgressBar::new_spinner(),
    };
    bar.set_message("Downloading");

    let mut file = std::fs::File::create(dest)
        .map_err(|e| SwenvError::io(format!("creating {}", dest.display()), e))?;
    let mut reader = bar.wrap_read(response.into_body().into_reader());

    let copied = std::io::copy(&mut reader, &mut file);
    bar.finish_and_clear();
    copied.map_err(|e| SwenvError::download(url, e.to_string()))?;
    Ok(())
}

/// Extract the useful tail of process output for error diagnostics.
fn output_tail(stdout: &str, stderr: &str) -> String {
    let lines: Vec<&str> = stdout.lines().chain(stderr.lines()).collect();
    let start = lines.len().saturating_sub(ERROR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Parse the output of `reg query <key> /v <value>`.
///
/// Matching lines look like `    KitsRoot10    REG_SZ    C:\Program Files (x86)\Windows Kits\10\`.
pub fn parse_reg_query(output: &str, value: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let rest = line.trim_start().strip_prefix(value)?;
        let rest = rest.trim_start();
        let (kind, data) = rest.split_once(char::is_whitespace)?;
        kind.starts_with("REG_").then(|| data.trim().to_string())
    })
}

fn utf16_units(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Decode the UTF-16LE output `cmd /u` writes for its internal commands.
pub fn decode_set_output(bytes: &[u8]) -> SwenvResult<String> {
    if bytes.len() % 2 != 0 {
        return Err(SwenvError::ShellActivation(format!(
            "developer shell wrote {} bytes, expected UTF-16",
            bytes.len()
        )));
    }
    let text = String::from_utf16(&utf16_units(bytes))
        .map_err(|e| SwenvError::ShellActivation(format!("undecodable output: {}", e)))?;
    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

/// Parse `set` output into variable pairs, skipping cmd's hidden `=C:` entries.
pub fn parse_set_output(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let (name, value) = line.split_once('=')?;
            (!name.is_empty()).then(|| (name.to_string(), value.to_string()))
        })
        .collect()
}

#[async_trait]
impl Host for SystemHost {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn download(&self, url: &str, dest: &Path) -> SwenvResult<()> {
        info!("Downloading {}", url);

        let url_owned = url.to_string();
        let dest = dest.to_path_buf();
        tokio::task::spawn_blocking(move || download_blocking(&url_owned, &dest))
            .await
            .map_err(|e| SwenvError::download(url, e.to_string()))?
    }

    async fn extract(&self, archive: &Path, dest: &Path) -> SwenvResult<()> {
        info!("Extracting {} into {}", archive.display(), dest.display());

        tokio::fs::create_dir_all(dest)
            .await
            .map_err(|e| SwenvError::io(format!("creating {}", dest.display()), e))?;

        let archive_str = archive.display().to_string();
        let dest_str = dest.display().to_string();
        let output = Self::exec("tar", &["-xf", &archive_str, "-C", &dest_str]).await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(SwenvError::download(archive_str, stderr.trim()))
        }
    }

    async fn remove_file(&self, path: &Path) -> SwenvResult<()> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| SwenvError::io(format!("removing {}", path.display()), e))
    }

    async fn create_alias(&self, drive: &str, target: &Path) -> SwenvResult<()> {
        let target_str = target.display().to_string();
        let alias_error = |reason: String| SwenvError::AliasCreation {
            drive: drive.to_string(),
            target: target.to_path_buf(),
            reason,
        };

        let output = Self::exec("subst", &[drive, &target_str])
            .await
            .map_err(|e| alias_error(e.to_string()))?;

        if output.status.success() {
            info!("Mapped {} to {}", drive, target_str);
            Ok(())
        } else {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(alias_error(output_tail(&stdout, &stderr)))
        }
    }

    async fn query_installations(&self, locator: &Path) -> SwenvResult<String> {
        let program = locator.display().to_string();
        let output = Self::exec(
            &program,
            &["-nologo", "-latest", "-products", "*", "-format", "json"],
        )
        .await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(SwenvError::tool_not_found(
                "Visual Studio installation",
                format!("{} failed: {}", program, stderr.trim()),
            ))
        }
    }

    async fn registry_value(&self, key: &str, value: &str) -> SwenvResult<Option<String>> {
        let output = Self::exec("reg", &["query", key, "/v", value, "/reg:64"]).await?;

        if !output.status.success() {
            debug!("reg query {} /v {} returned {}", key, value, output.status);
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_reg_query(&stdout, value))
    }

    async fn activate_dev_shell(
        &self,
        env: &SessionEnv,
        request: &DevShellRequest,
    ) -> SwenvResult<Vec<(String, String)>> {
        // cmd /d /u /s /c ""<VsDevCmd.bat>" -arch=<arch> <args> && set"
        let command_line = format!(
            "\"\"{}\" -arch={} {} && set\"",
            request.script.display(),
            request.arch,
            request.argument_string()
        );
        info!("Entering developer shell: {}", request.installation_path.display());
        debug!("cmd.exe /d /u /s /c {}", command_line);

        let mut cmd = Command::new("cmd.exe");
        cmd.args(["/d", "/u", "/s", "/c"]);
        #[cfg(windows)]
        cmd.raw_arg(&command_line);
        #[cfg(not(windows))]
        cmd.arg(&command_line);

        let output = cmd
            .env_clear()
            .envs(env.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SwenvError::ShellActivation(e.to_string()))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            let stdout = String::from_utf16_lossy(&utf16_units(&output.stdout));
            return Err(SwenvError::ShellActivation(output_tail(&stdout, &stderr)));
        }

        let stdout = decode_set_output(&output.stdout)?;
        if stdout.lines().any(|l| l.starts_with("[ERROR:")) {
            return Err(SwenvError::ShellActivation(output_tail(&stdout, &stderr)));
        }

        Ok(parse_set_output(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kits_root() {
        let output = "\r\nHKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows Kits\\Installed Roots\r\n    \
                      KitsRoot10    REG_SZ    C:\\Program Files (x86)\\Windows Kits\\10\\\r\n\r\n";
        assert_eq!(
            parse_reg_query(output, "KitsRoot10").as_deref(),
            Some("C:\\Program Files (x86)\\Windows Kits\\10\\")
        );
        assert_eq!(parse_reg_query(output, "KitsRoot81"), None);
    }

    #[test]
    fn parse_set_skips_hidden_entries() {
        let output = "=C:=C:\\src\nPath=C:\\a;C:\\b\nINCLUDE=\nnoise line\nA=b=c\n";
        assert_eq!(
            parse_set_output(output),
            vec![
                ("Path".to_string(), "C:\\a;C:\\b".to_string()),
                ("INCLUDE".to_string(), String::new()),
                ("A".to_string(), "b=c".to_string()),
            ]
        );
    }

    fn utf16le(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    #[test]
    fn set_output_keeps_non_ascii_values() {
        let bytes = utf16le("USERPROFILE=C:\\Users\\Jörg\r\nPath=C:\\Users\\Jörg\\bin;C:\\Windows\r\n");
        let decoded = decode_set_output(&bytes).unwrap();
        assert_eq!(
            parse_set_output(&decoded),
            vec![
                ("USERPROFILE".to_string(), "C:\\Users\\Jörg".to_string()),
                ("Path".to_string(), "C:\\Users\\Jörg\\bin;C:\\Windows".to_string()),
            ]
        );
    }

    #[test]
    fn set_output_drops_byte_order_mark() {
        let bytes = utf16le("\u{feff}A=1\r\n");
        assert_eq!(decode_set_output(&bytes).unwrap(), "A=1\r\n");
    }

    #[test]
    fn set_output_rejects_broken_utf16() {
        assert!(matches!(
            decode_set_output(b"A=1"),
            Err(SwenvError::ShellActivation(_))
        ));
        // lone high surrogate
        assert!(decode_set_output(&[0x00, 0xD8]).is_err());
    }

    #[test]
    fn output_tail_keeps_last_lines() {
        let stdout: String = (0..30).map(|i| format!("line {}\n", i)).collect();
        let tail = output_tail(&stdout, "boom");
        assert!(tail.ends_with("line 29\nboom"));
        assert!(!tail.contains("line 10\n"));
    }

    #[test]
    fn argument_string_joins_with_spaces() {
        let request = DevShellRequest {
            installation_path: "vs".into(),
            script: "vs/Common7/Tools/VsDevCmd.bat".into(),
            arch: "amd64".into(),
            arguments: vec!["-no_logo".into(), "-host_arch=amd64".into()],
        };
        assert_eq!(request.argument_string(), "-no_logo -host_arch=amd64");
    }
}
