//! Shell script rendering
//!
//! Turns the difference between two session snapshots into commands the
//! calling shell evaluates, e.g. `swenv build C:\src | Invoke-Expression`.

use super::env::SessionEnv;
use clap::ValueEnum;
use std::path::Path;

/// Target shell dialect for the emitted script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Shell {
    /// Windows PowerShell / pwsh
    #[default]
    Powershell,
    /// cmd.exe (use with `for /f`)
    Cmd,
    /// POSIX sh (MSYS2, Git Bash)
    Posix,
}

impl Shell {
    fn set_var(self, name: &str, value: &str) -> String {
        match self {
            Self::Powershell => format!("${{env:{}}} = '{}'", name, value.replace('\'', "''")),
            Self::Cmd => format!("set \"{}={}\"", name, value),
            Self::Posix => format!("export {}='{}'", name, posix_escape(value)),
        }
    }

    fn unset_var(self, name: &str) -> String {
        match self {
            Self::Powershell => format!("Remove-Item -ErrorAction SilentlyContinue 'Env:{}'", name),
            Self::Cmd => format!("set \"{}=\"", name),
            Self::Posix => format!("unset {}", name),
        }
    }

    fn change_dir(self, dir: &Path) -> String {
        let dir = dir.display().to_string();
        match self {
            Self::Powershell => format!("Set-Location -LiteralPath '{}'", dir.replace('\'', "''")),
            Self::Cmd => format!("cd /d \"{}\"", dir),
            Self::Posix => format!("cd '{}'", posix_escape(&dir)),
        }
    }
}

/// POSIX single-quote escaping: replace `'` with `'\''`.
fn posix_escape(s: &str) -> String {
    s.replace('\'', "'\\''")
}

/// Render the commands that turn `before` into `after`
pub fn render_script(shell: Shell, before: &SessionEnv, after: &SessionEnv) -> String {
    let mut lines = Vec::new();

    for (name, _) in before.iter() {
        if !after.contains(name) {
            lines.push(shell.unset_var(name));
        }
    }

    for (name, value) in after.iter() {
        if before.get(name) != Some(value) {
            lines.push(shell.set_var(name, value));
        }
    }

    if let Some(dir) = after.current_dir() {
        if before.current_dir() != Some(dir) {
            lines.push(shell.change_dir(dir));
        }
    }

    let mut script = lines.join("\n");
    if !script.is_empty() {
        script.push('\n');
    }
    script
}
