//! CLI argument definitions using clap derive

use crate::session::Shell;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// swenv - Swift toolchain developer environments on Windows
///
/// Prints shell commands that configure the calling session; pipe them
/// into your shell, e.g. `swenv bootstrap S:\SourceCache | Out-String | Invoke-Expression`.
#[derive(Parser, Debug)]
#[command(name = "swenv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress status output on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SWENV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Shell dialect of the emitted script
    #[arg(long, global = true, value_enum, default_value_t = Shell::Powershell)]
    pub shell: Shell,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enter the Visual Studio developer shell
    Vs(VsArgs),

    /// Install the pinned CMake release and put it on PATH
    Cmake(CmakeArgs),

    /// Prepare a session for building the toolchain from source
    Build(BuildArgs),

    /// Build session using the locally built toolchain
    Repro(ReproArgs),

    /// Build session using a pinned release toolchain
    Bootstrap(BootstrapArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the vs command
#[derive(Parser, Debug)]
pub struct VsArgs {
    /// Windows SDK version, e.g. 10.0.22621.0
    #[arg(long)]
    pub sdk: Option<String>,

    /// MSVC toolset version, e.g. 14.38
    #[arg(long)]
    pub toolset: Option<String>,

    /// Host architecture (defaults to the machine's)
    #[arg(long)]
    pub host_arch: Option<String>,

    /// Target architecture (defaults to the machine's)
    #[arg(long)]
    pub arch: Option<String>,
}

/// Arguments for the cmake command
#[derive(Parser, Debug)]
pub struct CmakeArgs {
    /// CMake major.minor version (overrides config)
    #[arg(long = "cmake-version")]
    pub cmake_version: Option<String>,

    /// CMake patch number (overrides config)
    #[arg(long)]
    pub patch: Option<u32>,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Toolchain source tree to map onto the alias drive
    pub source: PathBuf,
}

/// Arguments for the repro command
#[derive(Parser, Debug)]
pub struct ReproArgs {
    /// Toolchain source tree to map onto the alias drive
    pub source: PathBuf,

    /// Target architecture [default: amd64]
    #[arg(long)]
    pub arch: Option<String>,
}

/// Arguments for the bootstrap command
#[derive(Parser, Debug)]
pub struct BootstrapArgs {
    /// Toolchain source tree to map onto the alias drive
    pub source: PathBuf,

    /// Target architecture [default: amd64]
    #[arg(long)]
    pub arch: Option<String>,

    /// Release toolchain version [default: 6.1.2]
    #[arg(long)]
    pub toolchain_version: Option<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
