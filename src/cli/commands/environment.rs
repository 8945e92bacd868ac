//! Environment commands - vs, cmake, build, repro, bootstrap
//!
//! Runs one setup operation against a snapshot of this process's
//! environment and prints the resulting delta as a script on stdout. The
//! delta is printed even when the operation fails part-way, so the calling
//! shell ends up with exactly the mutations that were applied.

use crate::cli::args::{BootstrapArgs, CmakeArgs, Commands, ReproArgs, VsArgs};
use crate::config::Config;
use crate::error::{SwenvError, SwenvResult};
use crate::host::{Host, SystemHost};
use crate::session::{render_script, SessionEnv, Shell};
use crate::setup::{self, CmakeOptions, VsOptions};
use crate::ui::{self, UiContext};
use tracing::debug;

/// Variables worth echoing back after a successful run
const SUMMARY_VARS: [&str; 3] = ["CMAKE_ROOT", "SDKROOT", "VSCMD_ARG_TGT_ARCH"];

/// Execute an environment command
pub async fn execute(
    command: Commands,
    shell: Shell,
    config: &Config,
    ctx: &UiContext,
) -> SwenvResult<()> {
    if !cfg!(windows) {
        return Err(SwenvError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ));
    }

    let host = SystemHost::new();
    let before = SessionEnv::from_process();
    let mut env = before.clone();

    ui::intro(ctx, &format!("swenv {}", command_name(&command)));
    let result = apply(&command, &mut env, &host, config).await;

    let script = render_script(shell, &before, &env);
    debug!("Emitting {} script lines", script.lines().count());
    print!("{}", script);

    result?;

    for name in SUMMARY_VARS {
        if let Some(value) = env.get_nonempty(name) {
            ui::key_value(ctx, name, value);
        }
    }
    if let Some(dir) = env.current_dir() {
        ui::key_value(ctx, "Location", &dir.display().to_string());
    }
    ui::step_ok(ctx, "Session configured");
    ui::usage_hint(ctx, shell, &format!("swenv {} ...", command_name(&command)));

    Ok(())
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Vs(_) => "vs",
        Commands::Cmake(_) => "cmake",
        Commands::Build(_) => "build",
        Commands::Repro(_) => "repro",
        Commands::Bootstrap(_) => "bootstrap",
        Commands::Config(_) => "config",
    }
}

fn vs_options(args: &VsArgs, config: &Config) -> VsOptions {
    VsOptions {
        sdk_version: args.sdk.clone().or_else(|| config.vs.sdk_version.clone()),
        toolset_version: args
            .toolset
            .clone()
            .or_else(|| config.vs.toolset_version.clone()),
        host_arch: args.host_arch.clone(),
        target_arch: args.arch.clone(),
    }
}

fn cmake_options(args: &CmakeArgs, config: &Config) -> CmakeOptions {
    let mut options = CmakeOptions::from(&config.cmake);
    if let Some(version) = &args.cmake_version {
        options.version = version.clone();
    }
    if let Some(patch) = args.patch {
        options.patch = patch;
    }
    options
}

/// Run the operation for `command` against `env`
async fn apply(
    command: &Commands,
    env: &mut SessionEnv,
    host: &dyn Host,
    config: &Config,
) -> SwenvResult<()> {
    match command {
        Commands::Vs(args) => {
            setup::initialize_vs_environment(env, host, &vs_options(args, config)).await
        }
        Commands::Cmake(args) => {
            setup::initialize_cmake_environment(env, host, &cmake_options(args, config))
                .await
                .map(|_| ())
        }
        Commands::Build(args) => {
            setup::initialize_build_environment(env, host, config, &args.source).await
        }
        Commands::Repro(ReproArgs { source, arch }) => {
            setup::initialize_repro_environment(env, host, config, source, arch.as_deref()).await
        }
        Commands::Bootstrap(BootstrapArgs {
            source,
            arch,
            toolchain_version,
        }) => {
            setup::initialize_bootstrap_environment(
                env,
                host,
                config,
                source,
                arch.as_deref(),
                toolchain_version.as_deref(),
            )
            .await
        }
        Commands::Config(_) => Err(SwenvError::NotAnEnvironmentCommand(
            command_name(command).to_string(),
        )),
    }
}
