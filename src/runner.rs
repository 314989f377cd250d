//! Work-directory output and build-executor invocation
//!
//! Thin glue around the generator: writes the assembled script to the work
//! directory, places the static auxiliary makefile next to it and hands off
//! to `make`. The executor's exit status is propagated verbatim, never
//! interpreted here.

use crate::config::BuildConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{info, warn};

/// Fixed name of the generated build script inside the work directory
pub const GENERATED_MAKEFILE: &str = "GeneratedMakefile.make";

/// Fixed name of the static auxiliary makefile; it includes the generated
/// script and carries the compiler/link logic
pub const STATIC_MAKEFILE: &str = "modforge_makefile";

/// Writes the generated script and the static makefile into the work
/// directory, creating it when missing. Returns the path of the static
/// makefile, which is the one handed to the executor.
pub fn write_outputs(config: &BuildConfig, script_text: &str) -> Result<PathBuf> {
    fs::create_dir_all(&config.work_dir)
        .context(format!("Failed to create work directory {:?}", config.work_dir))?;

    // The static makefile goes in first: if it is missing, the run fails
    // without leaving a generated script behind.
    let static_src = config.static_makefile_path();
    let static_dst = config.work_dir.join(STATIC_MAKEFILE);
    fs::copy(&static_src, &static_dst).context(format!(
        "Failed to copy static makefile {:?} into work directory",
        static_src
    ))?;

    let script_path = config.work_dir.join(GENERATED_MAKEFILE);
    fs::write(&script_path, script_text)
        .context(format!("Failed to write build script {:?}", script_path))?;
    info!(path = %script_path.display(), "Wrote generated build script");

    Ok(static_dst)
}

/// Argument list for the build-executor invocation; pure and testable
pub fn make_args(config: &BuildConfig) -> Vec<String> {
    let makefile = config.work_dir.join(STATIC_MAKEFILE);

    let mut args = vec![
        format!("-f{}", makefile.display()),
        format!("-j{}", config.jobs),
        format!("ROOT={}", config.root_dir.display()),
    ];

    if config.verbose {
        args.push("VERBOSE=1".to_string());
    }

    if let Some(binary) = &config.translator_binary {
        args.push(format!("MOD2CPP_BINARY={}", binary.display()));
    }

    if let Some(build_type) = config.build_type {
        args.push(format!("BUILD_TYPE={}", build_type.as_str()));
    }

    if let Some(suffix) = &config.suffix {
        args.push(format!("MECHLIB_SUFFIX={}", suffix));
    }

    match &config.output_dir {
        Some(dir) => {
            args.push(format!("DESTDIR={}", dir.display()));
            args.push("install".to_string());
        }
        None => args.push("all".to_string()),
    }

    args.push(format!("WORK_DIR={}", config.work_dir.display()));

    args
}

/// Invokes the build executor and returns its exit code.
pub fn run_make(config: &BuildConfig) -> Result<i32> {
    let args = make_args(config);
    info!(command = %format!("make {}", args.join(" ")), "Launching build executor");

    let status = Command::new("make")
        .args(&args)
        .status()
        .context("Failed to launch the build executor")?;

    Ok(status.code().unwrap_or_else(|| {
        warn!("Build executor terminated without an exit code");
        1
    }))
}
