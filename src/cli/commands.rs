use crate::config::{BuildConfig, BuildType, GpuBackend, HostBackend, TranslatorKind};
use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

/// Makefile rule generator for mechanism model file compilation
#[derive(Parser, Debug)]
#[command(
    name = "modforge",
    about = "Generates makefile rules to translate and compile mechanism model files",
    version,
    long_about = "modforge discovers *.mod model files in the shared and user directories, \
                  routes each through the direct or accelerated compilation path based on \
                  its content, writes the resulting makefile into the work directory and \
                  hands off to make."
)]
#[command(group(
    ArgGroup::new("host").args(["cpp", "ispc", "omp"]).multiple(false)
))]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Installation root containing share/modfile and the static makefile"
    )]
    pub root: PathBuf,

    #[arg(long, value_name = "PATH", help = "Override path of the translator binary")]
    pub binary: Option<PathBuf>,

    #[arg(long, help = "Use the nmodl translator instead of mod2c")]
    pub nmodl: bool,

    #[arg(long, help = "Target the baseline C++ host backend (default)")]
    pub cpp: bool,

    #[arg(long, help = "Target the vectorizing ispc host backend")]
    pub ispc: bool,

    #[arg(long, help = "Target the OpenMP host backend")]
    pub omp: bool,

    #[arg(
        long,
        value_enum,
        value_name = "KIND",
        num_args = 0..=1,
        default_missing_value = "openacc",
        help = "Request a GPU backend (nmodl only)"
    )]
    pub gpu: Option<GpuArg>,

    #[arg(long = "inline", help = "Request the inlining pass (nmodl only)")]
    pub inline_pass: bool,

    #[arg(
        long,
        value_name = "DIR",
        default_value = "./output",
        help = "Work directory receiving the generated makefile"
    )]
    pub work_dir: PathBuf,

    #[arg(long, value_enum, value_name = "TYPE", help = "Build artifact type")]
    pub build_type: Option<BuildTypeArg>,

    #[arg(long, value_name = "SUFFIX", help = "Naming suffix for the mechanism library")]
    pub suffix: Option<String>,

    #[arg(
        short = 'j',
        long,
        value_name = "N",
        default_value_t = 4,
        help = "Parallel job count forwarded to make"
    )]
    pub jobs: u32,

    #[arg(
        long,
        value_name = "DIR",
        help = "Install destination; selects the install target"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(short = 'v', long, help = "Verbose output, forwarded to make as VERBOSE=1")]
    pub verbose: bool,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(value_name = "MOD_DIR", help = "Directory of model files to build")]
    pub mod_dir: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuArg {
    Cuda,
    Openacc,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTypeArg {
    Static,
    Shared,
}

impl CliArgs {
    /// Lowers the parsed arguments into a [`BuildConfig`]
    pub fn to_config(&self) -> BuildConfig {
        let mut config = BuildConfig::new(self.root.clone(), self.mod_dir.clone());

        config.work_dir = self.work_dir.clone();
        config.translator_binary = self.binary.clone();
        config.translator = if self.nmodl {
            TranslatorKind::Nmodl
        } else {
            TranslatorKind::Mod2c
        };
        config.host_backend = if self.ispc {
            HostBackend::Ispc
        } else if self.omp {
            HostBackend::Omp
        } else {
            HostBackend::Cpp
        };
        config.gpu_backend = self.gpu.map(|g| match g {
            GpuArg::Cuda => GpuBackend::Cuda,
            GpuArg::Openacc => GpuBackend::OpenAcc,
        });
        config.inline_pass = self.inline_pass;
        config.build_type = self.build_type.map(|t| match t {
            BuildTypeArg::Static => BuildType::Static,
            BuildTypeArg::Shared => BuildType::Shared,
        });
        config.suffix = self.suffix.clone();
        config.jobs = self.jobs;
        config.output_dir = self.output_dir.clone();
        config.verbose = self.verbose;

        config
    }
}
