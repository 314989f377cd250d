//! Build configuration and translator-flag resolution
//!
//! A [`BuildConfig`] captures everything one generator run needs: the
//! installation root (passed in explicitly, never inferred from the location
//! of the running binary), the model directory, the work directory, and the
//! translator toggles. Flag resolution is a pure function from configuration
//! to the flag string embedded in the translation rules; it never influences
//! how a model file is classified.
//!
//! Invalid toggle combinations (a GPU backend or the inline pass together
//! with the mod2c translator, which has no concept of either) are rejected up
//! front, before any file I/O happens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Default parallel job count forwarded to the build executor
pub const DEFAULT_JOBS: u32 = 4;

/// Default work directory, relative to the invocation directory
pub const DEFAULT_WORK_DIR: &str = "./output";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// GPU backend requested for a translator without backend support
    #[error("GPU backend '{gpu}' requires the nmodl translator; mod2c has no backend support")]
    GpuRequiresNmodl { gpu: GpuBackend },

    /// Inline pass requested for a translator without pass support
    #[error("The inline pass requires the nmodl translator; mod2c has no pass support")]
    InlineRequiresNmodl,

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Which external translator lowers model files to source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslatorKind {
    /// Classic translator; no host/GPU backend or pass selection
    Mod2c,
    /// Modern translator with host backends, GPU backends and passes
    Nmodl,
}

/// Host compilation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostBackend {
    /// Baseline C++ path
    Cpp,
    /// Vectorizing accelerated path
    Ispc,
    /// Parallel host path
    Omp,
}

impl Default for HostBackend {
    fn default() -> Self {
        HostBackend::Cpp
    }
}

/// Optional GPU backend, only meaningful with the nmodl translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GpuBackend {
    OpenAcc,
    Cuda,
}

impl fmt::Display for GpuBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuBackend::OpenAcc => write!(f, "openacc"),
            GpuBackend::Cuda => write!(f, "cuda"),
        }
    }
}

/// Artifact type forwarded to the build executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildType {
    Static,
    Shared,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Static => "STATIC",
            BuildType::Shared => "SHARED",
        }
    }
}

/// Complete configuration for one generator run
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Installation root containing `share/modfile` and the static makefile
    pub root_dir: PathBuf,

    /// User-supplied directory of model files
    pub model_dir: PathBuf,

    /// Work directory receiving the generated makefile
    pub work_dir: PathBuf,

    /// Override path for the translator binary
    pub translator_binary: Option<PathBuf>,

    pub translator: TranslatorKind,

    pub host_backend: HostBackend,

    pub gpu_backend: Option<GpuBackend>,

    /// Request the inlining optimization pass (nmodl only)
    pub inline_pass: bool,

    pub build_type: Option<BuildType>,

    /// Naming suffix for the produced mechanism library
    pub suffix: Option<String>,

    /// Parallel job count forwarded to the build executor
    pub jobs: u32,

    /// Install destination; selects the `install` target when present
    pub output_dir: Option<PathBuf>,

    pub verbose: bool,
}

impl BuildConfig {
    /// Creates a configuration with defaults for everything beyond the
    /// required directories.
    pub fn new(root_dir: PathBuf, model_dir: PathBuf) -> Self {
        Self {
            root_dir,
            model_dir,
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            translator_binary: None,
            translator: TranslatorKind::Mod2c,
            host_backend: HostBackend::default(),
            gpu_backend: None,
            inline_pass: false,
            build_type: None,
            suffix: None,
            jobs: DEFAULT_JOBS,
            output_dir: None,
            verbose: false,
        }
    }

    /// Validates toggle combinations before any file I/O
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a GPU backend or the inline pass is requested
    /// together with the mod2c translator, or if the job count is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.translator == TranslatorKind::Mod2c {
            if let Some(gpu) = self.gpu_backend {
                return Err(ConfigError::GpuRequiresNmodl { gpu });
            }
            if self.inline_pass {
                return Err(ConfigError::InlineRequiresNmodl);
            }
        }

        if self.jobs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Job count must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// True when the accelerated compilation route is active
    pub fn accelerated(&self) -> bool {
        self.host_backend == HostBackend::Ispc
    }

    /// Fixed shared directory of baseline model files
    pub fn shared_model_dir(&self) -> PathBuf {
        self.root_dir.join("share").join("modfile")
    }

    /// Fixed location of the static auxiliary makefile
    pub fn static_makefile_path(&self) -> PathBuf {
        self.root_dir.join("share").join("modforge_makefile")
    }

    /// Resolves the translator flag string embedded in translation rules
    ///
    /// Pure function of the configuration; assumes `validate()` passed.
    /// mod2c takes no flags at all.
    pub fn translator_flags(&self) -> String {
        if self.translator != TranslatorKind::Nmodl {
            return String::new();
        }

        let mut parts = vec![match self.host_backend {
            HostBackend::Cpp => "host --c",
            HostBackend::Ispc => "host --ispc",
            HostBackend::Omp => "host --omp",
        }];

        match self.gpu_backend {
            Some(GpuBackend::OpenAcc) => parts.push("acc --oacc"),
            Some(GpuBackend::Cuda) => parts.push("acc --cuda"),
            None => {}
        }

        if self.inline_pass {
            parts.push("passes --inline");
        }

        parts.join(" ")
    }

    /// Makefile value for the translator binary path
    ///
    /// The override wins; otherwise the executor-level variable for the
    /// chosen translator is referenced.
    pub fn translator_binary_value(&self) -> String {
        match &self.translator_binary {
            Some(path) => path.display().to_string(),
            None => match self.translator {
                TranslatorKind::Nmodl => "$(NMODL_COMPILER)".to_string(),
                TranslatorKind::Mod2c => "$(MOD2C_COMPILER)".to_string(),
            },
        }
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Modforge Configuration:")?;
        writeln!(f, "  Root: {}", self.root_dir.display())?;
        writeln!(f, "  Model Dir: {}", self.model_dir.display())?;
        writeln!(f, "  Work Dir: {}", self.work_dir.display())?;
        writeln!(f, "  Translator: {:?}", self.translator)?;
        writeln!(f, "  Host Backend: {:?}", self.host_backend)?;
        if let Some(gpu) = self.gpu_backend {
            writeln!(f, "  GPU Backend: {}", gpu)?;
        }
        writeln!(f, "  Jobs: {}", self.jobs)?;
        Ok(())
    }
}
