//! modforge - makefile rule generator for mechanism model compilation
//!
//! This library discovers mechanism model files (`*.mod`), classifies each by
//! content and emits a makefile of dependency rules for an external build
//! executor. Models carrying the `ARTIFICIAL_CELL` marker cannot go through
//! the vectorizing translator and are routed through the direct C++ path;
//! everything else takes the accelerated path when it is requested.
//!
//! # Core Concepts
//!
//! - **Discovery**: locating model files in the shared and user directories
//! - **Classification**: content-based routing between the direct and
//!   accelerated compilation paths
//! - **Rule synthesis**: deriving the artifact names of each model and
//!   rendering them through fixed rule templates
//! - **Assembly**: concatenating global variable declarations and rule
//!   blocks into one reproducible build script
//!
//! # Example
//!
//! ```no_run
//! use modforge::config::BuildConfig;
//! use modforge::fs::RealFileSystem;
//! use modforge::generator::generate;
//! use std::path::PathBuf;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = BuildConfig::new(
//!     PathBuf::from("/opt/modforge"),
//!     PathBuf::from("./mods"),
//! );
//! let script = generate(&RealFileSystem::new(), &config)?;
//! println!("{}", script.text);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod fs;
pub mod generator;
pub mod rules;
pub mod runner;
pub mod script;

// Re-export key types for convenient access
pub use classify::{Classification, Classifier, MarkerClassifier, Partition};
pub use config::{BuildConfig, ConfigError, GpuBackend, HostBackend, TranslatorKind};
pub use discovery::{discover, ModelFile};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use generator::{generate, generate_with, GeneratedScript};
pub use rules::RuleRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
