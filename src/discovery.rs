//! Model file discovery
//!
//! Locates `*.mod` model files in the fixed shared directory and the
//! user-supplied model directory. Entries within each directory are sorted by
//! name so repeated runs over an unchanged tree discover files in the same
//! order, which the assembler depends on for byte-identical output.

use crate::fs::FileSystem;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension identifying model files
pub const MODEL_EXTENSION: &str = "mod";

/// A discovered model file; immutable after discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFile {
    path: PathBuf,
    stem: String,
}

impl ModelFile {
    /// Wraps a path to a model file, deriving the base name used for all
    /// artifact names.
    ///
    /// # Errors
    ///
    /// Fails when no non-empty base name can be derived; every derived
    /// artifact name depends on it.
    pub fn new(path: PathBuf) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        if stem.is_empty() {
            bail!("Cannot derive a base name from model file {:?}", path);
        }

        Ok(Self { path, stem })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name without the extension; seed for every derived artifact name
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// File name with extension, as listed in the `MOD_FILES` variable
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.stem)
    }
}

/// Discovers model files from the shared directory followed by the
/// user-supplied directory.
///
/// The shared directory must exist; an unreadable directory aborts the run.
pub fn discover(
    fs: &dyn FileSystem,
    shared_dir: &Path,
    model_dir: &Path,
) -> Result<Vec<ModelFile>> {
    if !fs.is_dir(shared_dir) {
        bail!("Shared model directory {:?} does not exist", shared_dir);
    }

    let mut files = scan_dir(fs, shared_dir)?;
    files.extend(scan_dir(fs, model_dir)?);

    // Every derived artifact name is keyed on the stem, so duplicate stems
    // would collide on their outputs.
    let mut seen = HashSet::new();
    for file in &files {
        if !seen.insert(file.stem()) {
            bail!(
                "Duplicate model base name '{}'; derived artifact names would collide",
                file.stem()
            );
        }
    }

    debug!(count = files.len(), "Discovered model files");
    Ok(files)
}

fn scan_dir(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<ModelFile>> {
    let mut entries = fs
        .read_dir(dir)
        .context(format!("Failed to scan model directory {:?}", dir))?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut files = Vec::new();
    for entry in entries {
        if !entry.is_file() {
            continue;
        }
        let is_model = entry
            .path()
            .extension()
            .map(|e| e == MODEL_EXTENSION)
            .unwrap_or(false);
        if is_model {
            files.push(ModelFile::new(entry.path)?);
        }
    }

    Ok(files)
}
