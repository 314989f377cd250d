//! Content-based model classification
//!
//! The accelerated translator cannot process artificial-cell models, so every
//! discovered file is routed by inspecting its raw content for the
//! `ARTIFICIAL_CELL` marker. The predicate lives behind the [`Classifier`]
//! trait so the marker rule can be swapped without touching rule synthesis.

use crate::discovery::ModelFile;
use crate::fs::FileSystem;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Marker token identifying a non-vectorizable artificial construct
pub const ARTIFICIAL_CELL_MARKER: &str = "ARTIFICIAL_CELL";

/// Which compilation route a model file must follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Straight to general source, bypassing acceleration
    DirectPath,
    /// Through the vectorizing intermediate language
    AcceleratedPath,
}

/// Classification strategy over model file content
pub trait Classifier: Send + Sync {
    fn classify(&self, model: &ModelFile, content: &str) -> Classification;
}

/// Routes a model to the direct path iff its content contains the marker
pub struct MarkerClassifier {
    marker: String,
}

impl MarkerClassifier {
    pub fn new() -> Self {
        Self::with_marker(ARTIFICIAL_CELL_MARKER)
    }

    pub fn with_marker(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }
}

impl Default for MarkerClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for MarkerClassifier {
    fn classify(&self, _model: &ModelFile, content: &str) -> Classification {
        if content.contains(&self.marker) {
            Classification::DirectPath
        } else {
            Classification::AcceleratedPath
        }
    }
}

/// An ordered partition of the discovered set
///
/// The buckets are disjoint and together contain every input file;
/// discovery order is preserved within each bucket.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub accelerated: Vec<ModelFile>,
    pub direct: Vec<ModelFile>,
}

impl Partition {
    /// Treats every file as direct-path without reading any content.
    /// Used when the accelerated route is not configured at all.
    pub fn all_direct(files: Vec<ModelFile>) -> Self {
        Self {
            accelerated: Vec::new(),
            direct: files,
        }
    }

    pub fn len(&self) -> usize {
        self.accelerated.len() + self.direct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accelerated.is_empty() && self.direct.is_empty()
    }
}

/// Partitions the discovered files by reading each one and applying the
/// classifier.
///
/// Any unreadable file aborts the whole run; a partial classification is
/// never produced.
pub fn partition(
    fs: &dyn FileSystem,
    classifier: &dyn Classifier,
    files: Vec<ModelFile>,
) -> Result<Partition> {
    let mut result = Partition::default();

    for model in files {
        let content = fs
            .read_to_string(model.path())
            .context(format!("Failed to read model file {:?}", model.path()))?;

        match classifier.classify(&model, &content) {
            Classification::DirectPath => {
                debug!(model = model.stem(), "Classified as direct path");
                result.direct.push(model);
            }
            Classification::AcceleratedPath => {
                debug!(model = model.stem(), "Classified as accelerated path");
                result.accelerated.push(model);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use std::path::PathBuf;

    fn model(path: &str) -> ModelFile {
        ModelFile::new(PathBuf::from(path)).unwrap()
    }

    #[test]
    fn test_marker_routes_to_direct_path() {
        let classifier = MarkerClassifier::new();
        let m = model("/mods/netstim.mod");

        assert_eq!(
            classifier.classify(&m, "NEURON { ARTIFICIAL_CELL NetStim }"),
            Classification::DirectPath
        );
        assert_eq!(
            classifier.classify(&m, "NEURON { SUFFIX hh }"),
            Classification::AcceleratedPath
        );
    }

    #[test]
    fn test_classification_is_pure() {
        let classifier = MarkerClassifier::new();
        let m = model("/mods/netstim.mod");
        let content = "NEURON { ARTIFICIAL_CELL NetStim }";

        assert_eq!(
            classifier.classify(&m, content),
            classifier.classify(&m, content)
        );
    }

    #[test]
    fn test_partition_is_disjoint_and_total() {
        let fs = MockFileSystem::new();
        fs.add_file("/mods/netstim.mod", "ARTIFICIAL_CELL NetStim");
        fs.add_file("/mods/hh.mod", "SUFFIX hh");
        fs.add_file("/mods/expsyn.mod", "POINT_PROCESS ExpSyn");

        let files = vec![
            model("/mods/expsyn.mod"),
            model("/mods/hh.mod"),
            model("/mods/netstim.mod"),
        ];
        let partition = partition(&fs, &MarkerClassifier::new(), files.clone()).unwrap();

        assert_eq!(partition.len(), files.len());
        assert_eq!(partition.direct.len(), 1);
        assert_eq!(partition.accelerated.len(), 2);
        for f in &files {
            let in_direct = partition.direct.contains(f);
            let in_accelerated = partition.accelerated.contains(f);
            assert!(in_direct != in_accelerated);
        }
    }

    #[test]
    fn test_partition_preserves_discovery_order() {
        let fs = MockFileSystem::new();
        fs.add_file("/mods/b.mod", "");
        fs.add_file("/mods/a.mod", "");

        let files = vec![model("/mods/b.mod"), model("/mods/a.mod")];
        let result = partition(&fs, &MarkerClassifier::new(), files).unwrap();

        let stems: Vec<_> = result.accelerated.iter().map(|m| m.stem()).collect();
        assert_eq!(stems, vec!["b", "a"]);
    }

    #[test]
    fn test_unreadable_file_aborts_run() {
        let fs = MockFileSystem::new();
        fs.add_file("/mods/a.mod", "");

        let files = vec![model("/mods/a.mod"), model("/mods/missing.mod")];
        assert!(partition(&fs, &MarkerClassifier::new(), files).is_err());
    }

    #[test]
    fn test_all_direct_skips_content_reads() {
        let files = vec![model("/mods/a.mod"), model("/mods/b.mod")];
        let partition = Partition::all_direct(files);

        assert!(partition.accelerated.is_empty());
        assert_eq!(partition.direct.len(), 2);
    }

    #[test]
    fn test_custom_marker() {
        let classifier = MarkerClassifier::with_marker("POINT_PROCESS");
        let m = model("/mods/expsyn.mod");

        assert_eq!(
            classifier.classify(&m, "POINT_PROCESS ExpSyn"),
            Classification::DirectPath
        );
    }
}
