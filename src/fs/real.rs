use super::{DirEntry, FileSystem, FileType};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let entries = fs::read_dir(path).context(format!("Failed to read directory {:?}", path))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = if path.is_dir() {
                FileType::Directory
            } else {
                FileType::File
            };

            result.push(DirEntry {
                path,
                name,
                file_type,
            });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_dir_lists_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.mod"), "NEURON {}").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let fs_impl = RealFileSystem::new();
        let entries = fs_impl.read_dir(dir.path()).unwrap();

        assert_eq!(entries.len(), 2);
        let file = entries.iter().find(|e| e.file_name() == "a.mod").unwrap();
        assert!(file.is_file());
        let sub = entries.iter().find(|e| e.file_name() == "sub").unwrap();
        assert!(!sub.is_file());
    }

    #[test]
    fn test_read_to_string_missing_file() {
        let fs_impl = RealFileSystem::new();
        let result = fs_impl.read_to_string(Path::new("/nonexistent/never.mod"));
        assert!(result.is_err());
    }
}
