use super::{DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct MockEntry {
    content: Option<String>,
    file_type: FileType,
}

/// In-memory filesystem for tests
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut files = self.files.write().unwrap();
        Self::ensure_parents(&mut files, path.as_ref());
    }

    fn ensure_parents(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap()
            .get(path)
            .map(|e| e.file_type == FileType::Directory)
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.files.read().unwrap();
        match files.get(path) {
            Some(MockEntry {
                content: Some(content),
                ..
            }) => Ok(content.clone()),
            Some(_) => Err(anyhow!("Not a file: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let files = self.files.read().unwrap();

        if !files.contains_key(path) {
            return Err(anyhow!("Directory not found: {:?}", path));
        }

        let mut result = Vec::new();
        for (entry_path, entry) in files.iter() {
            if entry_path.parent() == Some(path) {
                let name = entry_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                result.push(DirEntry {
                    path: entry_path.clone(),
                    name,
                    file_type: entry.file_type,
                });
            }
        }

        Ok(result)
    }
}
