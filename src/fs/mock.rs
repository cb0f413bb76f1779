use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-memory file system that counts every read and write.
///
/// Relative paths are resolved against the root (`/mock` by default).
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
    read_only: RwLock<HashSet<PathBuf>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            read_only: RwLock::new(HashSet::new()),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        self.files.write().unwrap().insert(path, content.to_string());
    }

    /// Subsequent writes to `path` fail
    pub fn set_read_only(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.read_only.write().unwrap().insert(path);
    }

    /// Current content without touching the read counter
    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = self.normalize_path(path.as_ref());
        self.files.read().unwrap().get(&path).cloned()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
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
        let path = self.normalize_path(path);
        self.files.read().unwrap().contains_key(&path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.exists(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let path = self.normalize_path(path);
        self.files
            .read()
            .unwrap()
            .get(&path)
            .cloned()
            .ok_or_else(|| anyhow!("File not found: {:?}", path))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let path = self.normalize_path(path);
        if self.read_only.read().unwrap().contains(&path) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }
        self.files.write().unwrap().insert(path, content.to_string());
        Ok(())
    }
}
