//! FileSystem abstraction for testable file operations
//!
//! The Version Resolver, deprecation scanner and Fix Applicator touch the
//! disk only through [`FileSystem`], so tests can count reads and writes.

mod mock;
mod real;

pub use mock::MockFileSystem;
pub use real::RealFileSystem;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replaces the file's content
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    fn join(&self, base: &Path, path: &str) -> PathBuf {
        base.join(path)
    }
}
