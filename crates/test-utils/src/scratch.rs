//! Scratch directories for tests that write files.

use std::path::PathBuf;

use tempfile::TempDir;

/// A temporary directory removed when dropped.
///
/// # Example
///
/// ```
/// use test_utils::ScratchDir;
///
/// let scratch = ScratchDir::new();
/// let path = scratch.file("schema.json");
/// std::fs::write(&path, "{}").unwrap();
/// assert!(path.exists());
/// ```
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a new scratch directory. Panics if the system temp dir is unusable.
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("climate-axis-test-")
            .tempdir()
            .expect("failed to create scratch directory");
        Self { dir }
    }

    /// Path of a file named `name` inside the scratch directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` to `name` and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        std::fs::write(&path, contents).expect("failed to write scratch file");
        path
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}

impl Default for ScratchDir {
    fn default() -> Self {
        Self::new()
    }
}
