//! File sinks - where exported slides are saved

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Save-as boundary for finished files.
pub trait FileSink: Send + Sync {
    fn save_file(&self, bytes: &[u8], filename: &str) -> io::Result<()>;
}

/// Writes files into one output directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl FileSink for DirectorySink {
    fn save_file(&self, bytes: &[u8], filename: &str) -> io::Result<()> {
        // Only the final component is honored.
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid filename: {filename}")))?;
        fs::write(self.dir.join(name), bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Keeps saved files in memory, in save order.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<SavedFile>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Vec<SavedFile> {
        self.files.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn filenames(&self) -> Vec<String> {
        self.files().into_iter().map(|f| f.filename).collect()
    }
}

impl FileSink for MemorySink {
    fn save_file(&self, bytes: &[u8], filename: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SavedFile { filename: filename.to_string(), bytes: bytes.to_vec() });
        Ok(())
    }
}
