//! Output capabilities used by the tree generator.
//!
//! Generation only ever needs two operations, creating a directory and
//! writing a file, so they sit behind the [`TreeWriter`] trait:
//!
//! | Writer | Used by |
//! |---|---|
//! | [`DiskWriter`] | `generate`: writes the real tree |
//! | [`MemoryWriter`] | `check` (dry run) and tests: records every operation in order |
//!
//! The trait requires `Sync` so a single writer can be shared by sibling
//! subtrees generated on rayon workers.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait TreeWriter: Sync {
    /// Create `path` and any missing parents. Succeeds if it already exists.
    fn create_dir(&self, path: &Path) -> Result<(), WriteError>;

    /// Create or truncate the file at `path` with `content`.
    fn write_file(&self, path: &Path, content: &str) -> Result<(), WriteError>;
}

/// Writes straight to the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskWriter;

impl TreeWriter for DiskWriter {
    fn create_dir(&self, path: &Path) -> Result<(), WriteError> {
        fs::create_dir_all(path).map_err(|source| WriteError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), WriteError> {
        fs::write(path, content).map_err(|source| WriteError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A single recorded writer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    CreateDir(PathBuf),
    WriteFile { path: PathBuf, content: String },
}

impl WriteOp {
    pub fn path(&self) -> &Path {
        match self {
            WriteOp::CreateDir(path) => path,
            WriteOp::WriteFile { path, .. } => path,
        }
    }
}

/// Records operations without touching the filesystem.
///
/// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    operations: Mutex<Vec<WriteOp>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, op: WriteOp) {
        self.operations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(op);
    }

    /// Every recorded operation, in call order.
    pub fn operations(&self) -> Vec<WriteOp> {
        self.operations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Final content of every written file. Later writes win.
    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                WriteOp::WriteFile { path, content } => Some((path, content)),
                WriteOp::CreateDir(_) => None,
            })
            .collect()
    }

    /// Final content of the file at `path`, if it was written.
    pub fn file(&self, path: &Path) -> Option<String> {
        self.files().remove(path)
    }

    /// Paths of written files, in write order.
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                WriteOp::WriteFile { path, .. } => Some(path),
                WriteOp::CreateDir(_) => None,
            })
            .collect()
    }
}

impl TreeWriter for MemoryWriter {
    fn create_dir(&self, path: &Path) -> Result<(), WriteError> {
        self.record(WriteOp::CreateDir(path.to_path_buf()));
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), WriteError> {
        self.record(WriteOp::WriteFile {
            path: path.to_path_buf(),
            content: content.to_string(),
        });
        Ok(())
    }
}
