//! Shared file I/O for the font cache directory.

use std::{
    fs::{File, create_dir_all},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{FontError, Result};

/// Result of a create-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was written and moved into place.
    Written(u64),
    /// Another writer put the file in place first.
    AlreadyExists,
}

#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes through a temp file in the same directory, then links it into
    /// place without replacing an existing file.
    ///
    /// Errors from `f` are returned as is; the temp file is removed.
    pub fn write_with(&self, f: impl FnOnce(&mut File) -> Result<u64>) -> Result<WriteOutcome> {
        let dir = self.parent_dir();
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| FontError::io(dir, e))?;
        let written = f(tmp.as_file_mut())?;
        tmp.as_file().sync_all().map_err(|e| FontError::io(&self.path, e))?;

        match tmp.persist_noclobber(&self.path) {
            Ok(_) => Ok(WriteOutcome::Written(written)),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                debug!("{} was written concurrently, keeping it", self.path.display());
                Ok(WriteOutcome::AlreadyExists)
            }
            Err(e) => Err(FontError::io(&self.path, e.error)),
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl AsRef<Path> for CacheFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir).map_err(|e| FontError::io(dir, e))
}

/// Last path segment of a `/`-separated name, if any.
pub fn basename(name: &str) -> Option<&str> {
    name.rsplit(['/', '\\']).next().filter(|s| !s.is_empty())
}
