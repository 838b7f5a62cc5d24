//! File storage shared by the fetch cache and the history store: one file per
//! resource identifier, replaced atomically.

use crate::types::resource_id::ResourceId;
use log::debug;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &ResourceId, extension: &str) -> PathBuf {
        self.root.join(id.file_name(extension))
    }

    /// Reads the whole file, or `None` if it does not exist.
    pub fn read_if_exists(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Opens the file for reading, or `None` if it does not exist.
    pub fn open_if_exists(&self, path: &Path) -> io::Result<Option<File>> {
        match File::open(path) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Replaces `path` with `contents`. Either the full new contents end up at
    /// `path` or the previous file is left as it was.
    pub fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let dir = path.parent().unwrap_or(self.root.as_path());
        fs::create_dir_all(dir)?;

        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(contents)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path)?;
        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}
