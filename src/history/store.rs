use crate::history::archive::HistoryArchive;
use crate::history::error::HistoryError;
use crate::history::frame::{frame_to_rows, rows_to_frame};
use crate::storage::FileStore;
use crate::types::resource_id::ResourceId;
use crate::types::time_row::TimeRow;
use log::{debug, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};

const HISTORY_EXTENSION: &str = "parquet";

/// Keeps an ever growing, deduplicated parquet history per resource
/// identifier at `<storage_root>/<resource id>.parquet`.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    store: FileStore,
}

impl HistoryStore {
    pub fn new(storage_root: &Path) -> Self {
        Self {
            store: FileStore::new(storage_root),
        }
    }

    pub fn history_path(&self, resource_id: &ResourceId) -> PathBuf {
        self.store.path_for(resource_id, HISTORY_EXTENSION)
    }

    /// Loads the stored archive; an identifier without history yields an
    /// empty archive.
    pub fn load(&self, resource_id: &ResourceId) -> Result<HistoryArchive, HistoryError> {
        let path = self.history_path(resource_id);
        let Some(file) = self
            .store
            .open_if_exists(&path)
            .map_err(|e| HistoryError::CacheRead(path.clone(), e))?
        else {
            debug!("No history at {}", path.display());
            return Ok(HistoryArchive::default());
        };

        info!("Reading {}", path.display());
        let df = ParquetReader::new(file)
            .finish()
            .map_err(|e| HistoryError::ParquetRead(path.clone(), e))?;
        Ok(HistoryArchive::from_rows(frame_to_rows(&df)?))
    }

    /// Merges `new_rows` into the stored archive, writes the result back and
    /// returns it.
    ///
    /// Rows from `new_rows` replace stored rows with the same timestamp
    /// entirely. Merging the same rows twice leaves the archive as it was after
    /// the first merge. The file is replaced atomically, so a failed write
    /// leaves the previous history in place and is reported as an error.
    pub fn merge_and_persist(
        &self,
        resource_id: &ResourceId,
        new_rows: Vec<TimeRow>,
    ) -> Result<HistoryArchive, HistoryError> {
        let archive = self.load(resource_id)?.merge(new_rows);
        self.write(resource_id, &archive)?;
        Ok(archive)
    }

    fn write(&self, resource_id: &ResourceId, archive: &HistoryArchive) -> Result<(), HistoryError> {
        let path = self.history_path(resource_id);
        let mut df = rows_to_frame(archive.rows())?;

        let mut encoded = Vec::new();
        ParquetWriter::new(&mut encoded)
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut df)
            .map_err(|e| HistoryError::ParquetWrite(path.clone(), e))?;

        info!("Writing {} ({} rows)", path.display(), archive.len());
        self.store
            .write_atomic(&path, &encoded)
            .map_err(|e| HistoryError::CacheWrite(path, e))
    }
}
