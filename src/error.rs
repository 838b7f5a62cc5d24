use crate::fetch_cache::error::FetchCacheError;
use crate::history::error::HistoryError;
use crate::parsers::error::ParseError;
use crate::types::resource_id::InvalidResourceId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YrError {
    #[error(transparent)]
    FetchCache(#[from] FetchCacheError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    InvalidResourceId(#[from] InvalidResourceId),

    #[error("Failed to create storage directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}
