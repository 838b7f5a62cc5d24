//! Caller-chosen keys naming one cached response and one history archive.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid resource identifier '{0}': must be non-empty and must not contain path separators or '..'")]
pub struct InvalidResourceId(pub String);

/// Identifies one (endpoint, query) pair on disk.
///
/// The identifier becomes a file stem inside the storage root, so anything that
/// could address a file outside of it is rejected. Uniqueness per request is
/// the caller's responsibility.
///
/// # Examples
///
/// ```
/// use yr_to_polars::ResourceId;
///
/// let id = ResourceId::new("yr-nowcast-59.7195-10.8358").unwrap();
/// assert_eq!(id.as_str(), "yr-nowcast-59.7195-10.8358");
/// assert!(ResourceId::new("../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidResourceId> {
        let id = id.into();
        let invalid = id.is_empty()
            || id.starts_with('.')
            || id.contains("..")
            || id.contains(['/', '\\', '\0']);
        if invalid {
            return Err(InvalidResourceId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name for this identifier with the given extension.
    pub(crate) fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ResourceId {
    type Error = InvalidResourceId;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
