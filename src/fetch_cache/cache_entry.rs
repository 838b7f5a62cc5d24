use crate::fetch_cache::http_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top level keys holding the cache metadata in a stored record.
pub(crate) const EXPIRES_KEY: &str = "Expires";
pub(crate) const LAST_MODIFIED_KEY: &str = "Last-Modified";

/// A response body together with the cache metadata the server sent with it.
///
/// On disk this is a single JSON object: the fields of the original body plus
/// top level `Expires` and `Last-Modified` entries holding HTTP-dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(flatten)]
    pub body: Map<String, Value>,
    #[serde(rename = "Expires", with = "http_date")]
    pub expires: DateTime<Utc>,
    /// Echoed back verbatim in `If-Modified-Since`.
    #[serde(rename = "Last-Modified")]
    pub last_modified: String,
}

impl CacheEntry {
    /// True while `expires` is strictly after `now`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }
}

/// What [`ConditionalFetcher::fetch`](crate::ConditionalFetcher::fetch) returns.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    pub entry: CacheEntry,
    /// `true` when no new data arrived: either the stored entry was still fresh
    /// or the server answered 304 Not Modified.
    pub was_cached: bool,
}

impl CachedResponse {
    pub(crate) fn cached(entry: CacheEntry) -> Self {
        Self {
            entry,
            was_cached: true,
        }
    }

    pub(crate) fn fetched(entry: CacheEntry) -> Self {
        Self {
            entry,
            was_cached: false,
        }
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.entry.body
    }
}
