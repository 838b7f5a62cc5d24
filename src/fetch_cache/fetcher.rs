use crate::config::default_headers;
use crate::fetch_cache::cache_entry::{CacheEntry, CachedResponse, EXPIRES_KEY, LAST_MODIFIED_KEY};
use crate::fetch_cache::error::FetchCacheError;
use crate::fetch_cache::http_date::parse_http_date;
use crate::fetch_cache::transport::{HttpResponse, HttpTransport, ReqwestTransport};
use crate::storage::FileStore;
use crate::types::query_params::QueryParams;
use crate::types::resource_id::ResourceId;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, EXPIRES, IF_MODIFIED_SINCE, LAST_MODIFIED,
    USER_AGENT,
};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const CACHE_EXTENSION: &str = "json";
const DEFAULT_ACCEPT: &str = "application/json";

/// Fetches JSON resources while honoring the server's `Expires` and
/// `Last-Modified` headers.
///
/// A stored response that has not expired is returned without touching the
/// network. An expired one is revalidated with `If-Modified-Since`, so the
/// server can answer 304 instead of resending the body. Every full response is
/// written to `<storage_root>/<resource id>.json` before it is returned.
pub struct ConditionalFetcher<T = ReqwestTransport> {
    transport: T,
    store: FileStore,
    default_headers: HeaderMap,
}

impl ConditionalFetcher<ReqwestTransport> {
    pub fn new(storage_root: &Path) -> Self {
        Self::with_transport(ReqwestTransport::new(), storage_root, default_headers())
    }
}

impl<T: HttpTransport> ConditionalFetcher<T> {
    pub fn with_transport(transport: T, storage_root: &Path, default_headers: HeaderMap) -> Self {
        Self {
            transport,
            store: FileStore::new(storage_root),
            default_headers,
        }
    }

    /// Returns the resource named by `resource_id`, from disk while it is still
    /// fresh and from `url` otherwise.
    ///
    /// `headers` are added on top of the configured default headers, and
    /// `Accept: application/json` is used when neither sets one. `params` are
    /// normalized (see [`QueryParams::normalized`]) before they are sent.
    /// Neither argument is modified.
    ///
    /// # Errors
    ///
    /// Network failures, error statuses, responses without valid `Expires` and
    /// `Last-Modified` headers, bodies that are not JSON objects, and storage
    /// failures are all returned as errors; in each case the stored entry is
    /// left as it was. An unreadable stored entry is not an error, it is
    /// treated as absent.
    pub fn fetch(
        &self,
        resource_id: &ResourceId,
        url: &str,
        headers: &HeaderMap,
        params: &QueryParams,
    ) -> Result<CachedResponse, FetchCacheError> {
        self.fetch_at(Utc::now(), resource_id, url, headers, params)
    }

    pub(crate) fn fetch_at(
        &self,
        now: DateTime<Utc>,
        resource_id: &ResourceId,
        url: &str,
        headers: &HeaderMap,
        params: &QueryParams,
    ) -> Result<CachedResponse, FetchCacheError> {
        let params = params.normalized();
        let mut headers = self.request_headers(headers);
        let cache_path = self.cache_path(resource_id);

        let previous = match self.load_entry(&cache_path)? {
            Some(entry) if entry.is_fresh_at(now) => {
                info!(
                    "Returning cached {} (expires {})",
                    cache_path.display(),
                    entry.expires
                );
                return Ok(CachedResponse::cached(entry));
            }
            Some(entry) => {
                debug!(
                    "Cache {} expired at {}, revalidating",
                    cache_path.display(),
                    entry.expires
                );
                match HeaderValue::from_str(&entry.last_modified) {
                    Ok(value) => {
                        headers.insert(IF_MODIFIED_SINCE, value);
                    }
                    Err(_) => warn!(
                        "Stored Last-Modified {:?} is not a valid header value, fetching unconditionally",
                        entry.last_modified
                    ),
                }
                Some(entry)
            }
            None => {
                debug!("No cache for {}, first request?", resource_id);
                None
            }
        };

        if !headers.contains_key(USER_AGENT) {
            return Err(FetchCacheError::MissingUserAgent(url.to_string()));
        }

        debug!("GET {} {:?}", url, params.to_pairs());
        let response = self
            .transport
            .get(url, &headers, &params.to_pairs())
            .map_err(|e| FetchCacheError::NetworkRequest(url.to_string(), e))?;

        if response.status == StatusCode::NOT_MODIFIED {
            return match previous {
                Some(entry) => {
                    info!(
                        "{}, no new data, returning cache {}",
                        response.status,
                        cache_path.display()
                    );
                    Ok(CachedResponse::cached(entry))
                }
                None => Err(FetchCacheError::UnexpectedNotModified(url.to_string())),
            };
        }
        if !response.status.is_success() {
            warn!("HTTP error for {}: {}", url, response.status);
            return Err(FetchCacheError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }
        if response.status == StatusCode::NON_AUTHORITATIVE_INFORMATION {
            warn!("Deprecation warning from {}: endpoint answered {}", url, response.status);
        }

        let entry = Self::entry_from_response(url, response)?;
        self.store_entry(&cache_path, &entry)?;
        Ok(CachedResponse::fetched(entry))
    }

    fn cache_path(&self, resource_id: &ResourceId) -> PathBuf {
        self.store.path_for(resource_id, CACHE_EXTENSION)
    }

    fn request_headers(&self, headers: &HeaderMap) -> HeaderMap {
        let mut merged = self.default_headers.clone();
        for (name, value) in headers {
            merged.insert(name.clone(), value.clone());
        }
        merged
            .entry(ACCEPT)
            .or_insert(HeaderValue::from_static(DEFAULT_ACCEPT));
        merged
    }

    fn load_entry(&self, path: &Path) -> Result<Option<CacheEntry>, FetchCacheError> {
        let Some(bytes) = self
            .store
            .read_if_exists(path)
            .map_err(|e| FetchCacheError::CacheRead(path.to_path_buf(), e))?
        else {
            return Ok(None);
        };
        debug!("Reading cache {}", path.display());
        match serde_json::from_slice::<CacheEntry>(&bytes) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!("Invalid cache {}, ignoring it: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn store_entry(&self, path: &Path, entry: &CacheEntry) -> Result<(), FetchCacheError> {
        let encoded = serde_json::to_vec(entry)
            .map_err(|e| FetchCacheError::CacheEncode(path.to_path_buf(), e))?;
        self.store
            .write_atomic(path, &encoded)
            .map_err(|e| FetchCacheError::CacheWrite(path.to_path_buf(), e))
    }

    fn entry_from_response(url: &str, response: HttpResponse) -> Result<CacheEntry, FetchCacheError> {
        let expires_raw = required_header(url, &response.headers, &EXPIRES, "Expires")?;
        let expires = parse_http_date(expires_raw).map_err(|_| FetchCacheError::InvalidHeader {
            url: url.to_string(),
            header: "Expires",
            value: expires_raw.to_string(),
        })?;
        let last_modified =
            required_header(url, &response.headers, &LAST_MODIFIED, "Last-Modified")?.to_string();

        let mut body: Map<String, Value> =
            serde_json::from_slice(&response.body).map_err(|e| FetchCacheError::Decode {
                url: url.to_string(),
                source: e,
            })?;
        // The stored record keeps the metadata at the top level next to the body.
        for key in [EXPIRES_KEY, LAST_MODIFIED_KEY] {
            if body.remove(key).is_some() {
                warn!("Response from {} has a top level {:?} field, replacing it", url, key);
            }
        }

        Ok(CacheEntry {
            body,
            expires,
            last_modified,
        })
    }
}

fn required_header<'a>(
    url: &str,
    headers: &'a HeaderMap,
    name: &HeaderName,
    label: &'static str,
) -> Result<&'a str, FetchCacheError> {
    let value = headers
        .get(name)
        .ok_or_else(|| FetchCacheError::MissingHeader {
            url: url.to_string(),
            header: label,
        })?;
    value.to_str().map_err(|_| FetchCacheError::InvalidHeader {
        url: url.to_string(),
        header: label,
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })
}
