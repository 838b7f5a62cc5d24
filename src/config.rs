//! Client configuration: where to fetch from, what to send, where to store.

use crate::error::YrError;
use crate::types::endpoint::Endpoint;
use crate::utils::get_cache_dir;
use bon::Builder;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.met.no/weatherapi/";

const DEFAULT_USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (+https://crates.io/crates/yr_to_polars)"
);

/// Headers sent with every request unless overridden.
///
/// met.no asks that the User-Agent identify the application and a way to
/// contact its owner, so applications should replace the default one.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Configuration shared by the fetch cache and the history store.
///
/// # Examples
///
/// ```
/// use reqwest::header::{HeaderValue, USER_AGENT};
/// use yr_to_polars::YrConfig;
///
/// let mut headers = yr_to_polars::default_headers();
/// headers.insert(USER_AGENT, HeaderValue::from_static("my-weather-station/1.0 me@example.org"));
///
/// let config = YrConfig::builder()
///     .storage_root(std::env::temp_dir().join("yr-cache"))
///     .default_headers(headers)
///     .build();
/// assert_eq!(config.base_url, "https://api.met.no/weatherapi/");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct YrConfig {
    /// Prefix every endpoint path is appended to.
    #[builder(default = DEFAULT_BASE_URL.to_string(), into)]
    pub base_url: String,
    #[builder(default = default_headers())]
    pub default_headers: HeaderMap,
    /// Directory holding the `.json` response cache and `.parquet` history files.
    #[builder(into)]
    pub storage_root: PathBuf,
}

impl YrConfig {
    /// Default configuration storing files in the user's cache directory
    /// (e.g. `~/.cache/yr_to_polars_cache` on Linux).
    pub fn with_default_storage() -> Result<Self, YrError> {
        let storage_root = get_cache_dir().map_err(YrError::CacheDirResolution)?;
        Ok(Self::builder().storage_root(storage_root).build())
    }

    pub(crate) fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.path_segment()
        )
    }
}
