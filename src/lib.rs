//! Cached access to the [met.no](https://api.met.no/) weather API with a local,
//! ever growing parquet history.
//!
//! Two pieces do the work and can be used on their own:
//!
//! * [`ConditionalFetcher`] returns a JSON response from disk while the
//!   server's `Expires` time has not passed, and otherwise asks the server
//!   with `If-Modified-Since` so it can answer 304 Not Modified.
//! * [`HistoryStore`] merges freshly parsed [`TimeRow`]s into the stored
//!   archive for a resource, one row per timestamp, newest data winning.
//!
//! [`YrClient`] combines them with parsers for the location forecast, nowcast
//! and air quality endpoints.

mod client;
mod config;
mod error;
mod fetch_cache;
mod history;
mod parsers;
mod resource_lock;
mod storage;
mod types;
mod utils;

#[cfg(test)]
mod test_support;

pub use client::{ForecastFrame, YrClient};
pub use config::{default_headers, YrConfig, DEFAULT_BASE_URL};
pub use error::YrError;

pub use fetch_cache::cache_entry::{CacheEntry, CachedResponse};
pub use fetch_cache::error::{FetchCacheError, TransportError};
pub use fetch_cache::fetcher::ConditionalFetcher;
pub use fetch_cache::http_date::{format_http_date, parse_http_date};
pub use fetch_cache::transport::{HttpResponse, HttpTransport, ReqwestTransport};

pub use history::archive::{merge_rows, HistoryArchive};
pub use history::error::HistoryError;
pub use history::frame::TIME_COLUMN;
pub use history::store::HistoryStore;

pub use parsers::error::ParseError;
pub use parsers::{parse_airquality, parse_location_forecast, parse_nowcast, parse_rows};

pub use storage::FileStore;

pub use types::endpoint::{AreaClass, Endpoint};
pub use types::query_params::{ParamValue, QueryParams};
pub use types::resource_id::{InvalidResourceId, ResourceId};
pub use types::time_row::{FieldValue, TimeRow};
