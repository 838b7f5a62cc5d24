pub mod cache_entry;
pub mod error;
pub mod fetcher;
pub mod http_date;
pub mod transport;
