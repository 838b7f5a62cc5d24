//! The network GET primitive used by the fetch cache.

use crate::fetch_cache::error::TransportError;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Performs a blocking HTTP GET.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; only failures to get a response at all are errors.
pub trait HttpTransport {
    fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        (**self).get(url, headers, query)
    }
}

/// [`HttpTransport`] backed by `reqwest`'s blocking client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .query(query)
            .send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?.to_vec();
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
