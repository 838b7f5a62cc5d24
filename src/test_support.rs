//! Scripted HTTP transport and response builders for unit tests.

use crate::fetch_cache::error::TransportError;
use crate::fetch_cache::http_date::format_http_date;
use crate::fetch_cache::transport::{HttpResponse, HttpTransport};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, EXPIRES, LAST_MODIFIED};
use reqwest::StatusCode;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
}

/// Replays queued responses in order and records every request it receives.
/// Running out of responses is reported as a connection failure.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: RefCell<VecDeque<HttpResponse>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: HttpResponse) {
        self.responses.borrow_mut().push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl HttpTransport for FakeTransport {
    fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            query: query.to_vec(),
        });
        self.responses.borrow_mut().pop_front().ok_or_else(|| {
            Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "no scripted response"))
                as TransportError
        })
    }
}

/// A JSON response carrying `Expires` and `Last-Modified` headers.
pub(crate) fn json_response(
    status: StatusCode,
    body: &Value,
    expires: DateTime<Utc>,
    last_modified: DateTime<Utc>,
) -> HttpResponse {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format_http_date(&expires)) {
        headers.insert(EXPIRES, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format_http_date(&last_modified)) {
        headers.insert(LAST_MODIFIED, value);
    }
    HttpResponse {
        status,
        headers,
        body: body.to_string().into_bytes(),
    }
}

pub(crate) fn empty_response(status: StatusCode) -> HttpResponse {
    HttpResponse {
        status,
        headers: HeaderMap::new(),
        body: Vec::new(),
    }
}
