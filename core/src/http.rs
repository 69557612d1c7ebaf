//! HTTP request descriptor.
//!
//! # Design
//! The request is described as plain data before any I/O happens, so the
//! exact method, URL and headers that reach the transport can be asserted in
//! tests without opening a socket. Fields use owned types so a descriptor can
//! be built once and handed to any `Transport` implementation.

/// HTTP method for a request. Only retrieval is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `HttpFetcher::build_request`; executed by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
