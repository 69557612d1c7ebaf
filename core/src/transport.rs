//! Transport seam between the fetcher and the HTTP client library.
//!
//! # Design
//! A `Transport` turns an `HttpRequest` into an open `Connection`. The
//! connection, and after `into_body` its body reader, is the single owner of
//! the network resource; dropping whichever of the two currently holds it
//! releases the resource. Test doubles implement these traits to count opens
//! and releases without a network.

use std::io::Read;

use log::debug;

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest};

/// Executes requests and hands back open connections.
pub trait Transport {
    type Connection: Connection;

    /// Send `request` and wait for the response head.
    fn open(&self, request: &HttpRequest) -> Result<Self::Connection, FetchError>;
}

/// A response whose head has been received and whose body is still unread.
pub trait Connection {
    type Body: Read;

    fn status(&self) -> u16;

    /// Hand ownership of the connection over to the body reader.
    fn into_body(self) -> Self::Body;
}

/// Blocking transport backed by `ureq`.
///
/// Non-2xx statuses come back as ordinary responses so status policy stays
/// with the fetcher, and no idle connections are kept so that dropping a
/// body closes its socket.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_idle_connections(0)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    type Connection = UreqConnection;

    fn open(&self, request: &HttpRequest) -> Result<UreqConnection, FetchError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        debug!("{} {}", request.method.as_str(), request.url);
        let response = builder.call()?;
        Ok(UreqConnection { response })
    }
}

/// Open `ureq` response.
pub struct UreqConnection {
    response: ureq::http::Response<ureq::Body>,
}

impl Connection for UreqConnection {
    type Body = ureq::BodyReader<'static>;

    fn status(&self) -> u16 {
        self.response.status().as_u16()
    }

    fn into_body(self) -> Self::Body {
        self.response.into_body().into_reader()
    }
}
