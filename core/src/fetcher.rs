//! Single-shot GET with status validation and streamed lines.
//!
//! # Design
//! `HttpFetcher` holds only its transport and keeps no state between calls.
//! A call runs connect, send, validate, stream, release in that order. The
//! one branch is the status check: anything but 200 returns before the body
//! is touched, and the connection is dropped on the way out.

use std::io::Write;

use log::{debug, warn};

use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest};
use crate::lines::BodyLines;
use crate::transport::{Connection, Transport, UreqTransport};

/// Outcome of `HttpFetcher::fetch_to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// Lines written to the sink, malformed ones included.
    pub lines: usize,
    /// Lines that were not valid UTF-8 and were written lossily.
    pub malformed: usize,
}

/// Blocking HTTP GET client that streams the response body as lines.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher<T = UreqTransport> {
    transport: T,
}

impl HttpFetcher<UreqTransport> {
    pub fn new() -> Self {
        Self::with_transport(UreqTransport::new())
    }
}

impl<T: Transport> HttpFetcher<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn build_request(&self, url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// GET `url` and return its body as lazy lines.
    ///
    /// Fails with `HttpStatus` for any status other than 200 without reading
    /// the body. The returned iterator owns the connection.
    pub fn fetch(
        &self,
        url: &str,
    ) -> Result<BodyLines<<T::Connection as Connection>::Body>, FetchError> {
        let request = self.build_request(url);
        let conn = self.transport.open(&request)?;
        let code = conn.status();
        debug!("{url} answered {code}");
        if code != 200 {
            return Err(FetchError::HttpStatus { code });
        }
        Ok(BodyLines::new(conn.into_body()))
    }

    /// GET `url` and write each body line, newline-terminated, to `sink` as
    /// soon as it is read.
    ///
    /// Lines that are not valid UTF-8 are written with replacement characters
    /// and counted in `FetchReport::malformed`. Nothing is written when the
    /// request itself fails.
    pub fn fetch_to<W: Write>(&self, url: &str, sink: &mut W) -> Result<FetchReport, FetchError> {
        let mut lines = self.fetch(url)?;
        let mut report = FetchReport::default();
        while let Some(bytes) = lines.next_bytes() {
            let bytes = bytes?;
            match std::str::from_utf8(&bytes) {
                Ok(text) => writeln!(sink, "{text}").map_err(FetchError::Output)?,
                Err(source) => {
                    let err = FetchError::Decoding {
                        line: lines.line_number(),
                        source,
                    };
                    warn!("{err}: {source}");
                    writeln!(sink, "{}", String::from_utf8_lossy(&bytes))
                        .map_err(FetchError::Output)?;
                    report.malformed += 1;
                }
            }
            report.lines += 1;
        }
        drop(lines);
        debug!("{url}: {} lines, connection released", report.lines);
        sink.flush().map_err(FetchError::Output)?;
        Ok(report)
    }
}
