//! Error types for the fetcher.
//!
//! # Design
//! `HttpStatus` carries only the observed code because the body of a failed
//! response is never read. Every fault below the HTTP layer (resolution,
//! connect, reset, a URL the client refuses, a read failure mid-body) is a
//! `Transport` error. `Decoding` is reported per line and does not end the
//! stream.

use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// Errors returned by `HttpFetcher` and yielded by `BodyLines`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a status other than 200.
    #[error("HTTP error code: {code}")]
    HttpStatus { code: u16 },

    /// The network stack or HTTP client failed.
    #[error("transport error")]
    Transport(#[from] io::Error),

    /// A body line was not valid UTF-8. `line` is 1-based.
    #[error("line {line} is not valid UTF-8")]
    Decoding {
        line: usize,
        #[source]
        source: Utf8Error,
    },

    /// Writing a line to the output sink failed.
    #[error("failed to write output")]
    Output(#[source] io::Error),
}

impl FetchError {
    /// True for errors after which the body stream can keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FetchError::Decoding { .. })
    }
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Io(io) => FetchError::Transport(io),
            other => FetchError::Transport(io::Error::other(other)),
        }
    }
}
