//! Blocking, single-shot JSON fetcher.
//!
//! # Overview
//! `HttpFetcher` sends one GET with `Accept: application/json`, rejects any
//! status other than 200, and streams the response body line by line, either
//! as a lazy iterator (`fetch`) or straight into a writer (`fetch_to`).
//!
//! # Design
//! - The request is built as plain data (`HttpRequest`) before any I/O.
//! - I/O goes through the `Transport` trait; `UreqTransport` is the real one.
//! - The open connection has exactly one owner at a time, so it is released
//!   once on every path by `Drop`.
//! - There is no timeout, retry or connection reuse.

pub mod error;
pub mod fetcher;
pub mod http;
pub mod lines;
pub mod transport;

pub use error::FetchError;
pub use fetcher::{FetchReport, HttpFetcher};
pub use http::{HttpMethod, HttpRequest};
pub use lines::BodyLines;
pub use transport::{Connection, Transport, UreqConnection, UreqTransport};
