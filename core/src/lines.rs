//! Lazy line splitting over a response body.
//!
//! Lines end at `\n`, `\r\n` or a lone `\r`, and terminators are not part of
//! the yielded text. A terminator at the very end of the body does not start
//! another line, so an empty body yields nothing.

use std::io::{self, BufRead, BufReader, Read};
use std::iter::FusedIterator;

use log::trace;

use crate::error::FetchError;

/// Iterator over the lines of a response body.
///
/// Owns the body reader, and with it the underlying connection; the
/// connection is released when this value is dropped, whether or not every
/// line was consumed. The sequence is read once and cannot be restarted.
///
/// A line that is not valid UTF-8 is yielded as `FetchError::Decoding` and
/// iteration continues. A read failure is yielded as `FetchError::Transport`
/// and ends iteration.
pub struct BodyLines<R> {
    reader: BufReader<R>,
    line: usize,
    after_cr: bool,
    finished: bool,
}

impl<R: Read> BodyLines<R> {
    pub fn new(body: R) -> Self {
        Self {
            reader: BufReader::new(body),
            line: 0,
            after_cr: false,
            finished: false,
        }
    }

    /// Number of lines produced so far.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Next line as raw bytes, before any text decoding.
    pub(crate) fn next_bytes(&mut self) -> Option<io::Result<Vec<u8>>> {
        if self.finished {
            return None;
        }
        match self.read_line() {
            Ok(Some(bytes)) => {
                self.line += 1;
                trace!("line {}: {} bytes", self.line, bytes.len());
                Some(Ok(bytes))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }

    /// Read up to and past the next terminator. Returns `None` once the body
    /// is exhausted.
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let mut partial = false;
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if buf.is_empty() {
                return Ok(partial.then_some(line));
            }
            let mut start = 0;
            if self.after_cr {
                // `\r\n` is one terminator.
                self.after_cr = false;
                if buf[0] == b'\n' {
                    start = 1;
                }
            }
            match buf[start..].iter().position(|b| *b == b'\n' || *b == b'\r') {
                Some(offset) => {
                    let end = start + offset;
                    line.extend_from_slice(&buf[start..end]);
                    self.after_cr = buf[end] == b'\r';
                    self.reader.consume(end + 1);
                    return Ok(Some(line));
                }
                None => {
                    let len = buf.len();
                    line.extend_from_slice(&buf[start..]);
                    partial |= len > start;
                    self.reader.consume(len);
                }
            }
        }
    }
}

impl<R: Read> Iterator for BodyLines<R> {
    type Item = Result<String, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = match self.next_bytes()? {
            Ok(bytes) => bytes,
            Err(err) => return Some(Err(FetchError::Transport(err))),
        };
        Some(String::from_utf8(bytes).map_err(|e| FetchError::Decoding {
            line: self.line,
            source: e.utf8_error(),
        }))
    }
}

impl<R: Read> FusedIterator for BodyLines<R> {}
