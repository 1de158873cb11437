//! Comment-stripping scanner over the raw reader.

use crate::reader::RawReader;
use jm_core::DiagnosticKind;
use std::io::{self, BufRead};

/// Returns the next byte that is not part of a comment and remembers the
/// last two results for the operator-gluing guard.
pub struct Scanner<R> {
    reader: RawReader<R>,
    x: Option<u8>,
    y: Option<u8>,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: RawReader<R>) -> Self {
        Self { reader, x: None, y: None }
    }

    /// Next significant byte.
    ///
    /// A `//` comment yields its terminating newline (or end-of-stream).
    /// A `/* */` comment yields a single space so the tokens around it never glue.
    pub fn next_token(&mut self) -> io::Result<Option<u8>> {
        let mut c = self.reader.read()?;
        if c == Some(b'/') {
            match self.reader.peek()? {
                Some(b'/') => c = self.skip_line_comment()?,
                Some(b'*') => c = self.skip_block_comment()?,
                _ => {}
            }
        }
        self.y = self.x;
        self.x = c;
        Ok(c)
    }

    fn skip_line_comment(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.read()? {
                Some(c) if c > b'\n' => {}
                end => return Ok(end),
            }
        }
    }

    fn skip_block_comment(&mut self) -> io::Result<Option<u8>> {
        self.reader.read()?;
        loop {
            match self.reader.read()? {
                Some(b'*') => {
                    if self.reader.peek()? == Some(b'/') {
                        self.reader.read()?;
                        return Ok(Some(b' '));
                    }
                }
                Some(_) => {}
                None => {
                    self.reader.halt(DiagnosticKind::UnterminatedComment);
                    return Ok(None);
                }
            }
        }
    }

    /// The byte returned two scans ago.
    pub fn y(&self) -> Option<u8> {
        self.y
    }

    pub fn reader(&self) -> &RawReader<R> {
        &self.reader
    }

    /// Raw access for literal copying, which must bypass comment detection.
    pub fn reader_mut(&mut self) -> &mut RawReader<R> {
        &mut self.reader
    }
}
