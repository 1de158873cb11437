//! Raw reader: one normalized byte at a time, with one byte of pushback.

use jm_core::DiagnosticKind;
use std::io::{self, BufRead};

const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// First fault raised during a pass, with the position it was detected at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    pub kind: DiagnosticKind,
    pub offset: u64,
    pub line: u64,
}

/// Byte source for the scanner. `None` is end-of-stream.
pub struct RawReader<R> {
    inner: R,
    // Outer `Some` means a pushed-back value is pending; it may itself be end-of-stream.
    lookahead: Option<Option<u8>>,
    fault: Option<Fault>,
    // Raw bytes taken from the source by `skip_bom` that were not a BOM, in reverse.
    replay: Vec<u8>,
    consumed: u64,
    line: u64,
    after_cr: bool,
}

impl<R: BufRead> RawReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lookahead: None,
            fault: None,
            replay: Vec::new(),
            consumed: 0,
            line: 1,
            after_cr: false,
        }
    }

    /// Next normalized byte: pending pushback first, then the source.
    ///
    /// Control bytes other than LF become a space and CR becomes LF.
    /// After a fault every read yields end-of-stream.
    pub fn read(&mut self) -> io::Result<Option<u8>> {
        if self.fault.is_some() {
            return Ok(None);
        }
        if let Some(pending) = self.lookahead.take() {
            return Ok(pending);
        }
        Ok(self.fetch()?.map(normalize))
    }

    /// Read the next byte and push it back.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        let c = self.read()?;
        self.lookahead = Some(c);
        Ok(c)
    }

    /// Drop a leading UTF-8 byte-order mark if the source starts with exactly one.
    pub fn skip_bom(&mut self) -> io::Result<bool> {
        if self.consumed > 0 || self.lookahead.is_some() || !self.replay.is_empty() {
            return Ok(false);
        }
        let mut head = Vec::with_capacity(BOM.len());
        while head.len() < BOM.len() {
            match self.pull()? {
                Some(c) if c == BOM[head.len()] => head.push(c),
                Some(c) => {
                    head.push(c);
                    break;
                }
                None => break,
            }
        }
        if head == BOM {
            self.consumed += BOM.len() as u64;
            return Ok(true);
        }
        head.reverse();
        self.replay = head;
        Ok(false)
    }

    /// Record a fault and stop the pass. Only the first fault is kept.
    pub fn halt(&mut self, kind: DiagnosticKind) {
        if self.fault.is_none() {
            tracing::trace!(?kind, offset = self.consumed, "scan halted");
            self.fault = Some(Fault {
                kind,
                offset: self.consumed,
                line: self.line,
            });
        }
        self.lookahead = None;
    }

    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    /// Source bytes consumed so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Next raw byte, counting position. CR, LF and CRLF each end one line.
    fn fetch(&mut self) -> io::Result<Option<u8>> {
        let c = match self.replay.pop() {
            Some(c) => Some(c),
            None => self.pull()?,
        };
        if let Some(c) = c {
            self.consumed += 1;
            if c == b'\r' || (c == b'\n' && !self.after_cr) {
                self.line += 1;
            }
            self.after_cr = c == b'\r';
        }
        Ok(c)
    }

    /// One byte straight from the source, retrying interrupted reads.
    fn pull(&mut self) -> io::Result<Option<u8>> {
        loop {
            let c = match self.inner.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if c.is_some() {
                self.inner.consume(1);
            }
            return Ok(c);
        }
    }
}

fn normalize(c: u8) -> u8 {
    match c {
        b'\n' => b'\n',
        b'\r' => b'\n',
        c if c < b' ' => b' ',
        c => c,
    }
}
