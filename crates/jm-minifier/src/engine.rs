//! Minifying engine: the `(a, b)` state machine.

use crate::action::{self, Action};
use crate::emitter::Emitter;
use crate::literal;
use crate::reader::{Fault, RawReader};
use crate::scanner::Scanner;
use std::io::{self, BufRead, Write};

/// Single-pass state. `a` is settled (written or about to be), `b` is the
/// next comment-stripped candidate.
pub struct Engine<R, W> {
    scanner: Scanner<R>,
    out: Emitter<W>,
    a: Option<u8>,
    b: Option<u8>,
}

impl<R: BufRead, W: Write> Engine<R, W> {
    pub fn new(reader: RawReader<R>, out: W) -> Self {
        Self {
            scanner: Scanner::new(reader),
            out: Emitter::new(out),
            a: None,
            b: None,
        }
    }

    /// Run until `a` reaches end-of-stream. Returns the fault that halted
    /// the scan, if any. Only I/O failures are errors.
    pub fn run(&mut self) -> io::Result<Option<Fault>> {
        self.a = Some(b'\n');
        self.refill()?;
        while let Some(a) = self.a {
            match action::decide(a, self.b) {
                Action::Commit => self.commit()?,
                Action::Advance => self.advance()?,
                Action::Refill => self.refill()?,
            }
        }
        Ok(self.scanner.reader().fault())
    }

    /// Write `a`, restoring an elided separator between two operators, then advance.
    fn commit(&mut self) -> io::Result<()> {
        if let Some(a) = self.a {
            self.out.put_settled(a)?;
        }
        if let Some(sep) = action::glue_separator(self.a, self.b, self.scanner.y()) {
            self.out.put(sep)?;
        }
        self.advance()
    }

    /// Move `b` into `a`, streaming a string or template literal through if one starts.
    fn advance(&mut self) -> io::Result<()> {
        self.a = self.b;
        if let Some(delimiter) = self.a.filter(|&c| action::is_quote(c)) {
            self.a = literal::copy_quoted(self.scanner.reader_mut(), &mut self.out, delimiter)?;
            if self.a.is_none() {
                self.b = None;
                return Ok(());
            }
        }
        self.refill()
    }

    /// Fetch the next token into `b`; a `/` that cannot be division opens a regex literal.
    fn refill(&mut self) -> io::Result<()> {
        self.b = self.scanner.next_token()?;
        let Some(a) = self.a else { return Ok(()) };
        if self.b != Some(b'/') || !action::opens_regex(a) {
            return Ok(());
        }

        tracing::trace!(after = ?(a as char), "regex literal");
        self.out.put_settled(a)?;
        if matches!(a, b'/' | b'*') {
            self.out.put(b' ')?;
        }
        self.out.put(b'/')?;
        self.a = literal::copy_regex(self.scanner.reader_mut(), &mut self.out)?;
        self.b = if self.a.is_some() {
            self.scanner.next_token()?
        } else {
            None
        };
        Ok(())
    }

    /// Bytes written so far.
    pub fn written(&self) -> u64 {
        self.out.written()
    }

    /// Source bytes consumed so far.
    pub fn consumed(&self) -> u64 {
        self.scanner.reader().consumed()
    }

    /// Append the trailing newline.
    pub fn finish_line(&mut self) -> io::Result<()> {
        self.out.put(b'\n')
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
