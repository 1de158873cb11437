//! Forward-only output with a byte count.

use std::io::{self, Write};

pub struct Emitter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> Emitter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn put(&mut self, c: u8) -> io::Result<()> {
        self.inner.write_all(&[c])?;
        self.written += 1;
        Ok(())
    }

    /// Write a settled byte. A newline with nothing before it carries no
    /// meaning and is skipped.
    pub fn put_settled(&mut self, c: u8) -> io::Result<()> {
        if c == b'\n' && self.written == 0 {
            return Ok(());
        }
        self.put(c)
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
