//! Literal copying: strings, template literals and regex literals stream
//! through untouched, reading raw bytes so nothing inside them is taken for
//! a comment or a separator.
//!
//! Each routine returns the new settled byte: the closing delimiter when the
//! literal is closed, or `None` once it halted the reader.

use crate::emitter::Emitter;
use crate::reader::RawReader;
use jm_core::DiagnosticKind;
use std::io::{self, BufRead, Write};

/// Copy a quoted or template literal whose opening `delimiter` has just been read.
///
/// Writes the opening delimiter and the body. The closing delimiter is left
/// for the caller to commit.
pub fn copy_quoted<R: BufRead, W: Write>(
    reader: &mut RawReader<R>,
    out: &mut Emitter<W>,
    delimiter: u8,
) -> io::Result<Option<u8>> {
    out.put(delimiter)?;
    loop {
        match reader.read()? {
            Some(c) if c == delimiter => return Ok(Some(c)),
            Some(b'\\') => {
                out.put(b'\\')?;
                if !copy_escaped(reader, out)? {
                    return unterminated(reader, DiagnosticKind::UnterminatedStringLiteral);
                }
            }
            Some(c) => out.put(c)?,
            None => return unterminated(reader, DiagnosticKind::UnterminatedStringLiteral),
        }
    }
}

/// Copy a regex literal body after its opening `/` has been written.
///
/// Returns `Some(b'/')` for the closing slash, which is not written here.
pub fn copy_regex<R: BufRead, W: Write>(
    reader: &mut RawReader<R>,
    out: &mut Emitter<W>,
) -> io::Result<Option<u8>> {
    loop {
        match reader.read()? {
            Some(b'[') => {
                if !copy_class(reader, out)? {
                    return unterminated(reader, DiagnosticKind::UnterminatedCharacterClass);
                }
            }
            Some(b'/') => {
                if matches!(reader.peek()?, Some(b'/' | b'*')) {
                    return unterminated(reader, DiagnosticKind::UnterminatedRegexLiteral);
                }
                return Ok(Some(b'/'));
            }
            Some(b'\\') => {
                out.put(b'\\')?;
                if !copy_escaped(reader, out)? {
                    return unterminated(reader, DiagnosticKind::UnterminatedRegexLiteral);
                }
            }
            Some(c) => out.put(c)?,
            None => return unterminated(reader, DiagnosticKind::UnterminatedRegexLiteral),
        }
    }
}

/// Copy a `[...]` set, opening bracket included. `false` on end-of-stream.
fn copy_class<R: BufRead, W: Write>(
    reader: &mut RawReader<R>,
    out: &mut Emitter<W>,
) -> io::Result<bool> {
    out.put(b'[')?;
    loop {
        match reader.read()? {
            Some(b']') => {
                out.put(b']')?;
                return Ok(true);
            }
            Some(b'\\') => {
                out.put(b'\\')?;
                if !copy_escaped(reader, out)? {
                    return Ok(false);
                }
            }
            Some(c) => out.put(c)?,
            None => return Ok(false),
        }
    }
}

/// Copy the byte after a backslash without interpreting it.
fn copy_escaped<R: BufRead, W: Write>(
    reader: &mut RawReader<R>,
    out: &mut Emitter<W>,
) -> io::Result<bool> {
    match reader.read()? {
        Some(c) => {
            out.put(c)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn unterminated<R: BufRead>(
    reader: &mut RawReader<R>,
    kind: DiagnosticKind,
) -> io::Result<Option<u8>> {
    reader.halt(kind);
    Ok(None)
}
