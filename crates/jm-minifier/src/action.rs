//! Separator decisions as plain data.
//!
//! The engine only ever does one of three things with the pair `(a, b)`:
//! write `a` and move on, drop `a` and move on, or drop `b` and fetch another.
//! Which one is decided here, without touching any I/O.

/// A newline before one of these can start a new statement, so it is kept.
pub const NEWLINE_KEPT_BEFORE: &[u8] = b"{[(+-!~";

/// A newline after one of these can end a statement, so it is kept.
pub const NEWLINE_KEPT_AFTER: &[u8] = b"}])+-\"'`";

/// After one of these a `/` cannot be division: it opens a regex literal.
pub const REGEX_PRECEDERS: &[u8] = b"(,=:[!&|?+-~*/{\n";

/// Operators that would read back as `++`, `--`, `**` or a comment if glued.
pub const GLUE_OPERATORS: &[u8] = b"+-*/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Write `a`, then advance.
    Commit,
    /// Drop `a`: copy `b` into `a` and refill `b`.
    Advance,
    /// Drop `b` and fetch the next token into it.
    Refill,
}

/// Letters, digits, `_`, `$`, backslash, and every byte above 126.
pub fn is_identifier_byte(c: Option<u8>) -> bool {
    match c {
        Some(c) => c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c == b'\\' || c > 126,
        None => false,
    }
}

/// Decide what to do with the settled byte `a` given the candidate `b`.
pub fn decide(a: u8, b: Option<u8>) -> Action {
    match a {
        b' ' => keep_if(is_identifier_byte(b), Action::Advance),
        b'\n' => match b {
            Some(c) if NEWLINE_KEPT_BEFORE.contains(&c) => Action::Commit,
            Some(b' ') => Action::Refill,
            _ => keep_if(is_identifier_byte(b), Action::Advance),
        },
        _ => match b {
            Some(b' ') => keep_if(is_identifier_byte(Some(a)), Action::Refill),
            Some(b'\n') => keep_if(
                NEWLINE_KEPT_AFTER.contains(&a) || is_identifier_byte(Some(a)),
                Action::Refill,
            ),
            _ => Action::Commit,
        },
    }
}

fn keep_if(keep: bool, otherwise: Action) -> Action {
    if keep {
        Action::Commit
    } else {
        otherwise
    }
}

/// Separator to restore after writing `a`, when `a` and `b` are both
/// arithmetic operators and the scan history shows an elided space or newline.
pub fn glue_separator(a: Option<u8>, b: Option<u8>, y: Option<u8>) -> Option<u8> {
    let is_op = |c: Option<u8>| c.is_some_and(|c| GLUE_OPERATORS.contains(&c));
    match y {
        Some(sep @ (b' ' | b'\n')) if is_op(a) && is_op(b) => Some(sep),
        _ => None,
    }
}

/// Whether a `/` following `a` opens a regex literal.
pub fn opens_regex(a: u8) -> bool {
    REGEX_PRECEDERS.contains(&a)
}

/// String and template literal delimiters.
pub fn is_quote(c: u8) -> bool {
    matches!(c, b'\'' | b'"' | b'`')
}
