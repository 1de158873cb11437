//! Diagnostics raised while scanning malformed input.
//!
//! A diagnostic marks a pass as failed without being a Rust error: the scan
//! halts, whatever was already emitted stays in the sink, and the caller
//! decides what a failure means.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unterminated constructs the scanner can run into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `/* ...` reached end-of-stream before `*/`.
    UnterminatedComment,
    /// A quoted or template literal reached end-of-stream before its delimiter.
    UnterminatedStringLiteral,
    /// A `[...]` set inside a regex literal reached end-of-stream before `]`.
    UnterminatedCharacterClass,
    /// A regex literal hit end-of-stream, or a comment opener, before its closing `/`.
    UnterminatedRegexLiteral,
}

impl DiagnosticKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnterminatedComment => "Unterminated comment.",
            Self::UnterminatedStringLiteral => "Unterminated string literal.",
            Self::UnterminatedCharacterClass => "Unterminated set in Regular Expression literal.",
            Self::UnterminatedRegexLiteral => "Unterminated Regular Expression literal.",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A located diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// File identifier, if the caller supplied one.
    pub source: Option<String>,
    /// Source bytes consumed when the fault was detected.
    pub offset: u64,
    /// 1-based line at the point of detection.
    pub line: u64,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, offset: u64, line: u64) -> Self {
        Self { kind, source: None, offset, line }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.source.as_deref().unwrap_or("<stdin>");
        write!(f, "{source}:{}: {}", self.line, self.kind)
    }
}

/// Reporting channel for diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

impl<F> DiagnosticSink for F
where
    F: FnMut(&Diagnostic),
{
    fn report(&mut self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Logs every diagnostic at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        tracing::error!(
            source = diagnostic.source.as_deref().unwrap_or("<stdin>"),
            line = diagnostic.line,
            offset = diagnostic.offset,
            "{}",
            diagnostic.kind
        );
    }
}
