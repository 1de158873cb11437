//! Streaming script minifier.
//!
//! Layers, bottom-up:
//! 1. Raw reader: normalized bytes with one byte of pushback
//! 2. Scanner: strips `//` and `/* */` comments
//! 3. Engine: decides, per pair of tokens, whether a separator survives,
//!    and streams string, template and regex literals through verbatim
//!
//! Output is produced incrementally; nothing buffers the whole input.

pub mod action;
pub mod emitter;
pub mod engine;
pub mod literal;
pub mod minifier;
pub mod reader;
pub mod scanner;

pub use jm_core::{Diagnostic, DiagnosticKind, DiagnosticSink, MinifyConfig, MinifyError};
pub use minifier::{minify, Minified, Minifier, MinifyReport, Outcome};
