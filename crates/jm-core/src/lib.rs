//! Shared vocabulary for the jsmin workspace: errors, diagnostics, configuration.

pub mod config;
pub mod diagnostic;
pub mod error;

pub use config::MinifyConfig;
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use error::{MinifyError, Result};
