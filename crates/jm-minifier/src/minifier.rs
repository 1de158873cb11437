//! Minifier front door: wires source, engine and sink together for one pass.

use crate::engine::Engine;
use crate::reader::RawReader;
use jm_core::{Diagnostic, DiagnosticSink, MinifyConfig, MinifyError, Result};
use serde::Serialize;
use std::io::{BufReader, BufWriter, Read, Write};

/// Result of a pass as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// Statistics and diagnostics for one pass.
#[derive(Debug, Clone, Serialize)]
pub struct MinifyReport {
    pub source: Option<String>,
    pub input_len: u64,
    pub output_len: u64,
    pub bom_stripped: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl MinifyReport {
    pub fn outcome(&self) -> Outcome {
        if self.diagnostics.is_empty() {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome() == Outcome::Success
    }

    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 { return 1.0; }
        self.output_len as f64 / self.input_len as f64
    }

    pub fn reduction_pct(&self) -> f64 {
        if self.input_len == 0 { return 0.0; }
        (1.0 - self.ratio()) * 100.0
    }
}

/// Minified text plus its report.
#[derive(Debug, Clone)]
pub struct Minified {
    pub output: String,
    pub report: MinifyReport,
}

/// Streaming script minifier.
#[derive(Debug, Clone, Default)]
pub struct Minifier {
    pub config: MinifyConfig,
}

impl Minifier {
    pub fn new(config: MinifyConfig) -> Self {
        Self { config }
    }

    /// Minify `source` into `sink` in a single pass.
    ///
    /// A diagnostic does not make this return `Err`: the pass stops, whatever
    /// was emitted before the fault is flushed to `sink`, the diagnostic goes to
    /// `diagnostics`, and the report's outcome is `Failure`. No trailing
    /// newline is appended after a fault.
    pub fn minify<R: Read, W: Write>(
        &self,
        source: R,
        sink: W,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<MinifyReport> {
        let mut reader = RawReader::new(BufReader::new(source));
        let bom_stripped = self.config.strip_bom && reader.skip_bom()?;

        let mut engine = Engine::new(reader, BufWriter::new(sink));
        let fault = engine.run()?;
        if fault.is_none() && self.config.trailing_newline {
            engine.finish_line()?;
        }
        engine.flush()?;

        let mut report = MinifyReport {
            source: self.config.source_name.clone(),
            input_len: engine.consumed(),
            output_len: engine.written(),
            bom_stripped,
            diagnostics: Vec::new(),
        };
        if let Some(fault) = fault {
            let mut diagnostic = Diagnostic::new(fault.kind, fault.offset, fault.line);
            if let Some(name) = &self.config.source_name {
                diagnostic = diagnostic.with_source(name.as_str());
            }
            diagnostics.report(&diagnostic);
            report.diagnostics.push(diagnostic);
        }

        tracing::debug!(
            source = report.source.as_deref().unwrap_or("<stdin>"),
            input = report.input_len,
            output = report.output_len,
            bom_stripped,
            outcome = ?report.outcome(),
            "minified"
        );
        Ok(report)
    }

    /// Minify an in-memory script.
    pub fn minify_str(&self, text: &str) -> Result<Minified> {
        let mut buf = Vec::with_capacity(text.len());
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let report = self.minify(text.as_bytes(), &mut buf, &mut diagnostics)?;
        let output = String::from_utf8(buf).map_err(|e| MinifyError::InvalidUtf8(e.to_string()))?;
        Ok(Minified { output, report })
    }
}

/// Minify with default settings, logging diagnostics through `tracing`.
pub fn minify<R: Read, W: Write>(source: R, sink: W) -> Result<Outcome> {
    let report = Minifier::default().minify(source, sink, &mut jm_core::TracingSink)?;
    Ok(report.outcome())
}
