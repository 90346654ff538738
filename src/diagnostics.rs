//! Diagnostics shared across every pipeline phase.
//!
//! Every phase collects `Diagnostic`s into one list rather than raising, so
//! a malformed piece of input never aborts the whole call early.

use serde::{Deserialize, Serialize};

use crate::span::{LineCol, Span};

/// Severity of a diagnostic. `Error` always empties the emitted code;
/// `Warning` is promoted to `Error` when `TransformOptions::strict` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Which phase produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Lexer,
    Parser,
    Analyzer,
    Transform,
    Emitter,
    Validator,
    Pipeline,
}

/// A single diagnostic produced by one phase of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub phase: Phase,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LineCol>,
    /// The byte span this diagnostic was raised at, if any. Resolved to
    /// `location` by the pipeline just before `transform()` returns (one
    /// `LineIndex` built per call, rather than every phase building its
    /// own) — never serialized, and never read back once `location` is
    /// populated.
    #[serde(skip)]
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn error(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            phase,
            message: message.into(),
            location: None,
            span: None,
        }
    }

    pub fn warning(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            phase,
            message: message.into(),
            location: None,
            span: None,
        }
    }

    pub fn info(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            phase,
            message: message.into(),
            location: None,
            span: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: LineCol) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Promote a warning to an error; used when `strict` mode is active.
    pub fn promote_if_warning(mut self) -> Self {
        if self.severity == Severity::Warning {
            self.severity = Severity::Error;
        }
        self
    }
}

/// True if any diagnostic in the list is `Severity::Error`.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}

/// Resolves every diagnostic's `span` to a `location`, in place, using one
/// shared `LineIndex`. Called once by `transform()` right before returning,
/// so every phase can raise a diagnostic against a byte span without
/// building its own line index.
pub fn resolve_locations(diagnostics: &mut [Diagnostic], line_index: &crate::span::LineIndex) {
    for diag in diagnostics {
        if diag.location.is_none() {
            if let Some(span) = diag.span {
                diag.location = Some(line_index.line_col(span.start));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promote_if_warning_only_touches_warnings() {
        let warn = Diagnostic::warning(Phase::Analyzer, "maybe undeclared").promote_if_warning();
        assert_eq!(warn.severity, Severity::Error);

        let info = Diagnostic::info(Phase::Parser, "note").promote_if_warning();
        assert_eq!(info.severity, Severity::Info);
    }

    #[test]
    fn has_errors_detects_error_severity() {
        let diags = vec![Diagnostic::warning(Phase::Lexer, "w")];
        assert!(!has_errors(&diags));
        let diags = vec![Diagnostic::error(Phase::Lexer, "e")];
        assert!(has_errors(&diags));
    }
}
