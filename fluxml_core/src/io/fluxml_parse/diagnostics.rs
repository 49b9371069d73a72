//! Non-fatal findings reported while a document is parsed
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// What the parser recovered from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// An attribute (or the element text) couldn't be converted, the default was used instead
    DefaultedAttribute {
        attribute: String,
        value: String,
        expected: &'static str,
    },
    /// Label text isn't a number, it was kept as a textual expression
    LabelValueRetained { value: String },
    /// MathML content was found and dropped
    MathMlSkipped,
    /// Date text doesn't match `YYYY-MM-DD HH:MM:SS`
    UnparsedDate { value: String },
    /// Signature text isn't valid base64
    UnparsedSignature { reason: String },
}

/// A single finding, along with the element it was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Local tag name of the element
    pub element: String,
    pub kind: DiagnosticKind,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::DefaultedAttribute {
                attribute,
                value,
                expected,
            } => write!(
                f,
                "<{}>: could not convert `{}` = {:?} to {}, using the default",
                self.element, attribute, value, expected
            ),
            DiagnosticKind::LabelValueRetained { value } => write!(
                f,
                "<{}>: value {:?} is not a number, keeping it as an expression",
                self.element, value
            ),
            DiagnosticKind::MathMlSkipped => {
                write!(f, "<{}>: MathML content is not supported, skipped", self.element)
            }
            DiagnosticKind::UnparsedDate { value } => write!(
                f,
                "<{}>: {:?} is not a `YYYY-MM-DD HH:MM:SS` date, ignored",
                self.element, value
            ),
            DiagnosticKind::UnparsedSignature { reason } => {
                write!(f, "<{}>: signature is not valid base64 ({})", self.element, reason)
            }
        }
    }
}

/// Receiver for the diagnostics of a parse
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Accumulate diagnostics so callers can inspect them after the parse
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forward diagnostics to the `log` facade at warn level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
    }
}
