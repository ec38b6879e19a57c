//! Compile diagnostics crossing the emit boundary.

use strum::Display;

/// Severity of a compile diagnostic.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    /// Informational message.
    Info,
    /// A warning; does not block emit.
    Warning,
    /// An error; blocks emit.
    Error,
}

/// One diagnostic reported by the host compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic severity.
    pub severity: DiagnosticSeverity,
    /// Compiler message, including the diagnostic id where the host provides one.
    pub message: String,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            message: message.into(),
        }
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            message: message.into(),
        }
    }
}

/// The result of a compile-emit call: bytes on success, diagnostics either way.
#[derive(Debug, Clone, Default)]
pub struct EmitOutput {
    /// The emitted binary, absent when compilation failed.
    pub bytes: Option<Vec<u8>>,
    /// All diagnostics the compile produced, in reported order.
    pub diagnostics: Vec<Diagnostic>,
}

impl EmitOutput {
    /// A successful emit with no diagnostics.
    #[must_use]
    pub fn success(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Some(bytes),
            diagnostics: Vec::new(),
        }
    }

    /// A failed emit carrying only diagnostics.
    #[must_use]
    pub fn failure(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            bytes: None,
            diagnostics,
        }
    }

    /// The error-severity diagnostics, in reported order.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == DiagnosticSeverity::Error)
    }
}
