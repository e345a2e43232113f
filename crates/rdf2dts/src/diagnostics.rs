//! Non-fatal findings collected during a single compilation run.
//!
//! Every component that can tolerate odd input takes a `&mut Diagnostics`
//! instead of logging through a global. Each report is also forwarded to
//! `tracing` so the CLI shows it live.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A second comment replaced an earlier one.
    DuplicateComment,
    /// No component consumed the statement; it was dropped.
    UnrecognizedStatement,
    /// Two emitted entities resolved to the same scoped name.
    NameCollision,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::DuplicateComment => "duplicate comment",
            DiagnosticKind::UnrecognizedStatement => "unrecognized statement",
            DiagnosticKind::NameCollision => "name collision",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// IRI of the entity the finding is about.
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on <{}>: {}", self.kind, self.subject, self.message)
    }
}

/// Ordered sink of [`Diagnostic`]s.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, kind: DiagnosticKind, subject: &str, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            kind,
            subject: subject.to_string(),
            message: message.into(),
        };
        match kind {
            DiagnosticKind::UnrecognizedStatement => tracing::debug!("{diagnostic}"),
            DiagnosticKind::DuplicateComment | DiagnosticKind::NameCollision => {
                tracing::warn!("{diagnostic}")
            }
        }
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All diagnostics of one kind, in report order.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }
}
