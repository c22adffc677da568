use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Errors that make a source string unusable as a document.
///
/// A parse either yields a complete [`Document`](crate::Document) or one of
/// these; there is no partial tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("Markup syntax error at {at}: {message}")]
    Syntax { message: String, at: Position },

    #[error("Mismatched closing tag at {at}: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        expected: String,
        found: String,
        at: Position,
    },

    #[error("Unclosed tag <{name}> opened at {at}")]
    UnclosedTag { name: String, at: Position },

    #[error("Invalid entity reference at {at}: {message} (escape a literal ampersand as &amp;)")]
    Entity { message: String, at: Position },

    #[error("Duplicate attribute '{name}' at {at}")]
    DuplicateAttribute { name: String, at: Position },

    #[error("Nesting exceeds the maximum depth of {limit} at {at}")]
    TooDeep { limit: usize, at: Position },

    #[error("Unexpected content after the end of the document at {at}")]
    TrailingContent { at: Position },
}

impl MarkupError {
    /// Where in the author's source the problem was detected.
    pub fn position(&self) -> Position {
        match self {
            MarkupError::Syntax { at, .. }
            | MarkupError::MismatchedTag { at, .. }
            | MarkupError::UnclosedTag { at, .. }
            | MarkupError::Entity { at, .. }
            | MarkupError::DuplicateAttribute { at, .. }
            | MarkupError::TooDeep { at, .. }
            | MarkupError::TrailingContent { at } => *at,
        }
    }
}

/// A diagnostic message produced by the validator.
///
/// Diagnostics are non-fatal: the document still renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Source location, known only for parse errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<Position>,
}

impl Diagnostic {
    pub(crate) fn new(severity: Severity, code: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            code: Some(code.to_string()),
            at: None,
        }
    }
}

impl From<&MarkupError> for Diagnostic {
    fn from(err: &MarkupError) -> Self {
        Diagnostic {
            at: Some(err.position()),
            ..Diagnostic::new(Severity::Error, "E001", err.to_string())
        }
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}
