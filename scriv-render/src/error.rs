//! Error types for rendering operations

use std::fmt;

/// Errors that can occur while rendering a document
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Backend not found in registry
    BackendNotFound(String),
    /// File or directory I/O failure
    Io(String),
    /// An external converter binary could not be located
    ToolNotFound(String),
    /// An external converter was found but its invocation failed
    ToolFailed(String),
    /// Error while building the output package
    Render(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::BackendNotFound(name) => write!(f, "Backend '{name}' not found"),
            RenderError::Io(msg) => write!(f, "I/O error: {msg}"),
            RenderError::ToolNotFound(msg) => write!(f, "External tool not found: {msg}"),
            RenderError::ToolFailed(msg) => write!(f, "External tool failed: {msg}"),
            RenderError::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}
