//! Error codes for the layout diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Markup errors
//! - `E1xx` - Layout structure errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Markup Errors (E0xx)
    // =========================================================================
    /// Malformed markup.
    ///
    /// The document is not well-formed XML.
    E001,

    /// Unexpected end of document.
    ///
    /// The document ended while elements were still open.
    E002,

    // =========================================================================
    // Structure Errors (E1xx)
    // =========================================================================
    /// Unexpected root element.
    ///
    /// The root element is not `DiagramLayout`.
    E100,

    /// Invalid layout structure.
    ///
    /// The document is well-formed but does not map onto the layout model,
    /// for example a coordinate that is not a number.
    E101,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed markup",
            ErrorCode::E002 => "unexpected end of document",
            ErrorCode::E100 => "unexpected root element",
            ErrorCode::E101 => "invalid layout structure",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
