//! Error and diagnostic system for the layout parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error with an optional error code, source locations, and help
//! text. Diagnostics are wrapped in [`ParseError`] for returning from
//! [`parse_layout`](crate::parse_layout).
//!
//! # Example
//!
//! ```
//! # use flowpath_parser::error::{Diagnostic, ErrorCode};
//! # use flowpath_parser::Span;
//!
//! let diag = Diagnostic::error("expected `DiagramLayout` root element, found `Process`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(1..8), "unexpected root element")
//!     .with_help("point the navigator at the project's layout document");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
