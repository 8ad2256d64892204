//! Error types for Flowpath operations.
//!
//! This module provides the main error type [`FlowpathError`] which wraps
//! the error conditions that can occur while loading a layout and
//! navigating between activities.

use std::{io, path::PathBuf};

use thiserror::Error;

use flowpath_parser::error::ParseError;

use crate::navigation::TransformMode;

/// The main error type for Flowpath operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source code
/// spans, together with the decoded layout text the spans refer to.
///
/// A current activity that is missing from the layout is not an error;
/// navigation returns `Ok(None)` in that case.
#[derive(Debug, Error)]
pub enum FlowpathError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Activity path has no activity folder inside a project folder: {}", .0.display())]
    InvalidActivityPath(PathBuf),

    #[error("Navigation is not supported for {0} activities")]
    UnsupportedMode(TransformMode),
}

impl FlowpathError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
