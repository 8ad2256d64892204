//! # Flowpath Parser
//!
//! Readers for the XML documents of a process project:
//!
//! - [`parse_layout`] turns a project's layout document into the
//!   [`flowpath_core::layout::DiagramLayout`] graph model, reporting
//!   malformed input as a [`ParseError`] with byte spans.
//! - [`xpath::build_xpath`] derives the XPath of the node under a cursor
//!   in arbitrary XML text.
//!
//! ## Usage
//!
//! ```
//! # use flowpath_parser::{parse_layout_str, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <DiagramLayout>
//!           <Elements>
//!             <DiagramElement UID="e1"><Reference>Validate</Reference></DiagramElement>
//!           </Elements>
//!         </DiagramLayout>
//!     "#;
//!
//!     let layout = parse_layout_str(source)?;
//!     assert_eq!(layout.uid_of("Validate"), Some("e1"));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod xpath;

mod layout;
mod layout_types;
mod span;

pub use error::ParseError;
pub use layout::ROOT_ELEMENT;
pub use span::Span;

use log::debug;

use flowpath_core::{encoding, layout::DiagramLayout};

/// Parse the raw bytes of a layout document.
///
/// The bytes are decoded with the charset found by
/// [`encoding::detect`] before parsing, so UTF-16 and legacy single-byte
/// documents are accepted as well as UTF-8.
///
/// # Errors
///
/// Returns a [`ParseError`] when the document is not well-formed, when its
/// root is not `DiagramLayout`, or when its content does not fit the layout
/// structure. Spans in the diagnostics refer to the decoded text.
pub fn parse_layout(bytes: &[u8]) -> Result<DiagramLayout, ParseError> {
    let decoded = encoding::decode(bytes);
    debug!(encoding = decoded.encoding().name(); "Layout document decoded");
    parse_layout_str(decoded.text())
}

/// Parse an already decoded layout document.
///
/// # Errors
///
/// See [`parse_layout`].
pub fn parse_layout_str(source: &str) -> Result<DiagramLayout, ParseError> {
    layout::parse(source)
}
