//! Activity-flow navigation.
//!
//! This module answers "which activity comes after (or before) this one"
//! for a business-process diagram. It works on an already parsed
//! [`DiagramLayout`](flowpath_core::layout::DiagramLayout); loading the
//! layout from disk is left to [`Navigator`](crate::Navigator).
//!
//! # Submodules
//!
//! - [`history`] - Per-session stack of visited activities
//! - [`location`] - Mapping from an activity file path to its folder and layout document
//! - [`mode`] - Exit-point matching rules per activity kind
//! - [`resolver`] - Next/previous resolution over the diagram graph
//!
//! # Re-exports
//!
//! - [`resolve_next`] and [`resolve_previous`] - Pure resolution functions

pub mod history;
pub mod location;
pub mod mode;
mod resolver;

pub use history::NavigationHistory;
pub use location::ActivityLocation;
pub use mode::TransformMode;
pub use resolver::{resolve_next, resolve_previous};
