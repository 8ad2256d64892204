//! Flowpath Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Flowpath
//! crates. It includes:
//!
//! - **Encoding**: Charset detection and BOM-preserving text I/O ([`encoding`] module)
//! - **Activities**: Activity kind classification ([`activity::ActivityKind`])
//! - **Layout**: The diagram graph model of a process layout ([`layout`] module)

pub mod activity;
pub mod encoding;
pub mod layout;
