//! Core utilities shared by the Vsixpack library and binary.
//!
//! Holds the error type, path helpers, version parsing and the
//! `package.json` model.

pub mod core;
pub mod package;

pub use crate::core::error::{VsixError, VsixResult};
pub use crate::core::error_help::{format_error_with_help, ErrorHelp};
