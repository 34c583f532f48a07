//! vsixpack: packages a VS Code extension project into a `.vsix` archive
//!
//! This crate provides the main vsixpack library, re-exporting core
//! functionality from `vsixpack-core` and organizing the collection,
//! dependency resolution and packaging modules.

pub use vsixpack_core::package::manifest::Manifest;
pub use vsixpack_core::{format_error_with_help, ErrorHelp, VsixError, VsixResult};

/// Core module re-exported from vsixpack-core.
pub mod core {
    pub use vsixpack_core::core::*;
    pub use vsixpack_core::*;

    /// Path module re-exported from vsixpack-core.
    pub mod path {
        pub use vsixpack_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// File collection and ignore rules.
pub mod files;

/// Package manager detection and dependency resolution.
pub mod resolver;

/// Validation, classification and archive writing.
pub mod package;
