//! Integration tests module
//!
//! Runs the vsixpack binary against throwaway extension projects.

pub mod common;
pub mod config;
pub mod ls;
pub mod package;
pub mod show;
