pub mod config;
pub mod ls;
pub mod package;
pub mod show;
