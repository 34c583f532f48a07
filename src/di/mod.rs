//! Dependency injection infrastructure for Vsixpack
//!
//! External processes and configuration are reached through traits so the
//! packaging pipeline can be tested without npm, yarn or pnpm installed.
//!
//! # Example (Production)
//! ```no_run
//! use vsixpack::di::ServiceContainer;
//!
//! # fn example() -> vsixpack::core::VsixResult<()> {
//! let container = ServiceContainer::new()?;
//! # Ok(())
//! # }
//! ```

pub mod container;
pub mod mocks;
pub mod process;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use process::SystemCommandRunner;
pub use traits::{CommandOutput, CommandRunner, ConfigProvider};
