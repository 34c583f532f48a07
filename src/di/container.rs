//! Service container for dependency injection

use super::process::SystemCommandRunner;
use super::traits::{CommandRunner, ConfigProvider};
use crate::config::Config;
use crate::core::VsixResult;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the services the packaging pipeline needs as trait objects so
/// tests can swap in mocks.
///
/// # Example (Testing)
///
/// ```
/// use vsixpack::di::{ServiceContainer, mocks::*};
/// use std::sync::Arc;
///
/// let config = Arc::new(MockConfigProvider::default());
/// let runner = Arc::new(MockCommandRunner::new());
///
/// let container = ServiceContainer::with_providers(config, runner);
/// assert!(container.config.bundle_dependencies());
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub runner: Arc<dyn CommandRunner>,
}

impl ServiceContainer {
    /// Create a service container with production implementations
    pub fn new() -> VsixResult<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    /// Create a service container around an already-loaded config
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            runner: Arc::new(SystemCommandRunner::new()),
        }
    }

    /// Create a service container with custom providers
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self { config, runner }
    }
}
