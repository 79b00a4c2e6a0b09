//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{EnvironmentStatusRefresher, RefreshServiceStatus};
use crate::config::Settings;
use crate::infrastructure::discovery::ConfiguredServiceDiscovery;
use crate::infrastructure::logging::TracingStatusLogger;
use crate::infrastructure::store::FileStatusStore;
use crate::infrastructure::traits::{
    CommandRunner, EnvironmentStatusStore, FileSystem, RealCommandRunner, RealFileSystem,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    store: Arc<FileStatusStore>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        let settings = Arc::new(settings);
        let store = Arc::new(FileStatusStore::new(
            fs.clone(),
            settings.status_dir.clone(),
        ));

        Self {
            settings,
            fs,
            cmd,
            store,
        }
    }

    /// Status store shared by the refresher and readers.
    pub fn status_store(&self) -> Arc<dyn EnvironmentStatusStore> {
        self.store.clone()
    }

    /// Refresher wired with configured discovery and command-based probes.
    pub fn environment_refresher(&self) -> EnvironmentStatusRefresher {
        EnvironmentStatusRefresher::new(
            self.status_store(),
            Arc::new(TracingStatusLogger),
            Arc::new(ConfiguredServiceDiscovery::new(self.settings.clone())),
            Arc::new(RefreshServiceStatus::new(
                self.cmd.clone(),
                self.settings.shell.clone(),
            )),
        )
    }
}
