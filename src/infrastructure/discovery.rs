//! Service discovery backed by the `[environments]` config tables

use std::sync::Arc;

use tracing::debug;

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{DomainError, Environment, Service};
use crate::infrastructure::traits::ServiceDiscovery;

/// Discovers services from the loaded settings.
pub struct ConfiguredServiceDiscovery {
    settings: Arc<Settings>,
}

impl ConfiguredServiceDiscovery {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

impl ServiceDiscovery for ConfiguredServiceDiscovery {
    fn discover_services_in(&self, environment: &Environment) -> ApplicationResult<Vec<Service>> {
        let services = self
            .settings
            .services_in(&environment.name)
            .ok_or_else(|| DomainError::UnknownEnvironment(environment.name.clone()))?;
        debug!(
            "discover: environment={} services={}",
            environment,
            services.len()
        );
        Ok(services)
    }
}
