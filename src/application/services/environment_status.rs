//! Environment status refresh
//!
//! Discovers the services of an environment, refreshes each one and stores
//! the aggregated statuses. Operational failures are logged and absorbed so
//! that a caller refreshing many environments is never interrupted.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ApplicationStatus, Environment};
use crate::infrastructure::traits::{
    EnvironmentStatusStore, LogProperty, ServiceDiscovery, ServiceStatusRefresher, StatusLogger,
};

/// Message template logged when refreshing an environment fails.
pub const REFRESH_FAILED_TEMPLATE: &str = "Could not get status of {Environment}";

/// Result of one environment refresh.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// Statuses were stored for `stored` services.
    Succeeded { stored: usize },
    /// Discovery found no services; nothing was stored.
    SucceededEmpty,
    /// Discovery, a service refresh or the store failed.
    Failed(ApplicationError),
}

impl RefreshOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, RefreshOutcome::Failed(_))
    }
}

/// Refreshes and persists the status of whole environments.
pub struct EnvironmentStatusRefresher {
    store: Arc<dyn EnvironmentStatusStore>,
    logger: Arc<dyn StatusLogger>,
    discovery: Arc<dyn ServiceDiscovery>,
    service_refresher: Arc<dyn ServiceStatusRefresher>,
}

impl EnvironmentStatusRefresher {
    pub fn new(
        store: Arc<dyn EnvironmentStatusStore>,
        logger: Arc<dyn StatusLogger>,
        discovery: Arc<dyn ServiceDiscovery>,
        service_refresher: Arc<dyn ServiceStatusRefresher>,
    ) -> Self {
        Self {
            store,
            logger,
            discovery,
            service_refresher,
        }
    }

    /// Refresh `environment`, logging and absorbing operational failures.
    ///
    /// Returns `Err` only when the environment name is invalid; nothing else
    /// is touched in that case. Every other failure comes back as
    /// `Ok(RefreshOutcome::Failed(_))` after being logged once.
    pub fn refresh(&self, environment: &Environment) -> ApplicationResult<RefreshOutcome> {
        let outcome = self.try_refresh(environment)?;
        if let RefreshOutcome::Failed(cause) = &outcome {
            self.logger.error(
                cause,
                REFRESH_FAILED_TEMPLATE,
                &[LogProperty::new("Environment", environment)],
            );
        }
        Ok(outcome)
    }

    /// Like [`refresh`](Self::refresh) but leaves logging of `Failed` to the caller.
    ///
    /// Per-service results are discarded: one default status is stored for
    /// every discovered service.
    pub fn try_refresh(&self, environment: &Environment) -> ApplicationResult<RefreshOutcome> {
        environment.validate()?;

        Ok(match self.refresh_services(environment) {
            Ok(0) => RefreshOutcome::SucceededEmpty,
            Ok(stored) => RefreshOutcome::Succeeded { stored },
            Err(e) => RefreshOutcome::Failed(e),
        })
    }

    fn refresh_services(&self, environment: &Environment) -> ApplicationResult<usize> {
        debug!("refresh: environment={}", environment);
        let services = self.discovery.discover_services_in(environment)?;
        debug!("refresh: discovered {} services", services.len());

        let mut results = Vec::with_capacity(services.len());
        for service in &services {
            self.service_refresher.refresh(service)?;
            results.push(ApplicationStatus::default());
        }

        if !results.is_empty() {
            self.store.update(environment, &results)?;
            info!(
                "stored {} statuses for environment {}",
                results.len(),
                environment
            );
        }

        Ok(results.len())
    }
}
