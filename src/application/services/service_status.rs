//! Per-service status refresh
//!
//! Probes a single service by running its configured check command.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ApplicationStatus, Health, Service};
use crate::infrastructure::traits::{CommandRunner, ServiceStatusRefresher};

/// Service that probes one service through its check command.
pub struct RefreshServiceStatus {
    cmd: Arc<dyn CommandRunner>,
    shell: String,
}

impl RefreshServiceStatus {
    /// Create a new probe running checks as `<shell> -c <check>`.
    pub fn new(cmd: Arc<dyn CommandRunner>, shell: impl Into<String>) -> Self {
        Self {
            cmd,
            shell: shell.into(),
        }
    }
}

impl ServiceStatusRefresher for RefreshServiceStatus {
    fn refresh(&self, service: &Service) -> ApplicationResult<ApplicationStatus> {
        let mut status = ApplicationStatus {
            service: service.name.clone(),
            checked_at: Some(Utc::now()),
            ..ApplicationStatus::default()
        };

        let Some(check) = service.check.as_deref() else {
            debug!("refresh: service {} has no check", service.name);
            return Ok(status);
        };

        debug!("refresh: service={} check={}", service.name, check);
        let output = self
            .cmd
            .run(&self.shell, &["-c", check])
            .map_err(|e| ApplicationError::failed(format!("run check for {}", service.name), e))?;

        if output.status.success() {
            status.health = Health::Healthy;
        } else {
            status.health = Health::Unhealthy;
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            status.detail = Some(if stderr.is_empty() {
                format!("check exited with {}", output.status)
            } else {
                stderr
            });
        }
        Ok(status)
    }
}
