//! Domain entities: core data structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A named deployment context containing zero or more services.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Reject blank names and names that could address a path.
    ///
    /// The name doubles as a file stem under the status directory, so
    /// separators, `..` and a leading `.` are refused.
    pub fn validate(&self) -> Result<(), DomainError> {
        let reason = if self.name.trim().is_empty() {
            "name must not be blank"
        } else if self.name.contains(['/', '\\']) {
            "name must not contain path separators"
        } else if self.name.contains("..") {
            "name must not contain '..'"
        } else if self.name.starts_with('.') {
            "name must not start with '.'"
        } else {
            return Ok(());
        };
        Err(DomainError::InvalidEnvironment {
            name: self.name.clone(),
            reason,
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A discoverable unit within an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    /// Shell command whose exit status decides health; `None` means "not probed".
    pub check: Option<String>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            check: None,
        }
    }

    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }
}

/// Health of a single service at check time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    #[default]
    Unknown,
    Healthy,
    Unhealthy,
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Health::Unknown => "unknown",
            Health::Healthy => "healthy",
            Health::Unhealthy => "unhealthy",
        };
        f.write_str(s)
    }
}

/// Snapshot of a service's health.
///
/// `Default` is the empty snapshot: no service name, `Unknown`, never checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationStatus {
    pub service: String,
    pub health: Health,
    pub checked_at: Option<DateTime<Utc>>,
    pub detail: Option<String>,
}

/// Persisted statuses of one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentReport {
    pub environment: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub statuses: Vec<ApplicationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_with_name_is_valid() {
        assert!(Environment::new("staging").validate().is_ok());
    }

    #[test]
    fn environment_with_blank_name_is_invalid() {
        let err = Environment::new(" \t").validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidEnvironment { .. }));
    }

    #[test]
    fn environment_with_path_like_name_is_invalid() {
        for name in ["../etc", "a/b", "a\\b", "..", ".hidden", "x..y"] {
            let err = Environment::new(name).validate().unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidEnvironment { .. }),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn environment_with_spaces_and_dashes_is_valid() {
        assert!(Environment::new("some environment").validate().is_ok());
        assert!(Environment::new("eu-west_1.prod").validate().is_ok());
    }

    #[test]
    fn default_status_is_empty_unknown_snapshot() {
        let status = ApplicationStatus::default();
        assert!(status.service.is_empty());
        assert_eq!(status.health, Health::Unknown);
        assert!(status.checked_at.is_none());
        assert!(status.detail.is_none());
    }
}
