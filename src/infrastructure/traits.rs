//! Boundary traits for testability
//!
//! These traits abstract external I/O and the collaborators of the refresh
//! use case, allowing services to be tested with mock implementations.

use std::io;
use std::path::Path;
use std::process::Output;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ApplicationStatus, Environment, EnvironmentReport, Service};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create the parent directories of `path` if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;
}

/// Enumerates the services that belong to an environment.
pub trait ServiceDiscovery: Send + Sync {
    fn discover_services_in(&self, environment: &Environment) -> ApplicationResult<Vec<Service>>;
}

/// Refreshes the status of a single service.
pub trait ServiceStatusRefresher: Send + Sync {
    fn refresh(&self, service: &Service) -> ApplicationResult<ApplicationStatus>;
}

/// Persists aggregated statuses per environment.
pub trait EnvironmentStatusStore: Send + Sync {
    /// Replace the stored statuses of `environment`.
    fn update(&self, environment: &Environment, statuses: &[ApplicationStatus])
        -> ApplicationResult<()>;

    /// Read back the last stored report, `None` if nothing was stored yet.
    fn load(&self, environment: &Environment) -> ApplicationResult<Option<EnvironmentReport>>;
}

/// Structured property attached to a log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogProperty {
    pub name: &'static str,
    pub value: String,
}

impl LogProperty {
    pub fn new(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }
}

/// Structured log sink. Implementations must not fail.
pub trait StatusLogger: Send + Sync {
    /// Emit an error-level event. `template` names properties as `{Name}`.
    fn error(&self, cause: &ApplicationError, template: &str, properties: &[LogProperty]);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        std::process::Command::new(cmd).args(args).output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_parent_creates_missing_ancestors_only() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("a").join("b").join("report.toml");

        RealFileSystem.ensure_parent(&file).unwrap();

        assert!(temp.path().join("a").join("b").is_dir());
        assert!(!file.exists());
    }

    #[test]
    fn ensure_parent_accepts_bare_file_name() {
        RealFileSystem
            .ensure_parent(Path::new("report.toml"))
            .unwrap();
    }
}
