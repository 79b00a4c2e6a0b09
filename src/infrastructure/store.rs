//! File-backed status store
//!
//! One TOML report per environment: `<status_dir>/<environment>.toml`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{ApplicationStatus, Environment, EnvironmentReport};
use crate::infrastructure::traits::{EnvironmentStatusStore, FileSystem};

/// Stores environment reports as TOML files.
pub struct FileStatusStore {
    fs: Arc<dyn FileSystem>,
    status_dir: PathBuf,
}

impl FileStatusStore {
    pub fn new(fs: Arc<dyn FileSystem>, status_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            status_dir: status_dir.into(),
        }
    }

    /// Location of an environment's report, always directly inside the status dir.
    pub fn report_path(&self, environment: &Environment) -> ApplicationResult<PathBuf> {
        environment.validate()?;
        Ok(self.status_dir.join(format!("{}.toml", environment.name)))
    }

    fn parse(path: &Path, content: &str) -> ApplicationResult<EnvironmentReport> {
        toml::from_str(content)
            .map_err(|e| ApplicationError::failed(format!("parse report {}", path.display()), e))
    }
}

impl EnvironmentStatusStore for FileStatusStore {
    fn update(
        &self,
        environment: &Environment,
        statuses: &[ApplicationStatus],
    ) -> ApplicationResult<()> {
        let path = self.report_path(environment)?;
        debug!("update: path={} statuses={}", path.display(), statuses.len());

        let report = EnvironmentReport {
            environment: environment.name.clone(),
            updated_at: Utc::now(),
            statuses: statuses.to_vec(),
        };
        let content = toml::to_string_pretty(&report).map_err(|e| {
            ApplicationError::failed(format!("serialize report for {}", environment), e)
        })?;

        self.fs
            .ensure_parent(&path)
            .with_path_context("create status dir", &path)?;
        self.fs
            .write(&path, &content)
            .with_path_context("write report", &path)?;
        Ok(())
    }

    fn load(&self, environment: &Environment) -> ApplicationResult<Option<EnvironmentReport>> {
        let path = self.report_path(environment)?;
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        let content = self
            .fs
            .read_to_string(&path)
            .with_path_context("read report", &path)?;
        Self::parse(&path, &content).map(Some)
    }
}
