//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/voltmeter/voltmeter.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `VOLTMETER_*` prefix

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::Service;

/// A service entry of an environment table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    pub name: String,
    /// Health check command, run through `shell -c`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
}

impl From<&ServiceConfig> for Service {
    fn from(cfg: &ServiceConfig) -> Self {
        Self {
            name: cfg.name.clone(),
            check: cfg.check.clone(),
        }
    }
}

/// `[environments.<name>]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub services: Vec<ServiceConfig>,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub status_dir: Option<PathBuf>,
    pub shell: Option<String>,
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

/// Unified configuration for voltmeter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding one status file per environment (default: ~/.voltmeter/status)
    pub status_dir: PathBuf,
    /// Shell used to run health checks (default: sh)
    pub shell: String,
    /// Known environments and their services
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            status_dir: default_status_dir(),
            shell: "sh".into(),
            environments: BTreeMap::new(),
        }
    }
}

fn default_status_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".voltmeter").join("status"))
        .unwrap_or_else(|| PathBuf::from("~/.voltmeter/status"))
}

/// Get the XDG config directory for voltmeter.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "voltmeter").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("voltmeter.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// `config_file`, when given, must exist. Its environment tables replace
    /// same-named tables from lower layers; other tables are kept.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), config_file, None)
    }

    /// Load settings from explicit sources.
    ///
    /// `global` is read only if it exists. `env`, when given, stands in for
    /// the process environment (keys keep their `VOLTMETER_` prefix).
    pub fn load_from(
        global: Option<&Path>,
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(raw);
            }
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(raw);
        }

        current = Self::apply_env_overrides(current, env)?;
        current.expand_paths();

        Ok(current)
    }

    /// Overlay scalars win if set; environment tables replace by name.
    fn merge_with(mut self, overlay: RawSettings) -> Self {
        if let Some(dir) = overlay.status_dir {
            self.status_dir = dir;
        }
        if let Some(shell) = overlay.shell {
            self.shell = shell;
        }
        self.environments.extend(overlay.environments);
        self
    }

    /// Apply VOLTMETER_* environment variables as explicit overrides.
    ///
    /// `VOLTMETER_STATUS_DIR` maps to `status_dir`; `__` separates nested keys.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("VOLTMETER")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("status_dir") {
            settings.status_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("shell") {
            settings.shell = val;
        }

        Ok(settings)
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the status directory.
    fn expand_paths(&mut self) {
        let raw = self.status_dir.to_string_lossy().to_string();
        let expanded = shellexpand::full(&raw)
            .map(|s| s.into_owned())
            .unwrap_or(raw);
        self.status_dir = PathBuf::from(expanded);
    }

    /// Parse settings from a TOML string on top of the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ApplicationError> {
        let raw: RawSettings = toml::from_str(content).map_err(|e| ApplicationError::Config {
            message: format!("parse settings: {}", e),
        })?;
        let mut settings = Self::default().merge_with(raw);
        settings.expand_paths();
        Ok(settings)
    }

    /// Services configured for an environment, `None` if the environment is unknown.
    pub fn services_in(&self, environment: &str) -> Option<Vec<Service>> {
        self.environments
            .get(environment)
            .map(|env| env.services.iter().map(Service::from).collect())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_environments() {
        let settings = Settings::default();
        assert!(settings.environments.is_empty());
        assert_eq!(settings.shell, "sh");
        assert!(settings.status_dir.ends_with("status"));
    }

    #[test]
    fn merge_replaces_same_named_environment_and_keeps_others() {
        let mut base = Settings::default();
        base.environments.insert(
            "prod".into(),
            EnvironmentConfig {
                services: vec![ServiceConfig {
                    name: "old".into(),
                    check: None,
                }],
            },
        );
        base.environments
            .insert("dev".into(), EnvironmentConfig::default());

        let mut overlay = RawSettings::default();
        overlay.environments.insert(
            "prod".into(),
            EnvironmentConfig {
                services: vec![ServiceConfig {
                    name: "new".into(),
                    check: Some("true".into()),
                }],
            },
        );

        let merged = base.merge_with(overlay);

        assert_eq!(merged.environments.len(), 2);
        assert_eq!(merged.environments["prod"].services[0].name, "new");
    }
}
