//! Command dispatch

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::RefreshOutcome;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::Environment;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Refresh { environments }) => _refresh(&container(cli)?, environments),
        Some(Commands::Status { environment }) => _status(&container(cli)?, environment),
        Some(Commands::Envs) => _envs(&load_settings(cli)?),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(&load_settings(cli)?),
            ConfigCommands::Path => _config_path(),
        },
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?))
}

/// Validate every name up front so a bad argument stops the run before any refresh.
fn parse_environments(names: &[String]) -> CliResult<Vec<Environment>> {
    names
        .iter()
        .map(|name| -> CliResult<Environment> {
            let environment = Environment::new(name.as_str());
            environment.validate().map_err(ApplicationError::from)?;
            Ok(environment)
        })
        .collect()
}

/// Refresh every environment in order; one failure does not stop the rest.
#[instrument(skip(container))]
fn _refresh(container: &ServiceContainer, environments: &[String]) -> CliResult<()> {
    let environments = parse_environments(environments)?;
    let refresher = container.environment_refresher();
    let mut failed = 0;

    for environment in &environments {
        match refresher.refresh(environment)? {
            RefreshOutcome::Succeeded { stored } => {
                output::success(&format!("{}: stored {} statuses", environment, stored))
            }
            RefreshOutcome::SucceededEmpty => {
                output::skipped(&format!("{}: no services discovered", environment))
            }
            RefreshOutcome::Failed(e) => {
                failed += 1;
                output::failure(&format!("{}: {}", environment, e));
            }
        }
    }

    if failed > 0 {
        return Err(CliError::RefreshFailed {
            failed,
            total: environments.len(),
        });
    }
    Ok(())
}

#[instrument(skip(container))]
fn _status(container: &ServiceContainer, environment: &str) -> CliResult<()> {
    let environment = Environment::new(environment);
    environment.validate().map_err(ApplicationError::from)?;

    let report = container
        .status_store()
        .load(&environment)?
        .ok_or_else(|| CliError::NoStatus(environment.name.clone()))?;
    debug!("status: {} entries", report.statuses.len());

    output::header(&format!(
        "{} (updated {})",
        report.environment,
        report.updated_at.to_rfc3339()
    ));
    for status in &report.statuses {
        let name = if status.service.is_empty() {
            "<unnamed>"
        } else {
            status.service.as_str()
        };
        match &status.detail {
            Some(detail) => output::detail(&format!("{}: {} ({})", name, status.health, detail)),
            None => output::detail(&format!("{}: {}", name, status.health)),
        }
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _envs(settings: &Settings) -> CliResult<()> {
    if settings.environments.is_empty() {
        output::warning("no environments configured");
        return Ok(());
    }
    for (name, env) in &settings.environments {
        output::info(&format!("{} ({} services)", name, env.services.len()));
    }
    Ok(())
}

fn _config_show(settings: &Settings) -> CliResult<()> {
    let rendered = settings.to_toml()?;
    io::stdout()
        .write_all(rendered.as_bytes())
        .map_err(|e| InfraError::io("write settings to stdout", e))?;
    Ok(())
}

fn _config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::info(&path.display()),
        None => output::warning("cannot determine config directory"),
    }
    Ok(())
}
