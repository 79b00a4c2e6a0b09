//! End-to-end refresh through the service container with a stub command runner

use std::io;
use std::process::Output;
use std::sync::Arc;

use tempfile::TempDir;

use voltmeter::application::services::RefreshOutcome;
use voltmeter::config::Settings;
use voltmeter::domain::{ApplicationStatus, Environment};
use voltmeter::infrastructure::di::ServiceContainer;
use voltmeter::infrastructure::traits::{CommandRunner, RealFileSystem};
use voltmeter::util::testing;

/// Command runner whose shell can never be started
struct BrokenShell;

impl CommandRunner for BrokenShell {
    fn run(&self, _cmd: &str, _args: &[&str]) -> io::Result<Output> {
        Err(io::Error::new(io::ErrorKind::NotFound, "shell not found"))
    }
}

fn container(temp: &TempDir, config: &str) -> ServiceContainer {
    testing::init_test_setup();
    let mut settings = Settings::from_toml_str(config).unwrap();
    settings.status_dir = temp.path().join("status");
    ServiceContainer::with_deps(settings, Arc::new(RealFileSystem), Arc::new(BrokenShell))
}

#[test]
fn given_services_without_checks_when_refreshing_then_default_statuses_are_stored() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let container = container(
        &temp,
        r#"
[environments.staging]
services = [{ name = "api" }, { name = "worker" }]
"#,
    );
    let environment = Environment::new("staging");

    // Act
    let outcome = container
        .environment_refresher()
        .refresh(&environment)
        .unwrap();

    // Assert
    assert!(matches!(outcome, RefreshOutcome::Succeeded { stored: 2 }));
    let report = container
        .status_store()
        .load(&environment)
        .unwrap()
        .expect("report stored");
    assert_eq!(report.statuses, vec![ApplicationStatus::default(); 2]);
}

#[test]
fn given_unknown_environment_when_refreshing_then_failure_is_absorbed() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let container = container(&temp, "");
    let environment = Environment::new("prod");

    // Act
    let outcome = container
        .environment_refresher()
        .refresh(&environment)
        .unwrap();

    // Assert
    assert!(outcome.is_failed());
    assert!(container.status_store().load(&environment).unwrap().is_none());
}

#[test]
fn given_check_cannot_run_when_refreshing_then_nothing_is_stored() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let container = container(
        &temp,
        r#"
[environments.dev]
services = [{ name = "api", check = "true" }]
"#,
    );
    let environment = Environment::new("dev");

    // Act
    let outcome = container
        .environment_refresher()
        .refresh(&environment)
        .unwrap();

    // Assert
    assert!(outcome.is_failed());
    assert!(container.status_store().load(&environment).unwrap().is_none());
}

#[test]
fn given_environment_with_no_services_when_refreshing_then_outcome_is_empty() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let container = container(&temp, "[environments.empty]\n");

    // Act
    let outcome = container
        .environment_refresher()
        .refresh(&Environment::new("empty"))
        .unwrap();

    // Assert
    assert!(matches!(outcome, RefreshOutcome::SucceededEmpty));
}
