//! Tests for FileStatusStore

use std::sync::Arc;

use tempfile::TempDir;

use rstest::rstest;

use voltmeter::application::ApplicationError;
use voltmeter::domain::{ApplicationStatus, DomainError, Environment, Health};
use voltmeter::infrastructure::store::FileStatusStore;
use voltmeter::infrastructure::traits::{EnvironmentStatusStore, RealFileSystem};

fn store_in(temp: &TempDir) -> FileStatusStore {
    FileStatusStore::new(Arc::new(RealFileSystem), temp.path().join("status"))
}

#[test]
fn given_nothing_stored_when_loading_then_returns_none() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    // Act
    let report = store.load(&Environment::new("staging")).unwrap();

    // Assert
    assert!(report.is_none());
}

#[test]
fn given_statuses_when_updating_then_report_file_is_written_in_missing_dir() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let environment = Environment::new("staging");

    // Act
    store
        .update(&environment, &[ApplicationStatus::default()])
        .unwrap();

    // Assert
    let path = store.report_path(&environment).unwrap();
    assert_eq!(path, temp.path().join("status").join("staging.toml"));
    let content = std::fs::read_to_string(&path).expect("report written");
    assert!(content.contains("environment = \"staging\""));
}

#[test]
fn given_stored_report_when_loading_then_statuses_are_read_back() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let environment = Environment::new("prod");
    let statuses = vec![
        ApplicationStatus::default(),
        ApplicationStatus {
            service: "api".into(),
            health: Health::Unhealthy,
            checked_at: None,
            detail: Some("connection refused".into()),
        },
    ];
    store.update(&environment, &statuses).unwrap();

    // Act
    let report = store.load(&environment).unwrap().expect("report present");

    // Assert
    assert_eq!(report.environment, "prod");
    assert_eq!(report.statuses, statuses);
}

#[test]
fn given_second_update_when_loading_then_latest_statuses_replace_previous() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let environment = Environment::new("dev");
    store
        .update(&environment, &vec![ApplicationStatus::default(); 3])
        .unwrap();

    // Act
    store
        .update(&environment, &[ApplicationStatus::default()])
        .unwrap();

    // Assert
    let report = store.load(&environment).unwrap().unwrap();
    assert_eq!(report.statuses.len(), 1);
}

#[test]
fn given_corrupt_report_when_loading_then_returns_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let environment = Environment::new("dev");
    let path = store.report_path(&environment).unwrap();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not = [valid").unwrap();

    // Act
    let result = store.load(&environment);

    // Assert
    assert!(result.is_err());
}

#[rstest]
#[case("../../etc/escaped")]
#[case("a/../../b")]
#[case(".hidden")]
fn given_path_like_environment_name_when_storing_or_loading_then_nothing_outside_status_dir_is_touched(
    #[case] name: &str,
) {
    // Arrange
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let environment = Environment::new(name);

    // Act
    let path = store.report_path(&environment);
    let updated = store.update(&environment, &[ApplicationStatus::default()]);
    let loaded = store.load(&environment);

    // Assert
    assert!(matches!(
        path,
        Err(ApplicationError::Domain(DomainError::InvalidEnvironment { .. }))
    ));
    assert!(updated.is_err());
    assert!(loaded.is_err());
    assert!(!temp.path().join("status").exists());
}
