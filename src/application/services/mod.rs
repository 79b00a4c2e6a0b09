//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on boundary traits (ServiceDiscovery, CommandRunner, etc.)
//! but are themselves concrete structs, not traits.

mod environment_status;
mod service_status;

pub use environment_status::{
    EnvironmentStatusRefresher, RefreshOutcome, REFRESH_FAILED_TEMPLATE,
};
pub use service_status::RefreshServiceStatus;
