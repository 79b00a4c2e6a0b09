//! Infrastructure layer: adapters, I/O implementations and DI container
//!
//! This layer implements the boundary traits and wires up services.

pub mod di;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod store;
pub mod traits;

pub use error::InfraError;
