//! voltmeter: refresh, persist and report the health of service environments.
//!
//! Layers, innermost first: `domain` (entities, rules), `application`
//! (use cases), `infrastructure` (adapters, DI), `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
