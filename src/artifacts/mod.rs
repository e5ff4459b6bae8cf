//! Generic artifact operations against the JFrog CLI.
//!
//! This module turns pipeline task inputs into a single `jf rt ...`
//! invocation, registers a short-lived server profile for the duration of
//! that invocation, and guarantees that the profile and any generated file
//! spec are removed afterwards. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
